// SPDX-License-Identifier: MPL-2.0
//! Lazy generation of visible grid line segments.
//!
//! Lines are emitted center-outward: verticals at `center.x - k * spacing`
//! (k = 0, 1, ...) until they leave the left edge, then
//! `center.x + k * spacing` (k = 1, 2, ...) until they reach the right edge,
//! followed by the same two sweeps for horizontals along `center.y`.
//! Only positions inside `[0, extent)` are yielded.

use iced::{Point, Size};

/// Level of detail of a grid line set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridLevel {
    /// One line per base spacing.
    Major,
    /// `minor_divisions` lines per major cell.
    Minor,
}

/// A straight line between two points in screen space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    #[must_use]
    pub fn new(from: Point, to: Point) -> Self {
        Self { from, to }
    }

    /// Returns true if the segment is parallel to the y axis.
    #[must_use]
    pub fn is_vertical(&self) -> bool {
        self.from.x == self.to.x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Sweep {
    VerticalBackward,
    VerticalForward,
    HorizontalBackward,
    HorizontalForward,
}

impl Sweep {
    fn next(self) -> Option<Sweep> {
        match self {
            Sweep::VerticalBackward => Some(Sweep::VerticalForward),
            Sweep::VerticalForward => Some(Sweep::HorizontalBackward),
            Sweep::HorizontalBackward => Some(Sweep::HorizontalForward),
            Sweep::HorizontalForward => None,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Sweep::VerticalBackward | Sweep::VerticalForward)
    }

    fn is_backward(self) -> bool {
        matches!(self, Sweep::VerticalBackward | Sweep::HorizontalBackward)
    }
}

/// Restartable iterator over the grid lines visible in a viewport.
///
/// Cloning yields an independent iterator positioned at the same line, so a
/// fresh clone taken before iteration replays the whole sequence.
#[derive(Debug, Clone)]
pub struct GridLines {
    center: Point,
    spacing: f64,
    viewport: Size,
    sweep: Option<Sweep>,
    index: f64,
    // Upper bound on positions still examined in the current sweep. Keeps
    // iteration finite when f64 can no longer separate `index` and `index + 1`.
    budget: u64,
    // Last position examined in the current sweep.
    previous: Option<f64>,
}

impl GridLines {
    pub(crate) fn new(center: Point, spacing: f32, viewport: Size) -> Self {
        let valid = spacing.is_finite()
            && spacing > 0.0
            && center.x.is_finite()
            && center.y.is_finite()
            && viewport.width.is_finite()
            && viewport.height.is_finite();

        let mut lines = Self {
            center,
            spacing: f64::from(spacing),
            viewport,
            sweep: None,
            index: 0.0,
            budget: 0,
            previous: None,
        };
        if valid {
            lines.start(Sweep::VerticalBackward);
        }
        lines
    }

    /// An iterator that yields nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            spacing: 0.0,
            viewport: Size::new(0.0, 0.0),
            sweep: None,
            index: 0.0,
            budget: 0,
            previous: None,
        }
    }

    /// Distance between adjacent lines, or 0 for an empty iterator.
    #[must_use]
    pub fn spacing(&self) -> f32 {
        self.spacing as f32
    }

    fn origin(&self, sweep: Sweep) -> f64 {
        if sweep.is_vertical() {
            f64::from(self.center.x)
        } else {
            f64::from(self.center.y)
        }
    }

    fn extent(&self, sweep: Sweep) -> f64 {
        if sweep.is_vertical() {
            f64::from(self.viewport.width)
        } else {
            f64::from(self.viewport.height)
        }
    }

    fn start(&mut self, sweep: Sweep) {
        let origin = self.origin(sweep);
        let extent = self.extent(sweep);

        // Jump straight to the first index that can land inside [0, extent).
        self.index = if sweep.is_backward() {
            if origin >= extent {
                ((origin - extent) / self.spacing).floor() + 1.0
            } else {
                0.0
            }
        } else {
            (-origin / self.spacing).ceil().max(1.0)
        };
        self.budget = (extent.max(0.0) / self.spacing).floor() as u64 + 3;
        self.previous = None;
        self.sweep = Some(sweep);
    }

    fn finish(&mut self, sweep: Sweep) {
        match sweep.next() {
            Some(next) => self.start(next),
            None => self.sweep = None,
        }
    }

    fn segment(&self, sweep: Sweep, position: f32) -> LineSegment {
        if sweep.is_vertical() {
            LineSegment::new(
                Point::new(position, 0.0),
                Point::new(position, self.viewport.height),
            )
        } else {
            LineSegment::new(
                Point::new(0.0, position),
                Point::new(self.viewport.width, position),
            )
        }
    }
}

impl Iterator for GridLines {
    type Item = LineSegment;

    fn next(&mut self) -> Option<LineSegment> {
        while let Some(sweep) = self.sweep {
            let origin = self.origin(sweep);
            let extent = self.extent(sweep);
            let offset = self.index * self.spacing;
            let position = if sweep.is_backward() {
                origin - offset
            } else {
                origin + offset
            };

            let exhausted = if sweep.is_backward() {
                position < 0.0
            } else {
                position >= extent
            };
            // Far from the origin the step can fall below f64 resolution.
            let stalled = self.previous == Some(position);
            if exhausted || stalled || self.budget == 0 || !position.is_finite() {
                self.finish(sweep);
                continue;
            }

            self.previous = Some(position);
            self.index += 1.0;
            self.budget -= 1;
            if position >= 0.0 && position < extent {
                return Some(self.segment(sweep, position as f32));
            }
        }
        None
    }
}

impl std::iter::FusedIterator for GridLines {}
