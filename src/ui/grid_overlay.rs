// SPDX-License-Identifier: MPL-2.0
//! Canvas program that strokes grid lines and turns mouse input into gestures.
//!
//! The overlay only borrows precomputed segments; the owner of the
//! [`ViewTransform`](crate::grid::ViewTransform) applies the published
//! [`Gesture`]s and regenerates the lines.

use crate::config::defaults::PIXELS_PER_WHEEL_LINE;
use crate::grid::LineSegment;
use iced::widget::canvas::{self, Frame, Path, Stroke};
use iced::{mouse, Color, Element, Length, Point, Rectangle, Size, Theme, Vector};

const MINOR_LINE_WIDTH: f32 = 1.0;
const MAJOR_LINE_WIDTH: f32 = 1.5;
const MINOR_LINE_COLOR: Color = Color {
    r: 0.55,
    g: 0.55,
    b: 0.6,
    a: 0.25,
};
const MAJOR_LINE_COLOR: Color = Color {
    r: 0.55,
    g: 0.55,
    b: 0.6,
    a: 0.6,
};

/// Gesture published by the overlay, in canvas-local screen units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Left-button drag since the previous cursor position.
    Pan(Vector),
    /// Wheel zoom centered on the cursor.
    Zoom { multiplier: f32, anchor: Point },
    /// Canvas bounds differ from the viewport the lines were built for.
    Resize(Size),
}

/// Per-canvas interaction state kept by iced between events.
#[derive(Debug, Clone, Copy, Default)]
pub struct Interaction {
    drag_origin: Option<Point>,
    // Bounds last published as a resize, until the viewport catches up.
    pending_resize: Option<Size>,
}

impl Interaction {
    /// Returns true while the left button drags the grid.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.drag_origin.is_some()
    }
}

/// Canvas program drawing one frame of grid lines.
#[derive(Debug, Clone, Copy)]
pub struct GridOverlay<'a> {
    major: &'a [LineSegment],
    minor: &'a [LineSegment],
    viewport: Size,
    wheel_zoom_factor: f32,
}

impl<'a> GridOverlay<'a> {
    /// Creates an overlay for lines generated against `viewport`.
    #[must_use]
    pub fn new(
        major: &'a [LineSegment],
        minor: &'a [LineSegment],
        viewport: Size,
        wheel_zoom_factor: f32,
    ) -> Self {
        Self {
            major,
            minor,
            viewport,
            wheel_zoom_factor,
        }
    }

    fn interpret(
        &self,
        state: &mut Interaction,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Gesture> {
        if let Some(gesture) = self.gesture(state, event, bounds, cursor) {
            return Some(gesture);
        }

        let size = bounds.size();
        if size == self.viewport {
            state.pending_resize = None;
            return None;
        }
        // A size the transform rejected stays pending; publish it only once.
        if state.pending_resize == Some(size) {
            return None;
        }
        state.pending_resize = Some(size);
        Some(Gesture::Resize(size))
    }

    fn gesture(
        &self,
        state: &mut Interaction,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Gesture> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                state.drag_origin = cursor.position_in(bounds);
                None
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let origin = state.drag_origin?;
                let absolute = cursor.position()?;
                // Local to the canvas, even once the cursor leaves its bounds.
                let position = Point::new(absolute.x - bounds.x, absolute.y - bounds.y);
                state.drag_origin = Some(position);
                Some(Gesture::Pan(position - origin))
            }
            iced::Event::Mouse(mouse::Event::ButtonReleased(mouse::Button::Left)) => {
                state.drag_origin = None;
                None
            }
            iced::Event::Mouse(mouse::Event::CursorLeft) => {
                state.drag_origin = None;
                None
            }
            iced::Event::Mouse(mouse::Event::WheelScrolled { delta }) => {
                let anchor = cursor.position_in(bounds)?;
                let lines = scroll_lines(delta);
                if lines.abs() < f32::EPSILON {
                    return None;
                }
                Some(Gesture::Zoom {
                    multiplier: self.wheel_zoom_factor.powf(lines),
                    anchor,
                })
            }
            _ => None,
        }
    }
}

impl canvas::Program<Gesture> for GridOverlay<'_> {
    type State = Interaction;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<iced::widget::Action<Gesture>> {
        use iced::widget::Action;

        match self.interpret(state, event, bounds, cursor)? {
            gesture @ Gesture::Resize(_) => Some(Action::publish(gesture)),
            gesture => Some(Action::publish(gesture).and_capture()),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        stroke_lines(&mut frame, self.minor, MINOR_LINE_WIDTH, MINOR_LINE_COLOR);
        stroke_lines(&mut frame, self.major, MAJOR_LINE_WIDTH, MAJOR_LINE_COLOR);

        vec![frame.into_geometry()]
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.is_dragging() {
            mouse::Interaction::Grabbing
        } else if cursor.is_over(bounds) {
            mouse::Interaction::Grab
        } else {
            mouse::Interaction::default()
        }
    }
}

fn stroke_lines(frame: &mut Frame, lines: &[LineSegment], width: f32, color: Color) {
    for line in lines {
        frame.stroke(
            &Path::line(line.from, line.to),
            Stroke::default().with_width(width).with_color(color),
        );
    }
}

/// Normalizes mouse wheel units (lines vs. pixels) into wheel lines so zooming
/// feels consistent across platforms.
fn scroll_lines(delta: &mouse::ScrollDelta) -> f32 {
    match delta {
        mouse::ScrollDelta::Lines { y, .. } => *y,
        mouse::ScrollDelta::Pixels { y, .. } => *y / PIXELS_PER_WHEEL_LINE,
    }
}

/// Canvas element filling all available space with the grid overlay.
pub fn view<'a>(
    major: &'a [LineSegment],
    minor: &'a [LineSegment],
    viewport: Size,
    wheel_zoom_factor: f32,
) -> Element<'a, Gesture> {
    canvas::Canvas::new(GridOverlay::new(major, minor, viewport, wheel_zoom_factor))
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}
