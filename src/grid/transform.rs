// SPDX-License-Identifier: MPL-2.0
//! View transform state machine.
//!
//! Gestures arrive in screen units and are folded into a scale and a
//! translation. Invalid input (non-finite numbers, degenerate viewports) is
//! ignored and leaves every field untouched.

use super::lines::{GridLevel, GridLines};
use super::settings::GridSettings;
use crate::config::defaults::{CORRECTED_SCALE, MIN_VIEWPORT_AREA};
use iced::{Point, Size, Vector};

/// Scale and translation of one grid view.
///
/// Content coordinates relate to screen coordinates through
/// `content = screen / scale - translation`. Anchored zooming keeps the content
/// point under the anchor fixed.
///
/// Grid lines are laid out around `viewport / 2 + translation`.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewTransform {
    settings: GridSettings,
    scale: f32,
    translation: Vector,
    anchor: Point,
    viewport: Size,
}

impl ViewTransform {
    /// Creates a transform at scale 1 with no translation and an empty
    /// viewport. Zooming is ignored until the first valid [`resize`](Self::resize).
    #[must_use]
    pub fn new(settings: GridSettings) -> Self {
        Self {
            settings,
            scale: 1.0,
            translation: Vector::new(0.0, 0.0),
            anchor: Point::new(0.0, 0.0),
            viewport: Size::new(0.0, 0.0),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    #[must_use]
    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale
    }

    #[must_use]
    pub fn translation(&self) -> Vector {
        self.translation
    }

    /// Screen point of the last accepted zoom gesture.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// On-screen distance between adjacent major lines.
    #[must_use]
    pub fn major_spacing(&self) -> f32 {
        self.settings.base_line_spacing() * self.scale
    }

    /// On-screen distance between adjacent minor lines.
    #[must_use]
    pub fn minor_spacing(&self) -> f32 {
        self.major_spacing() / self.settings.minor_divisions() as f32
    }

    /// Screen point around which the grid is laid out.
    #[must_use]
    pub fn grid_center(&self) -> Point {
        Point::new(
            self.viewport.width / 2.0 + self.translation.x,
            self.viewport.height / 2.0 + self.translation.y,
        )
    }

    // =========================================================================
    // Mutators
    // =========================================================================

    /// Pans by a screen-space drag.
    ///
    /// The translation moves by `delta / scale`, so dragging covers the same
    /// content distance per screen unit at every zoom level.
    pub fn pan(&mut self, delta: Vector) {
        if !is_finite_vector(delta) {
            return;
        }

        let translation = Vector::new(
            self.translation.x + delta.x / self.scale,
            self.translation.y + delta.y / self.scale,
        );
        if !is_finite_vector(translation) {
            return;
        }
        self.translation = translation;
    }

    /// Zooms by `multiplier` around the screen point `anchor`.
    ///
    /// The multiplier is re-derived when needed so the major spacing lands
    /// inside `[min_allowed_gap, max_allowed_gap]`; the translation is then
    /// adjusted for the effective multiplier so the content under `anchor`
    /// stays under `anchor`.
    ///
    /// Ignored when the multiplier is not finite or the viewport is empty.
    pub fn zoom_at(&mut self, multiplier: f32, anchor: Point) {
        if !multiplier.is_finite() {
            return;
        }

        let base = self.settings.base_line_spacing();
        let min_gap = self.settings.min_allowed_gap();
        let max_gap = self.settings.max_allowed_gap();

        let mut multiplier = multiplier;
        if self.scale * multiplier * base < min_gap {
            multiplier = min_gap / (self.scale * base);
        } else if self.scale * multiplier * base > max_gap {
            multiplier = max_gap / (self.scale * base);
        }

        // Where the gesture sits inside the viewport, 0..1 on each axis.
        let proportion_x = anchor.x / self.viewport.width;
        let proportion_y = anchor.y / self.viewport.height;
        if !(proportion_x.is_finite() && proportion_y.is_finite()) {
            return;
        }

        // Content extent shown before and after; the anchor-weighted share of
        // the difference is how far the top-left content point moves.
        let new_scale = self.scale * multiplier;
        let before = Vector::new(
            self.viewport.width / self.scale,
            self.viewport.height / self.scale,
        );
        let after = Vector::new(
            self.viewport.width / new_scale,
            self.viewport.height / new_scale,
        );
        let displaced = Vector::new(
            (after.x - before.x) * proportion_x,
            (after.y - before.y) * proportion_y,
        );
        let translation = Vector::new(
            self.translation.x + displaced.x,
            self.translation.y + displaced.y,
        );

        if !(new_scale.is_finite() && new_scale > 0.0 && is_finite_vector(translation)) {
            return;
        }

        self.translation = translation;
        self.scale = new_scale;
        self.anchor = anchor;
    }

    /// Updates the viewport size.
    ///
    /// Ignored unless both dimensions are finite and the area
    /// `width * height` is at least one square unit. The sign of each
    /// dimension is not checked, so `(-10, -10)` is accepted.
    pub fn resize(&mut self, size: Size) {
        if !(size.width.is_finite() && size.height.is_finite()) {
            return;
        }
        if size.width * size.height < MIN_VIEWPORT_AREA {
            return;
        }
        self.viewport = size;
    }

    /// Restores a scale saved by the host, bypassing the zoom clamp.
    ///
    /// Negative and non-finite values are ignored. A scale of 0 is accepted
    /// and makes both grid producers empty.
    pub fn set_scale(&mut self, scale: f32) {
        if scale.is_finite() && scale >= 0.0 {
            self.scale = scale;
        }
    }

    /// Restores a translation saved by the host. Non-finite values are ignored.
    pub fn set_translation(&mut self, translation: Vector) {
        if is_finite_vector(translation) {
            self.translation = translation;
        }
    }

    // =========================================================================
    // Coordinate Mapping
    // =========================================================================

    /// Maps a screen point to content coordinates.
    #[must_use]
    pub fn screen_to_content(&self, screen: Point) -> Point {
        Point::new(
            screen.x / self.scale - self.translation.x,
            screen.y / self.scale - self.translation.y,
        )
    }

    /// Maps a content point back to screen coordinates.
    #[must_use]
    pub fn content_to_screen(&self, content: Point) -> Point {
        Point::new(
            (content.x + self.translation.x) * self.scale,
            (content.y + self.translation.y) * self.scale,
        )
    }

    // =========================================================================
    // Grid Lines
    // =========================================================================

    /// Resets the scale to 1 when the major spacing has drifted outside the
    /// settings' correction band. Returns whether a reset happened.
    pub fn enforce_major_spacing(&mut self) -> bool {
        let spacing = self.major_spacing();
        let (min_gap, max_gap) = self.settings.correction_band();
        if spacing >= min_gap && spacing <= max_gap {
            return false;
        }

        log::debug!(
            "major spacing {spacing} outside [{min_gap}, {max_gap}], resetting scale {} to {CORRECTED_SCALE}",
            self.scale
        );
        self.scale = CORRECTED_SCALE;
        true
    }

    /// Major grid lines for the current state.
    ///
    /// Side effect: unless the scale is non-positive, runs
    /// [`enforce_major_spacing`](Self::enforce_major_spacing) first, so the
    /// scale may be reset to 1 before the lines are laid out.
    pub fn major_grid_lines(&mut self) -> GridLines {
        if self.scale <= 0.0 {
            return GridLines::empty();
        }
        self.enforce_major_spacing();
        self.grid_lines(GridLevel::Major)
    }

    /// Minor grid lines for the current state. Never mutates.
    #[must_use]
    pub fn minor_grid_lines(&self) -> GridLines {
        self.grid_lines(GridLevel::Minor)
    }

    /// Grid lines at `level` for the current state, without any correction.
    /// Empty when the scale is not positive.
    #[must_use]
    pub fn grid_lines(&self, level: GridLevel) -> GridLines {
        if self.scale <= 0.0 {
            return GridLines::empty();
        }
        let spacing = match level {
            GridLevel::Major => self.major_spacing(),
            GridLevel::Minor => self.minor_spacing(),
        };
        GridLines::new(self.grid_center(), spacing, self.viewport)
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(GridSettings::default())
    }
}

fn is_finite_vector(v: Vector) -> bool {
    v.x.is_finite() && v.y.is_finite()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::LineSegment;
    use crate::test_utils::{assert_abs_diff_eq, assert_relative_eq};

    /// Base spacing 40 with zoom clamped to gaps in [20, 200].
    fn sized_transform(width: f32, height: f32) -> ViewTransform {
        let settings = GridSettings::new(1.0, 20.0, 200.0).expect("valid settings");
        let mut transform = ViewTransform::new(settings);
        transform.resize(Size::new(width, height));
        transform
    }

    fn vertical_positions(lines: GridLines) -> Vec<f32> {
        lines
            .filter(LineSegment::is_vertical)
            .map(|line| line.from.x)
            .collect()
    }

    #[test]
    fn new_transform_starts_at_identity() {
        let transform = ViewTransform::default();
        assert_eq!(transform.scale(), 1.0);
        assert_eq!(transform.translation(), Vector::new(0.0, 0.0));
        assert_eq!(transform.anchor(), Point::new(0.0, 0.0));
        assert_eq!(transform.viewport(), Size::new(0.0, 0.0));
    }

    // -------------------------------------------------------------------------
    // pan
    // -------------------------------------------------------------------------

    #[test]
    fn pan_divides_delta_by_scale() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(2.0);
        transform.set_translation(Vector::new(3.0, -7.0));

        transform.pan(Vector::new(10.0, -6.0));

        assert_eq!(transform.translation(), Vector::new(8.0, -10.0));
    }

    #[test]
    fn pan_ignores_viewport_size() {
        let mut small = sized_transform(10.0, 10.0);
        let mut large = sized_transform(4000.0, 3000.0);
        small.pan(Vector::new(12.0, 4.0));
        large.pan(Vector::new(12.0, 4.0));
        assert_eq!(small.translation(), large.translation());
    }

    #[test]
    fn pan_rejects_non_finite_delta() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.pan(Vector::new(5.0, 5.0));
        let before = transform.clone();

        transform.pan(Vector::new(f32::NAN, 1.0));
        transform.pan(Vector::new(1.0, f32::INFINITY));
        transform.pan(Vector::new(f32::NEG_INFINITY, f32::NAN));

        assert_eq!(transform, before);
    }

    #[test]
    fn pan_at_zero_scale_is_ignored() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(0.0);
        transform.pan(Vector::new(5.0, 0.0));
        assert_eq!(transform.translation(), Vector::new(0.0, 0.0));
    }

    // -------------------------------------------------------------------------
    // zoom_at
    // -------------------------------------------------------------------------

    #[test]
    fn zoom_keeps_content_under_anchor_fixed() {
        let cases = [
            (1.5, Point::new(100.0, 50.0)),
            (0.8, Point::new(390.0, 10.0)),
            (2.0, Point::new(0.0, 300.0)),
            (1.1, Point::new(200.0, 150.0)),
        ];

        for (multiplier, anchor) in cases {
            let mut transform = sized_transform(400.0, 300.0);
            transform.set_translation(Vector::new(12.5, -30.0));
            let before = transform.screen_to_content(anchor);

            transform.zoom_at(multiplier, anchor);

            assert_relative_eq!(transform.scale(), multiplier);
            let after = transform.screen_to_content(anchor);
            assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-3);
            assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-3);
            assert_eq!(transform.anchor(), anchor);
        }
    }

    #[test]
    fn repeated_zoom_keeps_anchor_fixed() {
        let mut transform = sized_transform(800.0, 600.0);
        let anchor = Point::new(613.0, 77.0);
        let before = transform.screen_to_content(anchor);

        for multiplier in [1.2, 1.2, 0.7, 1.05, 0.9] {
            transform.zoom_at(multiplier, anchor);
        }

        let after = transform.screen_to_content(anchor);
        assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-2);
        assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-2);
    }

    #[test]
    fn zoom_in_past_max_gap_is_clamped() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.zoom_at(100.0, Point::new(120.0, 80.0));

        assert_relative_eq!(transform.major_spacing(), 200.0, max_relative = 1e-6);
        assert_relative_eq!(transform.scale(), 5.0, max_relative = 1e-6);
    }

    #[test]
    fn zoom_out_past_min_gap_is_clamped() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.zoom_at(0.01, Point::new(120.0, 80.0));

        assert_relative_eq!(transform.major_spacing(), 20.0, max_relative = 1e-6);
    }

    #[test]
    fn clamped_zoom_keeps_anchor_fixed_for_effective_multiplier() {
        let mut transform = sized_transform(400.0, 300.0);
        let anchor = Point::new(300.0, 40.0);
        let before = transform.screen_to_content(anchor);

        transform.zoom_at(1000.0, anchor);

        let after = transform.screen_to_content(anchor);
        assert_abs_diff_eq!(before.x, after.x, epsilon = 1e-3);
        assert_abs_diff_eq!(before.y, after.y, epsilon = 1e-3);
    }

    #[test]
    fn non_positive_multiplier_clamps_to_min_gap() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.zoom_at(-3.0, Point::new(10.0, 10.0));
        assert_relative_eq!(transform.major_spacing(), 20.0, max_relative = 1e-6);
    }

    #[test]
    fn zoom_rejects_non_finite_multiplier() {
        let mut transform = sized_transform(400.0, 300.0);
        let before = transform.clone();

        transform.zoom_at(f32::NAN, Point::new(10.0, 10.0));
        transform.zoom_at(f32::INFINITY, Point::new(10.0, 10.0));

        assert_eq!(transform, before);
    }

    #[test]
    fn zoom_without_viewport_is_ignored_entirely() {
        let mut transform = ViewTransform::new(
            GridSettings::new(1.0, 20.0, 200.0).expect("valid settings"),
        );
        let before = transform.clone();

        // Would also clamp if it got that far.
        transform.zoom_at(100.0, Point::new(10.0, 10.0));

        assert_eq!(transform, before);
    }

    #[test]
    fn zoom_rejects_non_finite_anchor() {
        let mut transform = sized_transform(400.0, 300.0);
        let before = transform.clone();

        transform.zoom_at(1.5, Point::new(f32::NAN, 10.0));
        transform.zoom_at(1.5, Point::new(10.0, f32::INFINITY));

        assert_eq!(transform, before);
    }

    #[test]
    fn zoom_at_zero_scale_is_ignored() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(0.0);
        let before = transform.clone();

        transform.zoom_at(1.5, Point::new(10.0, 10.0));

        assert_eq!(transform, before);
    }

    // -------------------------------------------------------------------------
    // resize
    // -------------------------------------------------------------------------

    #[test]
    fn resize_accepts_valid_sizes() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.resize(Size::new(1.0, 1.0));
        assert_eq!(transform.viewport(), Size::new(1.0, 1.0));
    }

    #[test]
    fn resize_rejects_degenerate_sizes() {
        let mut transform = sized_transform(400.0, 300.0);

        transform.resize(Size::new(0.0, 0.0));
        transform.resize(Size::new(0.5, 1.5));
        transform.resize(Size::new(1000.0, 0.0));
        transform.resize(Size::new(-10.0, 0.05));

        assert_eq!(transform.viewport(), Size::new(400.0, 300.0));
    }

    #[test]
    fn resize_checks_area_not_sign() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.resize(Size::new(-10.0, -10.0));
        assert_eq!(transform.viewport(), Size::new(-10.0, -10.0));

        assert_eq!(transform.major_grid_lines().count(), 0);
        assert_eq!(transform.minor_grid_lines().count(), 0);
    }

    #[test]
    fn resize_rejects_non_finite_sizes() {
        let mut transform = sized_transform(400.0, 300.0);
        let before = transform.clone();

        transform.resize(Size::new(f32::NAN, 100.0));
        transform.resize(Size::new(100.0, f32::INFINITY));

        assert_eq!(transform, before);
    }

    // -------------------------------------------------------------------------
    // setters and mapping
    // -------------------------------------------------------------------------

    #[test]
    fn setters_ignore_invalid_values() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(-1.0);
        transform.set_scale(f32::NAN);
        transform.set_translation(Vector::new(f32::INFINITY, 0.0));

        assert_eq!(transform.scale(), 1.0);
        assert_eq!(transform.translation(), Vector::new(0.0, 0.0));
    }

    #[test]
    fn content_mapping_round_trips() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(2.5);
        transform.set_translation(Vector::new(-14.0, 6.0));

        let screen = Point::new(123.0, 45.0);
        let back = transform.content_to_screen(transform.screen_to_content(screen));

        assert_abs_diff_eq!(back.x, screen.x, epsilon = 1e-3);
        assert_abs_diff_eq!(back.y, screen.y, epsilon = 1e-3);
    }

    // -------------------------------------------------------------------------
    // grid lines
    // -------------------------------------------------------------------------

    #[test]
    fn major_lines_at_identity_match_expected_positions() {
        let mut transform = sized_transform(400.0, 300.0);
        let positions = vertical_positions(transform.major_grid_lines());

        assert_eq!(
            positions,
            vec![200.0, 160.0, 120.0, 80.0, 40.0, 0.0, 240.0, 280.0, 320.0, 360.0]
        );
        assert_eq!(transform.major_grid_lines().count(), 17);
    }

    #[test]
    fn translation_shifts_the_grid_center() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_translation(Vector::new(10.0, -20.0));

        assert_eq!(transform.grid_center(), Point::new(210.0, 130.0));
        let positions = vertical_positions(transform.major_grid_lines());
        assert_eq!(positions.first(), Some(&210.0));
        assert!(positions.contains(&10.0));
        assert!(positions.contains(&370.0));
    }

    #[test]
    fn minor_lines_use_fifth_of_major_spacing() {
        let transform = sized_transform(400.0, 300.0);
        let lines = transform.minor_grid_lines();

        assert_abs_diff_eq!(lines.spacing(), 8.0);
        // 26 positions from 200 down to 0, then 24 from 208 up to 392.
        assert_eq!(vertical_positions(lines).len(), 50);
    }

    #[test]
    fn zero_scale_produces_no_lines() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(0.0);

        assert_eq!(transform.major_grid_lines().count(), 0);
        assert_eq!(transform.minor_grid_lines().count(), 0);
        assert_eq!(transform.scale(), 0.0);
    }

    #[test]
    fn major_lines_reset_scale_outside_correction_band() {
        let settings = GridSettings::new(1.0, 20.0, 200.0)
            .and_then(|s| s.with_correction_band(80.0, 160.0))
            .expect("valid settings");
        let mut transform = ViewTransform::new(settings);
        transform.resize(Size::new(400.0, 300.0));
        transform.set_scale(4.5);

        let lines = transform.major_grid_lines();

        assert_eq!(transform.scale(), CORRECTED_SCALE);
        assert_abs_diff_eq!(lines.spacing(), 40.0);
    }

    #[test]
    fn major_lines_keep_scale_inside_correction_band() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(3.0);

        let lines = transform.major_grid_lines();

        assert_eq!(transform.scale(), 3.0);
        assert_abs_diff_eq!(lines.spacing(), 120.0);
    }

    #[test]
    fn minor_and_pure_producers_never_correct() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(4.5);

        let _ = transform.minor_grid_lines();
        let _ = transform.grid_lines(GridLevel::Major);

        assert_eq!(transform.scale(), 4.5);
    }

    #[test]
    fn enforce_reports_whether_it_reset() {
        let mut transform = sized_transform(400.0, 300.0);
        transform.set_scale(2.0);
        assert!(!transform.enforce_major_spacing());

        transform.set_scale(0.5);
        assert!(transform.enforce_major_spacing());
        assert_eq!(transform.scale(), 1.0);
    }
}
