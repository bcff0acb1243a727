// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! # Categories
//!
//! - **Spacing**: Base line spacing and the zoom clamp on major line gaps
//! - **Correction**: Band the major spacing is corrected back into
//! - **Viewport**: Sanity threshold for accepted viewport sizes
//! - **Display**: Demo host rendering and wheel input

// ==========================================================================
// Spacing Defaults
// ==========================================================================

/// Major line spacing, in screen units, at `base_scale = 1` and zoom scale 1.
pub const UNIT_LINE_SPACING: f32 = 40.0;

/// Default multiplier applied to [`UNIT_LINE_SPACING`].
pub const DEFAULT_BASE_SCALE: f32 = 2.0;

/// Default smallest on-screen gap between adjacent major lines.
pub const DEFAULT_MIN_LINE_GAP: f32 = 80.0;

/// Default largest on-screen gap between adjacent major lines.
pub const DEFAULT_MAX_LINE_GAP: f32 = 160.0;

/// Default number of minor cells per major cell.
pub const DEFAULT_MINOR_DIVISIONS: u32 = 5;

// ==========================================================================
// Correction Defaults
// ==========================================================================

/// Lower edge of the major-spacing correction band.
pub const DEFAULT_CORRECTION_MIN_GAP: f32 = 80.0;

/// Upper edge of the major-spacing correction band.
pub const DEFAULT_CORRECTION_MAX_GAP: f32 = 160.0;

/// Scale restored when the major spacing leaves the correction band.
pub const CORRECTED_SCALE: f32 = 1.0;

// ==========================================================================
// Viewport Defaults
// ==========================================================================

/// Smallest viewport area (width * height) accepted by `resize`.
pub const MIN_VIEWPORT_AREA: f32 = 1.0;

// ==========================================================================
// Display Defaults
// ==========================================================================

/// Whether the minor grid is drawn by default.
pub const DEFAULT_SHOW_MINOR_GRID: bool = true;

/// Zoom multiplier applied per mouse-wheel line.
pub const DEFAULT_WHEEL_ZOOM_FACTOR: f32 = 1.1;

/// Smallest accepted wheel zoom factor (must stay above 1 to zoom at all).
pub const MIN_WHEEL_ZOOM_FACTOR: f32 = 1.01;

/// Largest accepted wheel zoom factor.
pub const MAX_WHEEL_ZOOM_FACTOR: f32 = 2.0;

/// Pixel-based scroll deltas are divided by this to get wheel lines.
pub const PIXELS_PER_WHEEL_LINE: f32 = 120.0;

const _: () = {
    assert!(DEFAULT_MIN_LINE_GAP <= DEFAULT_MAX_LINE_GAP);
    assert!(DEFAULT_CORRECTION_MIN_GAP <= DEFAULT_CORRECTION_MAX_GAP);
    assert!(DEFAULT_MINOR_DIVISIONS > 0);
    assert!(MIN_WHEEL_ZOOM_FACTOR <= DEFAULT_WHEEL_ZOOM_FACTOR);
    assert!(DEFAULT_WHEEL_ZOOM_FACTOR <= MAX_WHEEL_ZOOM_FACTOR);
};
