// SPDX-License-Identifier: MPL-2.0
//! Infinite grid core: view transform, anchored zoom and grid line generation.
//!
//! All coordinates follow [`SCREEN_CONVENTION`]: origin at the top-left of the
//! viewport, x grows to the right and y grows downward. The center-offset
//! math of grid generation and the anchor proportion of zooming rely on it.

pub mod lines;
pub mod settings;
pub mod transform;

pub use lines::{GridLevel, GridLines, LineSegment};
pub use settings::GridSettings;
pub use transform::ViewTransform;

/// Orientation of the screen-space coordinates consumed and produced here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenConvention {
    /// Origin at the top-left corner, x to the right, y downward.
    TopLeftYDown,
}

/// The only convention this module supports.
pub const SCREEN_CONVENTION: ScreenConvention = ScreenConvention::TopLeftYDown;
