// SPDX-License-Identifier: MPL-2.0
//! iced integration for the grid core.
//!
//! - [`grid_overlay`] - Canvas program drawing grid lines and publishing gestures

pub mod grid_overlay;
