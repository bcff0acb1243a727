// SPDX-License-Identifier: MPL-2.0
//! `infinite_grid` renders a pannable, zoomable grid overlay for canvas surfaces.
//!
//! The [`grid`] module holds the host-independent core: a [`ViewTransform`]
//! folding pan and anchored zoom gestures into a clamped scale and
//! translation, and lazy major/minor [`GridLines`] derived from it. The
//! [`ui`] and [`app`] modules host that core in an iced canvas.

pub mod app;
pub mod config;
pub mod error;
pub mod grid;
pub mod paths;
pub mod ui;

#[cfg(test)]
mod test_utils;

pub use grid::{GridLevel, GridLines, GridSettings, LineSegment, ViewTransform};
