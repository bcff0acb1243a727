// SPDX-License-Identifier: MPL-2.0
//! Immutable, validated grid settings.

use crate::config::defaults::{
    DEFAULT_BASE_SCALE, DEFAULT_CORRECTION_MAX_GAP, DEFAULT_CORRECTION_MIN_GAP,
    DEFAULT_MAX_LINE_GAP, DEFAULT_MINOR_DIVISIONS, DEFAULT_MIN_LINE_GAP, UNIT_LINE_SPACING,
};
use crate::error::{Error, Result};

/// Spacing and clamp configuration shared by one [`ViewTransform`] for its
/// whole life.
///
/// Guaranteed by construction:
/// - `base_line_spacing` is finite and positive,
/// - `0 < min_allowed_gap <= max_allowed_gap`, both finite,
/// - the correction band is finite, positive and ordered,
/// - `minor_divisions >= 1`.
///
/// [`ViewTransform`]: super::ViewTransform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSettings {
    base_line_spacing: f32,
    min_allowed_gap: f32,
    max_allowed_gap: f32,
    correction_min_gap: f32,
    correction_max_gap: f32,
    minor_divisions: u32,
}

impl GridSettings {
    /// Creates settings whose major spacing at scale 1 is `40 * base_scale`,
    /// with zoom clamped so the on-screen major gap stays inside
    /// `[min_allowed_gap, max_allowed_gap]`.
    pub fn new(base_scale: f32, min_allowed_gap: f32, max_allowed_gap: f32) -> Result<Self> {
        let base_line_spacing = UNIT_LINE_SPACING * base_scale;
        ensure_positive("base_scale", base_scale)?;
        ensure_positive("base line spacing", base_line_spacing)?;
        ensure_ordered("min_line_gap", min_allowed_gap, "max_line_gap", max_allowed_gap)?;

        Ok(Self {
            base_line_spacing,
            min_allowed_gap,
            max_allowed_gap,
            correction_min_gap: DEFAULT_CORRECTION_MIN_GAP,
            correction_max_gap: DEFAULT_CORRECTION_MAX_GAP,
            minor_divisions: DEFAULT_MINOR_DIVISIONS,
        })
    }

    /// Replaces the band outside of which `major_grid_lines` resets the scale.
    pub fn with_correction_band(mut self, min_gap: f32, max_gap: f32) -> Result<Self> {
        ensure_ordered("correction_min_gap", min_gap, "correction_max_gap", max_gap)?;
        self.correction_min_gap = min_gap;
        self.correction_max_gap = max_gap;
        Ok(self)
    }

    /// Replaces the number of minor cells per major cell.
    pub fn with_minor_divisions(mut self, divisions: u32) -> Result<Self> {
        if divisions == 0 {
            return Err(Error::Settings(
                "minor_divisions must be at least 1".to_string(),
            ));
        }
        self.minor_divisions = divisions;
        Ok(self)
    }

    /// Major line spacing at scale 1.
    #[must_use]
    pub fn base_line_spacing(&self) -> f32 {
        self.base_line_spacing
    }

    #[must_use]
    pub fn min_allowed_gap(&self) -> f32 {
        self.min_allowed_gap
    }

    #[must_use]
    pub fn max_allowed_gap(&self) -> f32 {
        self.max_allowed_gap
    }

    /// Inclusive `(min, max)` band for the on-screen major spacing.
    #[must_use]
    pub fn correction_band(&self) -> (f32, f32) {
        (self.correction_min_gap, self.correction_max_gap)
    }

    #[must_use]
    pub fn minor_divisions(&self) -> u32 {
        self.minor_divisions
    }
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            base_line_spacing: UNIT_LINE_SPACING * DEFAULT_BASE_SCALE,
            min_allowed_gap: DEFAULT_MIN_LINE_GAP,
            max_allowed_gap: DEFAULT_MAX_LINE_GAP,
            correction_min_gap: DEFAULT_CORRECTION_MIN_GAP,
            correction_max_gap: DEFAULT_CORRECTION_MAX_GAP,
            minor_divisions: DEFAULT_MINOR_DIVISIONS,
        }
    }
}

fn ensure_positive(name: &str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::Settings(format!(
            "{name} must be finite and positive, got {value}"
        )))
    }
}

fn ensure_ordered(min_name: &str, min: f32, max_name: &str, max: f32) -> Result<()> {
    ensure_positive(min_name, min)?;
    ensure_positive(max_name, max)?;
    if min > max {
        return Err(Error::Settings(format!(
            "{min_name} ({min}) must not exceed {max_name} ({max})"
        )));
    }
    Ok(())
}
