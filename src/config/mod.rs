// SPDX-License-Identifier: MPL-2.0
//! This module handles the grid configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! - `[grid]` - Line spacing, zoom clamp and correction band
//! - `[display]` - Demo host rendering and wheel input
//!
//! Every field is optional; missing values fall back to [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use infinite_grid::config::{self, Config};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Modify a setting
//! config.grid.base_scale = Some(1.5);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::error::{Error, Result};
use crate::grid::GridSettings;
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "settings.toml";

/// Warning key returned by [`load`] when an existing file cannot be parsed.
pub const CONFIG_LOAD_ERROR_KEY: &str = "config-load-error";

// =============================================================================
// Section Structs
// =============================================================================

/// Grid geometry and zoom limits.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GridConfig {
    /// Multiplier on the 40-unit major spacing at zoom scale 1.
    #[serde(default = "default_base_scale", skip_serializing_if = "Option::is_none")]
    pub base_scale: Option<f32>,

    /// Smallest on-screen gap between major lines reachable by zooming.
    #[serde(default = "default_min_line_gap", skip_serializing_if = "Option::is_none")]
    pub min_line_gap: Option<f32>,

    /// Largest on-screen gap between major lines reachable by zooming.
    #[serde(default = "default_max_line_gap", skip_serializing_if = "Option::is_none")]
    pub max_line_gap: Option<f32>,

    /// Lower edge of the band outside of which the major grid resets the scale.
    #[serde(
        default = "default_correction_min_gap",
        skip_serializing_if = "Option::is_none"
    )]
    pub correction_min_gap: Option<f32>,

    /// Upper edge of the band outside of which the major grid resets the scale.
    #[serde(
        default = "default_correction_max_gap",
        skip_serializing_if = "Option::is_none"
    )]
    pub correction_max_gap: Option<f32>,

    /// Minor cells per major cell.
    #[serde(
        default = "default_minor_divisions",
        skip_serializing_if = "Option::is_none"
    )]
    pub minor_divisions: Option<u32>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            base_scale: default_base_scale(),
            min_line_gap: default_min_line_gap(),
            max_line_gap: default_max_line_gap(),
            correction_min_gap: default_correction_min_gap(),
            correction_max_gap: default_correction_max_gap(),
            minor_divisions: default_minor_divisions(),
        }
    }
}

impl GridConfig {
    /// Validates this section into immutable [`GridSettings`].
    pub fn to_settings(&self) -> Result<GridSettings> {
        let settings = GridSettings::new(
            self.base_scale.unwrap_or(DEFAULT_BASE_SCALE),
            self.min_line_gap.unwrap_or(DEFAULT_MIN_LINE_GAP),
            self.max_line_gap.unwrap_or(DEFAULT_MAX_LINE_GAP),
        )?
        .with_correction_band(
            self.correction_min_gap.unwrap_or(DEFAULT_CORRECTION_MIN_GAP),
            self.correction_max_gap.unwrap_or(DEFAULT_CORRECTION_MAX_GAP),
        )?
        .with_minor_divisions(self.minor_divisions.unwrap_or(DEFAULT_MINOR_DIVISIONS))?;
        Ok(settings)
    }
}

/// Demo host display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Whether the minor grid is drawn.
    #[serde(
        default = "default_show_minor_grid",
        skip_serializing_if = "Option::is_none"
    )]
    pub show_minor_grid: Option<bool>,

    /// Zoom multiplier per mouse-wheel line.
    #[serde(
        default = "default_wheel_zoom_factor",
        skip_serializing_if = "Option::is_none"
    )]
    pub wheel_zoom_factor: Option<f32>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_minor_grid: default_show_minor_grid(),
            wheel_zoom_factor: default_wheel_zoom_factor(),
        }
    }
}

impl DisplayConfig {
    /// Whether the minor grid is drawn, defaulting to on.
    #[must_use]
    pub fn show_minor_grid(&self) -> bool {
        self.show_minor_grid.unwrap_or(DEFAULT_SHOW_MINOR_GRID)
    }

    /// Wheel zoom factor clamped to the supported range.
    #[must_use]
    pub fn wheel_zoom_factor(&self) -> f32 {
        match self.wheel_zoom_factor {
            Some(factor) if factor.is_finite() => {
                factor.clamp(MIN_WHEEL_ZOOM_FACTOR, MAX_WHEEL_ZOOM_FACTOR)
            }
            _ => DEFAULT_WHEEL_ZOOM_FACTOR,
        }
    }
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Grid configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// Grid geometry and zoom limits.
    #[serde(default)]
    pub grid: GridConfig,

    /// Demo host display settings.
    #[serde(default)]
    pub display: DisplayConfig,
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_base_scale() -> Option<f32> {
    Some(DEFAULT_BASE_SCALE)
}

fn default_min_line_gap() -> Option<f32> {
    Some(DEFAULT_MIN_LINE_GAP)
}

fn default_max_line_gap() -> Option<f32> {
    Some(DEFAULT_MAX_LINE_GAP)
}

fn default_correction_min_gap() -> Option<f32> {
    Some(DEFAULT_CORRECTION_MIN_GAP)
}

fn default_correction_max_gap() -> Option<f32> {
    Some(DEFAULT_CORRECTION_MAX_GAP)
}

fn default_minor_divisions() -> Option<u32> {
    Some(DEFAULT_MINOR_DIVISIONS)
}

fn default_show_minor_grid() -> Option<bool> {
    Some(DEFAULT_SHOW_MINOR_GRID)
}

fn default_wheel_zoom_factor() -> Option<f32> {
    Some(DEFAULT_WHEEL_ZOOM_FACTOR)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    log::warn!("failed to load {}: {err}", path.display());
                    return (Config::default(), Some(CONFIG_LOAD_ERROR_KEY.to_string()));
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to the default path.
pub fn save(config: &Config) -> Result<()> {
    save_with_override(config, None)
}

/// Saves the configuration to a custom directory.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================
