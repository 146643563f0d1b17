//! Configuration file support for highlighter.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/highlighter/config.toml`. Settings include drawing defaults,
//! region extraction tuning and export encoding.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ExportCompression;
pub use types::{DrawingConfig, ExportConfig, ExtractionConfig};

use crate::draw::Color;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "#ff8800"
/// brush_size = 24.0
///
/// [extraction]
/// scan_stride = 1
///
/// [export]
/// compression = "auto"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Drawing tool defaults (color, sizes, opacity)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Region extraction tuning
    #[serde(default)]
    pub extraction: ExtractionConfig,

    /// Export encoding
    #[serde(default)]
    pub export: ExportConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `brush_size`: 1.0 - 200.0
    /// - `eraser_size`: 1.0 - 400.0
    /// - `opacity`: 0.0 - 1.0
    /// - `scan_stride`: 1 - 8
    /// - `min_region_pixels`: at least 1
    /// - `simplify_tolerance`, `min_stroke_length`: at least 0.0
    pub fn validate_and_clamp(&mut self) {
        if Color::parse(&self.drawing.default_color).is_err() {
            log::warn!(
                "Invalid default_color '{}', falling back to '{}'",
                self.drawing.default_color,
                types::default_color()
            );
            self.drawing.default_color = types::default_color();
        }

        if !(1.0..=200.0).contains(&self.drawing.brush_size) {
            log::warn!(
                "Invalid brush_size {:.1}, clamping to 1.0-200.0 range",
                self.drawing.brush_size
            );
            self.drawing.brush_size = clamp_or(self.drawing.brush_size, 1.0, 200.0);
        }

        if !(1.0..=400.0).contains(&self.drawing.eraser_size) {
            log::warn!(
                "Invalid eraser_size {:.1}, clamping to 1.0-400.0 range",
                self.drawing.eraser_size
            );
            self.drawing.eraser_size = clamp_or(self.drawing.eraser_size, 1.0, 400.0);
        }

        if !(0.0..=1.0).contains(&self.drawing.opacity) {
            log::warn!(
                "Invalid opacity {:.3}, clamping to 0.0-1.0 range",
                self.drawing.opacity
            );
            self.drawing.opacity = clamp_or(self.drawing.opacity, 0.0, 1.0);
        }

        if !(1..=8).contains(&self.extraction.scan_stride) {
            log::warn!(
                "Invalid scan_stride {}, clamping to 1-8 range",
                self.extraction.scan_stride
            );
            self.extraction.scan_stride = self.extraction.scan_stride.clamp(1, 8);
        }

        if self.extraction.min_region_pixels == 0 {
            log::warn!("min_region_pixels must be at least 1, using 1");
            self.extraction.min_region_pixels = 1;
        }

        let value = self.extraction.simplify_tolerance;
        if value.is_nan() || value < 0.0 {
            log::warn!(
                "Invalid simplify_tolerance {:.2}, using 0.0",
                self.extraction.simplify_tolerance
            );
            self.extraction.simplify_tolerance = 0.0;
        }

        let value = self.extraction.min_stroke_length;
        if value.is_nan() || value < 0.0 {
            log::warn!(
                "Invalid min_stroke_length {:.2}, using 0.0",
                self.extraction.min_stroke_length
            );
            self.extraction.min_stroke_length = 0.0;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/highlighter/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("highlighter");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default location, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads configuration from `config_path`, or returns defaults if it does not exist.
    ///
    /// All loaded values are validated and clamped to acceptable ranges.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the current configuration to `config_path`.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes `config.example.toml` to `config_path`.
    ///
    /// # Errors
    /// Returns an error if a config file already exists at the target path or
    /// it cannot be written.
    pub fn create_default_file(config_path: &Path) -> Result<()> {
        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_or(value: f64, min: f64, max: f64) -> f64 {
    if value.is_nan() {
        min
    } else {
        value.clamp(min, max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.export.compression, ExportCompression::On);
        assert_eq!(config.extraction.scan_stride, 2);
        assert_eq!(config.extraction.min_region_pixels, 11);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[export]\ncompression = \"auto\"\n").unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.export.compression, ExportCompression::Auto);
        assert_eq!(config.drawing, DrawingConfig::default());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.drawing.brush_size = 900.0;
        config.drawing.opacity = -1.0;
        config.drawing.default_color = "sparkly".into();
        config.extraction.scan_stride = 0;
        config.extraction.min_region_pixels = 0;
        config.extraction.simplify_tolerance = f64::NAN;
        config.validate_and_clamp();
        assert_eq!(config.drawing.brush_size, 200.0);
        assert_eq!(config.drawing.opacity, 0.0);
        assert_eq!(config.drawing.default_color, "#ffff00");
        assert_eq!(config.extraction.scan_stride, 1);
        assert_eq!(config.extraction.min_region_pixels, 1);
        assert_eq!(config.extraction.simplify_tolerance, 0.0);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[drawing\nbrush_size = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_file_parses_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(Config::create_default_file(&path).is_err());
        assert_eq!(Config::load_from(&path).unwrap(), Config::default());
    }

    #[test]
    fn save_round_trips() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.drawing.default_color = "#00ff00".into();
        config.export.compression = ExportCompression::Off;
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let props = &schema["properties"];
        assert!(props.get("drawing").is_some());
        assert!(props.get("extraction").is_some());
        assert!(props.get("export").is_some());
    }
}
