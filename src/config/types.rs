//! Configuration type definitions.

use super::enums::ExportCompression;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Drawing tool defaults.
///
/// Applied when a new highlight session starts. The tool can change them at
/// runtime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DrawingConfig {
    /// Initial highlighter color as a CSS-style hex or `rgb()`/`rgba()` string
    #[serde(default = "default_color")]
    pub default_color: String,

    /// Highlighter width in pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_brush_size")]
    pub brush_size: f64,

    /// Eraser width in pixels (valid range: 1.0 - 400.0)
    #[serde(default = "default_eraser_size")]
    pub eraser_size: f64,

    /// Stroke opacity used while drawing (valid range: 0.0 - 1.0)
    #[serde(default = "default_opacity")]
    pub opacity: f64,
}

impl Default for DrawingConfig {
    fn default() -> Self {
        Self {
            default_color: default_color(),
            brush_size: default_brush_size(),
            eraser_size: default_eraser_size(),
            opacity: default_opacity(),
        }
    }
}

/// Region extraction tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExtractionConfig {
    /// Spacing of the seed grid used to find regions (valid range: 1 - 8).
    /// Larger values are faster but can miss components thinner than the stride.
    #[serde(default = "default_scan_stride")]
    pub scan_stride: u32,

    /// Components with fewer pixels are discarded as noise
    #[serde(default = "default_min_region_pixels")]
    pub min_region_pixels: usize,

    /// Maximum deviation in pixels when simplifying highlight strokes
    #[serde(default = "default_simplify_tolerance")]
    pub simplify_tolerance: f64,

    /// Strokes no longer than this many pixels are dropped before export
    #[serde(default = "default_min_stroke_length")]
    pub min_stroke_length: f64,

    /// Antialias edges when rasterizing for extraction. Off gives crisp,
    /// reproducible masks.
    #[serde(default)]
    pub antialias: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            scan_stride: default_scan_stride(),
            min_region_pixels: default_min_region_pixels(),
            simplify_tolerance: default_simplify_tolerance(),
            min_stroke_length: default_min_stroke_length(),
            antialias: false,
        }
    }
}

/// Export encoding settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Compression mode: "on", "off" or "auto"
    #[serde(default)]
    pub compression: ExportCompression,

    /// Payload size in bytes at which "auto" starts compressing
    #[serde(default = "default_auto_compress_threshold_bytes")]
    pub auto_compress_threshold_bytes: u64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            compression: ExportCompression::default(),
            auto_compress_threshold_bytes: default_auto_compress_threshold_bytes(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

pub(super) fn default_color() -> String {
    "#ffff00".to_string()
}

fn default_brush_size() -> f64 {
    20.0
}

fn default_eraser_size() -> f64 {
    30.0
}

fn default_opacity() -> f64 {
    0.5
}

fn default_scan_stride() -> u32 {
    crate::extract::DEFAULT_SCAN_STRIDE
}

fn default_min_region_pixels() -> usize {
    crate::extract::DEFAULT_MIN_REGION_PIXELS
}

fn default_simplify_tolerance() -> f64 {
    2.0
}

fn default_min_stroke_length() -> f64 {
    5.0
}

fn default_auto_compress_threshold_bytes() -> u64 {
    crate::export::DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES
}
