//! Region types: connected same-color areas stored as a bounding box plus
//! an RLE mask.
//!
//! Two coordinate spaces exist:
//! - [`Region`] uses integer pixel bounds and is what extraction produces.
//! - [`RegionRecord`] uses fractional bounds (0.0-1.0 of the canvas size) and
//!   is what the export format stores.

use serde::{Deserialize, Serialize};

/// Opacity assigned to every extracted region.
pub const REGION_OPACITY: f64 = 0.5;

/// Axis-aligned box in whole pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelBounds {
    /// Inclusive min/max corners to a box.
    pub fn from_min_max(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Self {
        Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        }
    }

    /// Whether the box is no larger than a `width × height` canvas and starts on it.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.x <= width && self.y <= height && self.width <= width && self.height <= height
    }

    /// Converts to fractions of a `width × height` canvas.
    pub fn to_fractions(&self, width: u32, height: u32) -> FractionBounds {
        let fx = |v: u32| if width == 0 { 0.0 } else { v as f64 / width as f64 };
        let fy = |v: u32| if height == 0 { 0.0 } else { v as f64 / height as f64 };
        FractionBounds {
            x: fx(self.x),
            y: fy(self.y),
            width: fx(self.width),
            height: fy(self.height),
        }
    }
}

/// Axis-aligned box as fractions of the canvas size.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FractionBounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl FractionBounds {
    /// Scales to a `width × height` canvas, rounding to whole pixels.
    pub fn to_pixels(&self, width: u32, height: u32) -> PixelBounds {
        let sx = |v: f64| (v * width as f64).round() as u32;
        let sy = |v: f64| (v * height as f64).round() as u32;
        PixelBounds {
            x: sx(self.x),
            y: sy(self.y),
            width: sx(self.width),
            height: sy(self.height),
        }
    }
}

/// A connected painted area in pixel space.
#[derive(Clone, Debug, PartialEq)]
pub struct Region {
    pub color: String,
    pub opacity: f64,
    /// Tight box around every painted pixel
    pub bounds: PixelBounds,
    /// RLE mask over `bounds`
    pub mask: String,
    /// Absolute painted pixel positions, when known
    pub pixels: Option<Vec<(u32, u32)>>,
}

impl Region {
    /// Converts to the fractional export representation. Pixel lists are dropped.
    pub fn to_record(&self, canvas_width: u32, canvas_height: u32) -> RegionRecord {
        RegionRecord {
            color: self.color.clone(),
            opacity: self.opacity,
            bounds: self.bounds.to_fractions(canvas_width, canvas_height),
            mask: self.mask.clone(),
        }
    }
}

/// A region as stored in export data.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub color: String,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    pub bounds: FractionBounds,
    #[serde(default)]
    pub mask: String,
}

fn default_opacity() -> f64 {
    REGION_OPACITY
}

impl RegionRecord {
    /// Pixel bounds on a `width × height` canvas.
    pub fn pixel_bounds(&self, width: u32, height: u32) -> PixelBounds {
        self.bounds.to_pixels(width, height)
    }

    /// Opacity used when rendering; zero or invalid values fall back to the default.
    pub fn render_opacity(&self) -> f64 {
        effective_opacity(self.opacity)
    }
}

pub(crate) fn effective_opacity(opacity: f64) -> f64 {
    if opacity > 0.0 {
        opacity.min(1.0)
    } else {
        REGION_OPACITY
    }
}
