//! Region extraction: rasterize strokes and loaded regions per color, then
//! split each color layer into connected regions.
//!
//! For every distinct color (literal string match) found in highlight strokes
//! or loaded regions:
//! 1. a transparent offscreen canvas of the requested size is allocated
//! 2. loaded regions of that color are painted at full opacity
//! 3. highlight strokes of that color are painted at full opacity
//! 4. every eraser stroke is painted destination-out, after all highlights;
//!    a single-sample eraser clears a disc of radius `size / 2`
//! 5. the alpha channel is flood-filled into components, see [`flood`]
//!
//! Colors are processed independently. Output order across colors is not
//! meaningful.

pub mod flood;


pub use flood::{Component, find_connected_regions, flood_fill};

use crate::config::ExtractionConfig;
use crate::draw::render::eraser_shape;
use crate::draw::{BlendMode, Canvas, Color, Primitive, RenderError, Stroke, ToolKind, paint};
use crate::mask;
use crate::region::{Region, RegionRecord};

/// Smallest component kept by default; anything below is noise.
pub const DEFAULT_MIN_REGION_PIXELS: usize = 11;

/// Default seed grid spacing.
pub const DEFAULT_SCAN_STRIDE: u32 = 2;

/// Tunables for region extraction.
#[derive(Clone, Debug, PartialEq)]
pub struct ExtractionSettings {
    /// Seed grid spacing in both axes
    pub scan_stride: u32,
    /// Minimum component size in pixels
    pub min_region_pixels: usize,
    /// Antialias edges while rasterizing
    pub antialias: bool,
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            scan_stride: DEFAULT_SCAN_STRIDE,
            min_region_pixels: DEFAULT_MIN_REGION_PIXELS,
            antialias: false,
        }
    }
}

impl From<&ExtractionConfig> for ExtractionSettings {
    fn from(cfg: &ExtractionConfig) -> Self {
        Self {
            scan_stride: cfg.scan_stride,
            min_region_pixels: cfg.min_region_pixels,
            antialias: cfg.antialias,
        }
    }
}

/// Distinct colors in first-seen order: highlight strokes first, then loaded regions.
pub fn distinct_colors<'a>(strokes: &'a [Stroke], loaded: &'a [RegionRecord]) -> Vec<&'a str> {
    let stroke_colors = strokes
        .iter()
        .filter(|s| s.kind == ToolKind::Highlight)
        .map(|s| s.color.as_str());
    let loaded_colors = loaded.iter().map(|r| r.color.as_str());

    let mut colors: Vec<&str> = Vec::new();
    for color in stroke_colors.chain(loaded_colors) {
        if !colors.contains(&color) {
            colors.push(color);
        }
    }
    colors
}

/// Extracts connected regions for a `width × height` surface.
///
/// `loaded` regions are rescaled from fractional bounds to the surface size.
/// A zero-sized surface yields no regions.
pub fn extract_regions(
    width: u32,
    height: u32,
    strokes: &[Stroke],
    loaded: &[RegionRecord],
    settings: &ExtractionSettings,
) -> Result<Vec<Region>, RenderError> {
    if width == 0 || height == 0 {
        log::debug!("Extraction requested on empty {}x{} surface", width, height);
        return Ok(Vec::new());
    }

    let erasers: Vec<&Stroke> = strokes.iter().filter(|s| s.is_eraser()).collect();
    let mut regions = Vec::new();

    for color in distinct_colors(strokes, loaded) {
        let mut layer = rasterize_color(width, height, color, strokes, &erasers, loaded, settings)?;
        let plane = layer.alpha_plane()?;
        regions.extend(find_connected_regions(&plane, color, settings));
    }

    log::debug!(
        "Extracted {} regions from {} strokes and {} loaded regions",
        regions.len(),
        strokes.len(),
        loaded.len()
    );
    Ok(regions)
}

fn rasterize_color(
    width: u32,
    height: u32,
    color: &str,
    strokes: &[Stroke],
    erasers: &[&Stroke],
    loaded: &[RegionRecord],
    settings: &ExtractionSettings,
) -> Result<Canvas, RenderError> {
    let layer = Canvas::new(width, height)?.with_antialias(settings.antialias);
    let ink = Color::parse(color)?.opaque();

    for region in loaded.iter().filter(|r| r.color == color) {
        let bounds = region.pixel_bounds(width, height);
        if !bounds.fits_within(width, height) {
            log::warn!(
                "Skipping loaded {} region with bounds {:?} outside {}x{}",
                color,
                bounds,
                width,
                height
            );
            continue;
        }
        let grid = mask::decode(&region.mask, bounds.width, bounds.height);
        paint(
            &layer,
            &Primitive::mask_at(bounds.x as i32, bounds.y as i32, &grid),
            ink,
            BlendMode::SourceOver,
            1.0,
        )?;
    }

    for stroke in strokes
        .iter()
        .filter(|s| s.kind == ToolKind::Highlight && s.color == color)
    {
        paint(
            &layer,
            &Primitive::Polyline {
                points: &stroke.points,
                width: stroke.size,
            },
            ink,
            BlendMode::SourceOver,
            1.0,
        )?;
    }

    for eraser in erasers {
        paint(&layer, &eraser_shape(eraser), ink, BlendMode::DestinationOut, 1.0)?;
    }

    Ok(layer)
}
