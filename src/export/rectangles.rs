use super::{ExportData, parse_export};
use crate::draw::RenderError;
use crate::extract::{ExtractionSettings, extract_regions};
use crate::region::Region;
use serde::{Deserialize, Serialize};

/// Axis-aligned box around one region, for downstream annotation consumers.
///
/// Percent fields are on a 0-100 scale of the export canvas size.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub color: String,
    pub x_percent: f64,
    pub y_percent: f64,
    pub width_percent: f64,
    pub height_percent: f64,
}

impl Rectangle {
    pub fn from_region(region: &Region, canvas_width: u32, canvas_height: u32) -> Self {
        let b = region.bounds;
        let px = |v: u32| percent(v, canvas_width);
        let py = |v: u32| percent(v, canvas_height);
        Self {
            x: b.x,
            y: b.y,
            width: b.width,
            height: b.height,
            color: region.color.clone(),
            x_percent: px(b.x),
            y_percent: py(b.y),
            width_percent: px(b.width),
            height_percent: py(b.height),
        }
    }
}

fn percent(value: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        value as f64 / total as f64 * 100.0
    }
}

/// Re-extracts the regions of `export` at its recorded size and boxes them.
pub fn rectangles_from_export(
    export: &ExportData,
    settings: &ExtractionSettings,
) -> Result<Vec<Rectangle>, RenderError> {
    let regions = extract_regions(export.width, export.height, &[], &export.regions, settings)?;
    Ok(regions
        .iter()
        .map(|region| Rectangle::from_region(region, export.width, export.height))
        .collect())
}

/// Parses `blob` and derives its rectangles with default extraction settings.
///
/// Never fails: any error is logged and yields an empty list.
pub fn data_to_rectangles(blob: &str) -> Vec<Rectangle> {
    data_to_rectangles_with(blob, &ExtractionSettings::default())
}

/// [`data_to_rectangles`] with explicit extraction settings.
pub fn data_to_rectangles_with(blob: &str, settings: &ExtractionSettings) -> Vec<Rectangle> {
    let export = match parse_export(blob) {
        Ok(export) => export,
        Err(err) => {
            log::error!("Failed to read highlight data: {}", err);
            return Vec::new();
        }
    };

    match rectangles_from_export(&export, settings) {
        Ok(rectangles) => rectangles,
        Err(err) => {
            log::error!("Failed to derive rectangles: {}", err);
            Vec::new()
        }
    }
}
