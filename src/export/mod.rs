//! Versioned export envelope and the conversions around it.
//!
//! Strokes are compacted, extracted into regions, converted to fractional
//! bounds and wrapped in an [`ExportData`] envelope. The envelope is the only
//! unit of persistence; rectangles are derived from it on demand.

mod codec;
mod compact;
mod options;
mod rectangles;

#[cfg(test)]
mod tests;

pub use codec::{encode_export, parse_export};
pub use compact::compact_strokes;
pub use options::{
    CompressionMode, DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES, ExportOptions, options_from_config,
};
pub use rectangles::{Rectangle, data_to_rectangles, data_to_rectangles_with, rectangles_from_export};

use crate::draw::RenderError;
use crate::region::{Region, RegionRecord};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Format version stamped on every export.
pub const EXPORT_VERSION: &str = "1.0";

/// Errors raised while producing or reading export data.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Malformed export data: {0}")]
    MalformedData(String),

    #[error("Failed to serialise export data: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to compress export data: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// The persisted envelope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ExportData {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub compressed: bool,
    /// Canvas width in pixels at export time
    #[serde(default)]
    pub width: u32,
    /// Canvas height in pixels at export time
    #[serde(default)]
    pub height: u32,
    pub regions: Vec<RegionRecord>,
}

fn default_version() -> String {
    EXPORT_VERSION.to_string()
}

impl ExportData {
    pub fn new(width: u32, height: u32, regions: Vec<RegionRecord>) -> Self {
        Self {
            version: default_version(),
            compressed: false,
            width,
            height,
            regions,
        }
    }
}

/// Converts pixel-space regions into an uncompressed envelope.
///
/// Bounds become fractions of `width × height`; pixel lists are dropped.
pub fn to_export(width: u32, height: u32, regions: &[Region]) -> ExportData {
    let records = regions
        .iter()
        .map(|region| region.to_record(width, height))
        .collect();
    ExportData::new(width, height, records)
}

/// Alias for [`parse_export`].
pub fn from_import(blob: &str) -> Result<ExportData, ExportError> {
    parse_export(blob)
}
