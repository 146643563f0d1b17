//! Text encoding of export envelopes.
//!
//! Compressed blobs are the JSON envelope gzip-compressed and wrapped in
//! standard base64 so they stay safe to embed in text fields.

use super::options::ExportOptions;
use super::{ExportData, ExportError};
use crate::draw::canvas::MAX_SURFACE_DIMENSION;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use flate2::{Compression, bufread::GzDecoder, write::GzEncoder};
use log::debug;
use std::io::{Read, Write};
use thiserror::Error;

/// Slack for fractions that went through float rounding on export.
const BOUNDS_EPSILON: f64 = 1e-6;

/// Why the compressed interpretation of a blob failed. Never leaves this module.
#[derive(Debug, Error)]
pub(crate) enum DecodeFailure {
    #[error("not base64: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("not gzip text: {0}")]
    Gzip(#[from] std::io::Error),

    #[error("not an export envelope: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializes `export`, compressing according to `options`.
///
/// The `compressed` flag in the output reflects what was actually done,
/// whatever the flag on the input says.
pub fn encode_export(export: &ExportData, options: &ExportOptions) -> Result<String, ExportError> {
    let mut payload = export.clone();
    payload.compressed = false;
    let json = serde_json::to_string(&payload)?;

    if !options.should_compress(json.len()) {
        return Ok(json);
    }

    payload.compressed = true;
    let json = serde_json::to_string(&payload)?;
    let packed = compress_bytes(json.as_bytes())?;
    debug!(
        "Compressed export from {} to {} bytes",
        json.len(),
        packed.len()
    );
    Ok(packed)
}

/// Parses a blob in either compressed or raw JSON form.
///
/// The compressed interpretation is tried first; if any stage of it fails the
/// blob is parsed as plain JSON. Only when both fail is an error returned.
pub fn parse_export(blob: &str) -> Result<ExportData, ExportError> {
    let trimmed = blob.trim();

    let export = match decode_compressed(trimmed) {
        Ok(export) => export,
        Err(err) => {
            debug!("Compressed decode failed ({}); parsing as raw JSON", err);
            serde_json::from_str(trimmed).map_err(|err| {
                ExportError::MalformedData(format!(
                    "{err} (expected JSON or base64 gzip JSON; LZ-string blobs are not supported)"
                ))
            })?
        }
    };

    check_geometry(&export)?;
    Ok(export)
}

/// Rejects canvas sizes no surface can hold and region bounds outside the
/// unit square. Decoding such bounds would size masks past the canvas.
fn check_geometry(export: &ExportData) -> Result<(), ExportError> {
    if export.width > MAX_SURFACE_DIMENSION || export.height > MAX_SURFACE_DIMENSION {
        return Err(ExportError::MalformedData(format!(
            "canvas size {}x{} exceeds {MAX_SURFACE_DIMENSION}",
            export.width, export.height
        )));
    }

    let in_unit = |v: f64| v.is_finite() && (-BOUNDS_EPSILON..=1.0 + BOUNDS_EPSILON).contains(&v);
    for (index, region) in export.regions.iter().enumerate() {
        let b = &region.bounds;
        let fits = [b.x, b.y, b.width, b.height].into_iter().all(in_unit)
            && b.x + b.width <= 1.0 + BOUNDS_EPSILON
            && b.y + b.height <= 1.0 + BOUNDS_EPSILON;
        if !fits {
            return Err(ExportError::MalformedData(format!(
                "region {index} bounds {b:?} fall outside the canvas"
            )));
        }
    }
    Ok(())
}

fn decode_compressed(blob: &str) -> Result<ExportData, DecodeFailure> {
    let bytes = STANDARD.decode(blob)?;
    let mut decoder = GzDecoder::new(&bytes[..]);
    let mut json = String::new();
    decoder.read_to_string(&mut json)?;
    Ok(serde_json::from_str(&json)?)
}

fn compress_bytes(data: &[u8]) -> Result<String, ExportError> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    let gz = encoder.finish()?;
    Ok(STANDARD.encode(gz))
}
