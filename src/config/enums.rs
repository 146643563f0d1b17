//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Whether exported blobs are compressed.
///
/// Compressed blobs are gzip wrapped in base64; readers accept both forms.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ExportCompression {
    /// Always write plain JSON
    Off,
    /// Always compress
    #[default]
    On,
    /// Compress once the JSON reaches `auto_compress_threshold_bytes`
    Auto,
}
