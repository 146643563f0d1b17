use crate::config::{ExportCompression, ExportConfig};

pub const DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES: u64 = 1024;

/// Compression preference for export blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionMode {
    /// Always emit plain JSON.
    Off,
    /// Always emit base64-wrapped gzip.
    On,
    /// Compress when the JSON payload reaches the configured threshold.
    Auto,
}

/// Runtime options for [`super::encode_export`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub compression: CompressionMode,
    pub auto_compress_threshold_bytes: u64,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            compression: CompressionMode::On,
            auto_compress_threshold_bytes: DEFAULT_AUTO_COMPRESS_THRESHOLD_BYTES,
        }
    }
}

impl ExportOptions {
    pub fn with_compression(compression: CompressionMode) -> Self {
        Self {
            compression,
            ..Self::default()
        }
    }

    pub(crate) fn should_compress(&self, json_len: usize) -> bool {
        match self.compression {
            CompressionMode::Off => false,
            CompressionMode::On => true,
            CompressionMode::Auto => json_len as u64 >= self.auto_compress_threshold_bytes,
        }
    }
}

/// Build runtime export options from configuration values.
pub fn options_from_config(export_cfg: &ExportConfig) -> ExportOptions {
    ExportOptions {
        compression: match export_cfg.compression {
            ExportCompression::Auto => CompressionMode::Auto,
            ExportCompression::On => CompressionMode::On,
            ExportCompression::Off => CompressionMode::Off,
        },
        auto_compress_threshold_bytes: export_cfg.auto_compress_threshold_bytes.max(1),
    }
}
