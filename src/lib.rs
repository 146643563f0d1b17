//! Freehand highlighter regions.
//!
//! Turns pointer strokes into compact, resolution-independent region data
//! and back: strokes are split by erasers, rasterized per color, flood-filled
//! into connected regions, stored as RLE masks in a versioned export blob,
//! and rendered or boxed into rectangles from that blob alone.

pub mod config;
pub mod draw;
pub mod erase;
pub mod export;
pub mod extract;
pub mod geometry;
pub mod mask;
pub mod region;
pub mod session;

pub use config::Config;
pub use draw::{Canvas, Color, Point, Stroke, ToolKind};
pub use export::{
    ExportData, ExportError, ExportOptions, Rectangle, data_to_rectangles, encode_export,
    from_import, to_export,
};
pub use extract::{ExtractionSettings, extract_regions};
pub use region::{Region, RegionRecord};
pub use session::{HighlightSession, HistorySnapshot};
