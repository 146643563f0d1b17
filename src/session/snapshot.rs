use crate::draw::Stroke;
use crate::region::RegionRecord;
use std::sync::Arc;

/// Immutable copy of a session's drawing state, suitable for a history stack.
///
/// Cloning is cheap; the stroke and region lists are shared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HistorySnapshot {
    strokes: Arc<[Stroke]>,
    loaded_regions: Arc<[RegionRecord]>,
}

impl HistorySnapshot {
    pub fn new(strokes: &[Stroke], loaded_regions: &[RegionRecord]) -> Self {
        Self {
            strokes: Arc::from(strokes),
            loaded_regions: Arc::from(loaded_regions),
        }
    }

    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn loaded_regions(&self) -> &[RegionRecord] {
        &self.loaded_regions
    }

    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty() && self.loaded_regions.is_empty()
    }
}
