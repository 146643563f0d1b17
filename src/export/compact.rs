use crate::draw::{Stroke, ToolKind};
use crate::geometry::{simplify_path, stroke_length};

/// Prepares strokes for persistence.
///
/// Highlight strokes are simplified with `tolerance`; eraser strokes keep
/// every sample since erasing is tested per sample. Highlights left with
/// fewer than two points, or no longer than `min_length`, are dropped.
/// Erasers are dropped only when they have no samples.
pub fn compact_strokes(strokes: &[Stroke], tolerance: f64, min_length: f64) -> Vec<Stroke> {
    let kept: Vec<Stroke> = strokes
        .iter()
        .map(|stroke| match stroke.kind {
            ToolKind::Highlight => stroke.with_same_style(simplify_path(&stroke.points, tolerance)),
            ToolKind::Erase => stroke.clone(),
        })
        .filter(|stroke| match stroke.kind {
            ToolKind::Highlight => {
                stroke.points.len() >= 2 && stroke_length(&stroke.points) > min_length
            }
            ToolKind::Erase => !stroke.points.is_empty(),
        })
        .collect();

    if kept.len() != strokes.len() {
        log::debug!(
            "Compaction dropped {} of {} strokes",
            strokes.len() - kept.len(),
            strokes.len()
        );
    }
    kept
}
