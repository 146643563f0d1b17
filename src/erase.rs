//! Splitting highlight strokes around eraser strokes.

use crate::draw::{Point, Stroke};

/// Returns true when `point` lies within `size / 2` of any sample of `eraser`.
///
/// Only the eraser's samples are tested, not the segments between them, so
/// fast eraser motion can leave gaps.
pub fn is_point_erased(point: &Point, eraser: &Stroke) -> bool {
    let radius = eraser.size / 2.0;
    eraser
        .points
        .iter()
        .any(|sample| point.distance(sample) <= radius)
}

/// Splits `stroke` into the sub-strokes that survive `erasers`.
///
/// Only eraser-kind strokes in `erasers` are considered. With none, the stroke
/// comes back unchanged. Otherwise each contiguous run of non-erased points
/// with at least two points becomes a new stroke with the original style;
/// shorter runs are dropped. Point order is never changed.
pub fn split_by_erasers(stroke: &Stroke, erasers: &[Stroke]) -> Vec<Stroke> {
    let erasers: Vec<&Stroke> = erasers.iter().filter(|s| s.is_eraser()).collect();
    if erasers.is_empty() {
        return vec![stroke.clone()];
    }

    let mut segments = Vec::new();
    let mut current: Vec<Point> = Vec::new();

    for point in &stroke.points {
        if erasers.iter().any(|eraser| is_point_erased(point, eraser)) {
            flush_segment(stroke, &mut current, &mut segments);
        } else {
            current.push(*point);
        }
    }
    flush_segment(stroke, &mut current, &mut segments);

    log::trace!(
        "Split stroke of {} points into {} segments",
        stroke.points.len(),
        segments.len()
    );
    segments
}

fn flush_segment(template: &Stroke, current: &mut Vec<Point>, out: &mut Vec<Stroke>) {
    if current.len() >= 2 {
        out.push(template.with_same_style(std::mem::take(current)));
    } else {
        current.clear();
    }
}
