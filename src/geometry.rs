//! Geometry helpers for pointer paths.
//!
//! This module provides:
//! - Point-to-segment distance
//! - Single-pass path simplification
//! - Polyline length

use crate::draw::Point;

/// Distance from `p` to the closest point of segment `a`-`b`.
///
/// The projection is clamped to the segment, so points beyond either end
/// measure to that endpoint. A degenerate segment (`a == b`) falls back to
/// the Euclidean distance to `a`.
pub fn point_to_segment_distance(p: &Point, a: &Point, b: &Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq == 0.0 {
        return p.distance(a);
    }

    let t = ((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq;
    let closest = if t < 0.0 {
        *a
    } else if t > 1.0 {
        *b
    } else {
        Point::new(a.x + t * dx, a.y + t * dy)
    };

    p.distance(&closest)
}

/// Simplifies a path in a single forward pass.
///
/// The first and last points are always kept. Each interior point is compared
/// against the segment from the *last retained* point to the *next original*
/// point and kept only when its distance exceeds `tolerance`. Paths of two or
/// fewer points are returned unchanged.
pub fn simplify_path(points: &[Point], tolerance: f64) -> Vec<Point> {
    if points.len() <= 2 {
        return points.to_vec();
    }

    let mut simplified = Vec::with_capacity(points.len());
    simplified.push(points[0]);

    for window in points.windows(3) {
        let (current, next) = (&window[1], &window[2]);
        let prev = simplified.last().copied().unwrap_or(window[0]);
        if point_to_segment_distance(current, &prev, next) > tolerance {
            simplified.push(*current);
        }
    }

    simplified.push(points[points.len() - 1]);
    simplified
}

/// Sum of consecutive Euclidean distances; 0 for fewer than two points.
pub fn stroke_length(points: &[Point]) -> f64 {
    points.windows(2).map(|pair| pair[0].distance(&pair[1])).sum()
}
