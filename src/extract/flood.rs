//! Connected-component search over an alpha plane.

use super::ExtractionSettings;
use crate::draw::AlphaPlane;
use crate::mask::{self, MaskGrid};
use crate::region::{PixelBounds, REGION_OPACITY, Region};

/// A 4-connected set of non-transparent pixels.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub pixels: Vec<(u32, u32)>,
    pub bounds: PixelBounds,
}

/// Collects every non-transparent pixel 4-connected to `start`.
///
/// Uses an explicit stack so large areas cannot overflow the call stack.
/// `visited` is indexed `y * width + x` and is updated in place; `start` must
/// be inside the plane and non-transparent.
pub fn flood_fill(plane: &AlphaPlane, start: (u32, u32), visited: &mut [bool]) -> Component {
    let width = plane.width as usize;
    let index = |x: u32, y: u32| y as usize * width + x as usize;

    let (mut min_x, mut min_y) = start;
    let (mut max_x, mut max_y) = start;
    let mut pixels = Vec::new();
    let mut stack = vec![start];
    visited[index(start.0, start.1)] = true;

    while let Some((x, y)) = stack.pop() {
        pixels.push((x, y));
        min_x = min_x.min(x);
        max_x = max_x.max(x);
        min_y = min_y.min(y);
        max_y = max_y.max(y);

        let neighbors = [
            x.checked_add(1).map(|nx| (nx, y)),
            x.checked_sub(1).map(|nx| (nx, y)),
            y.checked_add(1).map(|ny| (x, ny)),
            y.checked_sub(1).map(|ny| (x, ny)),
        ];
        for (nx, ny) in neighbors.into_iter().flatten() {
            if nx >= plane.width || ny >= plane.height {
                continue;
            }
            let i = index(nx, ny);
            if visited[i] || plane.alpha(nx, ny) == 0 {
                continue;
            }
            visited[i] = true;
            stack.push((nx, ny));
        }
    }

    Component {
        pixels,
        bounds: PixelBounds::from_min_max(min_x, min_y, max_x, max_y),
    }
}

/// Finds the painted regions of one color layer.
///
/// Seeds are taken on a `scan_stride` grid in both axes while the fill itself
/// visits every pixel, so components narrower than the stride can be missed.
/// Components smaller than `min_region_pixels` are dropped as noise.
pub fn find_connected_regions(
    plane: &AlphaPlane,
    color: &str,
    settings: &ExtractionSettings,
) -> Vec<Region> {
    let stride = settings.scan_stride.max(1) as usize;
    let mut visited = vec![false; plane.data.len()];
    let mut regions = Vec::new();
    let mut discarded = 0usize;

    for y in (0..plane.height).step_by(stride) {
        for x in (0..plane.width).step_by(stride) {
            let i = y as usize * plane.width as usize + x as usize;
            if visited[i] || plane.alpha(x, y) == 0 {
                continue;
            }

            let component = flood_fill(plane, (x, y), &mut visited);
            if component.pixels.len() < settings.min_region_pixels {
                discarded += 1;
                continue;
            }
            regions.push(component_to_region(component, color));
        }
    }

    log::debug!(
        "Color {}: {} regions kept, {} noise components discarded",
        color,
        regions.len(),
        discarded
    );
    regions
}

fn component_to_region(component: Component, color: &str) -> Region {
    let Component { pixels, bounds } = component;
    let grid = MaskGrid::from_pixels(&pixels, bounds.x, bounds.y, bounds.width, bounds.height);
    Region {
        color: color.to_string(),
        opacity: REGION_OPACITY,
        bounds,
        mask: mask::encode(&grid),
        pixels: Some(pixels),
    }
}
