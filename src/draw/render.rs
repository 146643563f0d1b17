//! Compositing strokes and regions onto a canvas.
//!
//! Blend rules:
//! - highlight strokes: source-over at the stroke opacity
//! - eraser strokes: destination-out at full strength
//! - strokes derived from regions: dots of radius `size / 2` plus the
//!   connecting polyline, source-over at the stroke opacity
//! - regions: multiply at the stored opacity (0.5 when unset)

use super::canvas::{Canvas, MAX_SURFACE_DIMENSION, SurfaceError};
use super::color::{BLACK, Color, ColorError};
use super::paint::{BlendMode, Primitive, paint};
use super::stroke::Stroke;
use crate::export::ExportData;
use crate::mask;
use crate::region::{Region, RegionRecord, effective_opacity};
use thiserror::Error;

/// Errors raised while rendering or rasterizing.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error(transparent)]
    Color(#[from] ColorError),

    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

/// Shape an eraser clears: its polyline, or a disc of radius `size / 2` when
/// it has a single sample.
pub(crate) fn eraser_shape(eraser: &Stroke) -> Primitive<'_> {
    match eraser.points.as_slice() {
        [_] => Primitive::Dots {
            points: &eraser.points,
            radius: eraser.size / 2.0,
        },
        points => Primitive::Polyline {
            points,
            width: eraser.size,
        },
    }
}

/// Renders a single stroke.
///
/// Highlights with fewer than two points draw nothing. A single-sample eraser
/// clears a disc.
pub fn render_stroke(canvas: &Canvas, stroke: &Stroke) -> Result<(), RenderError> {
    if stroke.is_eraser() && !stroke.from_region {
        paint(canvas, &eraser_shape(stroke), BLACK, BlendMode::DestinationOut, 1.0)?;
        return Ok(());
    }
    if stroke.points.len() < 2 {
        return Ok(());
    }

    let line = Primitive::Polyline {
        points: &stroke.points,
        width: stroke.size,
    };

    if stroke.from_region {
        let color = Color::parse(&stroke.color)?;
        let dots = Primitive::Dots {
            points: &stroke.points,
            radius: stroke.size / 2.0,
        };
        paint(canvas, &dots, color, BlendMode::SourceOver, stroke.opacity)?;
        paint(canvas, &line, color, BlendMode::SourceOver, stroke.opacity)?;
        return Ok(());
    }

    let color = Color::parse(&stroke.color)?;
    paint(canvas, &line, color, BlendMode::SourceOver, stroke.opacity)?;
    Ok(())
}

/// Renders all strokes in order (first stroke = bottom layer).
pub fn render_strokes(canvas: &Canvas, strokes: &[Stroke]) -> Result<(), RenderError> {
    strokes
        .iter()
        .try_for_each(|stroke| render_stroke(canvas, stroke))
}

/// Renders an exported region rescaled to `target_width × target_height`.
///
/// The mask is decoded at the rescaled bounds size.
pub fn render_region(
    canvas: &Canvas,
    region: &RegionRecord,
    target_width: u32,
    target_height: u32,
) -> Result<(), RenderError> {
    let color = Color::parse(&region.color)?;
    let bounds = region.pixel_bounds(target_width, target_height);
    if !bounds.fits_within(target_width, target_height) {
        log::warn!("Skipping region with bounds {:?} outside the canvas", bounds);
        return Ok(());
    }
    let grid = mask::decode(&region.mask, bounds.width, bounds.height);
    paint(
        canvas,
        &Primitive::mask_at(bounds.x as i32, bounds.y as i32, &grid),
        color,
        BlendMode::Multiply,
        region.render_opacity(),
    )?;
    Ok(())
}

/// Renders a pixel-space region as produced by extraction.
pub fn render_final_region(canvas: &Canvas, region: &Region) -> Result<(), RenderError> {
    let color = Color::parse(&region.color)?;
    let grid = mask::decode(&region.mask, region.bounds.width, region.bounds.height);
    paint(
        canvas,
        &Primitive::mask_at(region.bounds.x as i32, region.bounds.y as i32, &grid),
        color,
        BlendMode::Multiply,
        effective_opacity(region.opacity),
    )?;
    Ok(())
}

/// Clears the canvas and renders every region of `export`.
///
/// When the canvas size differs from the size recorded in the export, masks
/// are decoded at their recorded size and scaled onto the canvas.
pub fn render_export(canvas: &Canvas, export: &ExportData) -> Result<(), RenderError> {
    canvas.clear()?;
    let (target_w, target_h) = (canvas.width(), canvas.height());
    let same_size = export.width == target_w && export.height == target_h;

    for region in &export.regions {
        if same_size || export.width == 0 || export.height == 0 {
            render_region(canvas, region, target_w, target_h)?;
            continue;
        }

        let color = Color::parse(&region.color)?;
        let native = region.pixel_bounds(export.width, export.height);
        let oversized = export.width > MAX_SURFACE_DIMENSION || export.height > MAX_SURFACE_DIMENSION;
        if oversized || !native.fits_within(export.width, export.height) {
            log::warn!("Skipping region with bounds {:?} outside the canvas", native);
            continue;
        }
        let grid = mask::decode(&region.mask, native.width, native.height);
        let sx = target_w as f64 / export.width as f64;
        let sy = target_h as f64 / export.height as f64;
        paint(
            canvas,
            &Primitive::Mask {
                origin: (native.x as f64 * sx, native.y as f64 * sy),
                scale: (sx, sy),
                mask: &grid,
            },
            color,
            BlendMode::Multiply,
            region.render_opacity(),
        )?;
    }

    log::debug!(
        "Rendered {} regions onto {}x{} canvas",
        export.regions.len(),
        target_w,
        target_h
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Point;
    use crate::region::{FractionBounds, PixelBounds};

    fn crisp(width: u32, height: u32) -> Canvas {
        Canvas::new(width, height).unwrap().with_antialias(false)
    }

    fn square_record(color: &str, opacity: f64) -> RegionRecord {
        RegionRecord {
            color: color.to_string(),
            opacity,
            bounds: FractionBounds {
                x: 0.1,
                y: 0.1,
                width: 0.2,
                height: 0.2,
            },
            mask: "1:4".to_string(),
        }
    }

    #[test]
    fn highlight_stroke_uses_its_opacity() {
        let mut canvas = crisp(20, 20);
        let stroke = Stroke::highlight("#0000ff", 6.0, 0.5)
            .with_points([Point::new(2.0, 10.0), Point::new(18.0, 10.0)]);
        render_stroke(&canvas, &stroke).unwrap();
        let [r, g, b, a] = canvas.pixel_rgba(10, 10).unwrap().unwrap();
        assert!((120..=135).contains(&a), "alpha was {a}");
        assert!(b > 240 && r < 10 && g < 10);
    }

    #[test]
    fn eraser_stroke_removes_paint() {
        let mut canvas = crisp(20, 20);
        let paint_stroke = Stroke::highlight("#00ff00", 10.0, 1.0)
            .with_points([Point::new(0.0, 10.0), Point::new(20.0, 10.0)]);
        let eraser = Stroke::eraser(6.0).with_points([Point::new(10.0, 0.0), Point::new(10.0, 20.0)]);
        render_strokes(&canvas, &[paint_stroke, eraser]).unwrap();
        let plane = canvas.alpha_plane().unwrap();
        assert_eq!(plane.alpha(10, 10), 0);
        assert_eq!(plane.alpha(3, 10), 255);
    }

    #[test]
    fn single_sample_eraser_clears_a_disc() {
        let mut canvas = crisp(30, 30);
        let paint_stroke = Stroke::highlight("#00ff00", 10.0, 1.0)
            .with_points([Point::new(0.0, 15.0), Point::new(30.0, 15.0)]);
        let eraser = Stroke::eraser(8.0).with_points([Point::new(15.0, 15.0)]);
        render_strokes(&canvas, &[paint_stroke, eraser]).unwrap();
        let plane = canvas.alpha_plane().unwrap();
        assert_eq!(plane.alpha(15, 15), 0);
        assert_eq!(plane.alpha(12, 15), 0);
        assert_eq!(plane.alpha(5, 15), 255);
        assert_eq!(plane.alpha(25, 15), 255);
    }

    #[test]
    fn single_point_highlight_draws_nothing() {
        let mut canvas = crisp(10, 10);
        let tap = Stroke::highlight("#00ff00", 6.0, 1.0).with_points([Point::new(5.0, 5.0)]);
        render_stroke(&canvas, &tap).unwrap();
        assert_eq!(canvas.alpha_plane().unwrap().opaque_count(), 0);
    }

    #[test]
    fn region_outside_the_canvas_is_skipped() {
        let mut canvas = crisp(10, 10);
        let mut record = square_record("#ff0000", 0.5);
        record.bounds.width = 1e9;
        record.bounds.height = 1e9;
        render_region(&canvas, &record, 10, 10).unwrap();
        assert_eq!(canvas.alpha_plane().unwrap().opaque_count(), 0);
    }

    #[test]
    fn region_derived_stroke_paints_dots_at_each_point() {
        let mut canvas = crisp(40, 40);
        let mut stroke = Stroke::highlight("#ff0000", 8.0, 1.0)
            .with_points([Point::new(10.0, 10.0), Point::new(30.0, 10.0)]);
        stroke.from_region = true;
        render_stroke(&canvas, &stroke).unwrap();
        let plane = canvas.alpha_plane().unwrap();
        assert!(plane.alpha(10, 10) > 0);
        assert!(plane.alpha(20, 10) > 0);
        assert_eq!(plane.alpha(20, 30), 0);
    }

    #[test]
    fn malformed_stroke_color_is_reported() {
        let canvas = crisp(10, 10);
        let stroke = Stroke::highlight("not-a-color", 2.0, 1.0)
            .with_points([Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
        assert!(matches!(
            render_stroke(&canvas, &stroke),
            Err(RenderError::Color(_))
        ));
    }

    #[test]
    fn region_renders_rescaled_mask_with_default_opacity() {
        let mut canvas = crisp(10, 10);
        render_region(&canvas, &square_record("#000000", 0.0), 10, 10).unwrap();
        let plane = canvas.alpha_plane().unwrap();
        assert_eq!(plane.opaque_count(), 4);
        let alpha = plane.alpha(1, 1);
        assert!((120..=135).contains(&alpha), "alpha was {alpha}");
        assert_eq!(plane.alpha(3, 3), 0);
    }

    #[test]
    fn multiply_darkens_existing_paint() {
        let mut canvas = crisp(10, 10);
        let base = Stroke::highlight("#ffff00", 10.0, 1.0)
            .with_points([Point::new(0.0, 2.0), Point::new(10.0, 2.0)]);
        render_stroke(&canvas, &base).unwrap();
        render_region(&canvas, &square_record("#00ffff", 1.0), 10, 10).unwrap();
        let [r, g, b, a] = canvas.pixel_rgba(1, 1).unwrap().unwrap();
        assert_eq!(a, 255);
        assert!(r < 10, "red should be multiplied away, got {r}");
        assert!(g > 240);
        assert!(b < 10);
    }

    #[test]
    fn final_region_uses_pixel_bounds() {
        let mut canvas = crisp(10, 10);
        let region = Region {
            color: "#000".into(),
            opacity: 1.0,
            bounds: PixelBounds {
                x: 5,
                y: 5,
                width: 2,
                height: 1,
            },
            mask: "1:2".into(),
            pixels: None,
        };
        render_final_region(&canvas, &region).unwrap();
        let plane = canvas.alpha_plane().unwrap();
        assert_eq!(plane.opaque_count(), 2);
        assert_eq!(plane.alpha(6, 5), 255);
    }

    #[test]
    fn export_rendering_scales_to_larger_canvas() {
        let export = ExportData {
            version: crate::export::EXPORT_VERSION.to_string(),
            compressed: false,
            width: 10,
            height: 10,
            regions: vec![square_record("#000000", 1.0)],
        };
        let mut canvas = crisp(20, 20);
        render_export(&canvas, &export).unwrap();
        let plane = canvas.alpha_plane().unwrap();
        assert_eq!(plane.opaque_count(), 16);
        assert_eq!(plane.alpha(2, 2), 255);
        assert_eq!(plane.alpha(5, 5), 255);
        assert_eq!(plane.alpha(6, 6), 0);
    }
}
