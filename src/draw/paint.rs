//! Stateless paint operation.
//!
//! Each call to [`paint`] opens a fresh Cairo context on the target canvas, so
//! the blend mode and alpha apply to that single primitive and are gone once
//! the call returns.

use super::canvas::{Canvas, SurfaceError};
use super::color::Color;
use super::stroke::Point;
use crate::mask::MaskGrid;

/// How a primitive combines with the pixels already on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlendMode {
    /// Normal alpha compositing
    SourceOver,
    /// Clears destination alpha wherever the primitive covers
    DestinationOut,
    /// Multiplies colors, darkening like a physical highlighter
    Multiply,
}

impl BlendMode {
    fn operator(self) -> cairo::Operator {
        match self {
            BlendMode::SourceOver => cairo::Operator::Over,
            BlendMode::DestinationOut => cairo::Operator::DestOut,
            BlendMode::Multiply => cairo::Operator::Multiply,
        }
    }
}

/// Geometry that can be painted.
#[derive(Clone, Copy, Debug)]
pub enum Primitive<'a> {
    /// Open polyline with round caps and joins. Fewer than two points draw nothing.
    Polyline { points: &'a [Point], width: f64 },
    /// Union of filled circles centered on each point.
    Dots { points: &'a [Point], radius: f64 },
    /// Filled mask cells, one unit square per cell, placed at `origin` and
    /// stretched by `scale`.
    Mask {
        origin: (f64, f64),
        scale: (f64, f64),
        mask: &'a MaskGrid,
    },
}

impl<'a> Primitive<'a> {
    /// Unscaled mask anchored at an integer pixel position.
    pub fn mask_at(x: i32, y: i32, mask: &'a MaskGrid) -> Self {
        Primitive::Mask {
            origin: (x as f64, y as f64),
            scale: (1.0, 1.0),
            mask,
        }
    }
}

/// Paints `primitive` in `color` using `blend` at `alpha` (0.0-1.0).
///
/// The color's own alpha is multiplied by `alpha`.
pub fn paint(
    canvas: &Canvas,
    primitive: &Primitive<'_>,
    color: Color,
    blend: BlendMode,
    alpha: f64,
) -> Result<(), SurfaceError> {
    let ctx = canvas.context()?;
    ctx.set_operator(blend.operator());
    ctx.set_source_rgba(color.r, color.g, color.b, color.a * alpha.clamp(0.0, 1.0));

    match *primitive {
        Primitive::Polyline { points, width } => {
            let [first, rest @ ..] = points else {
                return Ok(());
            };
            if rest.is_empty() {
                return Ok(());
            }
            ctx.set_line_width(width);
            ctx.set_line_cap(cairo::LineCap::Round);
            ctx.set_line_join(cairo::LineJoin::Round);
            ctx.move_to(first.x, first.y);
            for point in rest {
                ctx.line_to(point.x, point.y);
            }
            ctx.stroke()?;
        }
        Primitive::Dots { points, radius } => {
            if points.is_empty() || radius <= 0.0 {
                return Ok(());
            }
            for point in points {
                ctx.new_sub_path();
                ctx.arc(point.x, point.y, radius, 0.0, std::f64::consts::TAU);
            }
            ctx.fill()?;
        }
        Primitive::Mask {
            origin,
            scale,
            mask,
        } => {
            ctx.translate(origin.0, origin.1);
            ctx.scale(scale.0, scale.1);
            let mut any = false;
            for (x, y, len) in mask.filled_spans() {
                ctx.rectangle(x as f64, y as f64, len as f64, 1.0);
                any = true;
            }
            if any {
                ctx.fill()?;
            }
        }
    }

    Ok(())
}
