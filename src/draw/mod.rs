//! Rendering primitives and stroke definitions (Cairo-based).
//!
//! This module defines the core drawing types used by the highlighter:
//! - [`Color`]: RGBA color parsed from CSS-style strings
//! - [`Stroke`]: a pointer path painted by the highlighter or eraser tool
//! - [`Canvas`]: an ARGB32 image surface with alpha readback
//! - [`paint`]: the single stateless draw call everything else builds on
//! - Rendering functions for strokes, regions and whole exports

pub mod canvas;
pub mod color;
pub mod paint;
pub mod render;
pub mod stroke;

pub use canvas::{AlphaPlane, Canvas, SurfaceError};
pub use color::{Color, ColorError};
pub use paint::{BlendMode, Primitive, paint};
pub use render::{
    RenderError, render_export, render_final_region, render_region, render_stroke, render_strokes,
};
pub use stroke::{Point, Stroke, ToolKind};

pub use color::{BLACK, YELLOW};
