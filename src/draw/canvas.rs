//! Offscreen ARGB raster surface backed by a Cairo image surface.

use std::io::Write;
use thiserror::Error;

/// Largest width or height Cairo accepts for an image surface.
pub const MAX_SURFACE_DIMENSION: u32 = 32767;

/// Errors raised by raster surfaces.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("Surface pixels are still borrowed: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("Failed to encode surface: {0}")]
    Io(#[from] cairo::IoError),
}

/// Alpha channel snapshot of a surface, one byte per pixel in row-major order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlphaPlane {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl AlphaPlane {
    /// Creates a fully transparent plane.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize],
        }
    }

    /// Alpha at `(x, y)`; zero outside the plane.
    #[inline]
    pub fn alpha(&self, x: u32, y: u32) -> u8 {
        if x >= self.width || y >= self.height {
            return 0;
        }
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[inline]
    pub fn set_alpha(&mut self, x: u32, y: u32, alpha: u8) {
        if x < self.width && y < self.height {
            self.data[y as usize * self.width as usize + x as usize] = alpha;
        }
    }

    /// Number of pixels with non-zero alpha.
    pub fn opaque_count(&self) -> usize {
        self.data.iter().filter(|&&a| a > 0).count()
    }
}

/// A drawable raster surface.
///
/// Every paint call opens its own drawing context (see [`super::paint`]), so
/// the canvas carries no compositing state between calls.
pub struct Canvas {
    surface: cairo::ImageSurface,
    antialias: bool,
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width())
            .field("height", &self.height())
            .field("antialias", &self.antialias)
            .finish()
    }
}

impl Canvas {
    /// Creates a fully transparent canvas with antialiasing enabled.
    pub fn new(width: u32, height: u32) -> Result<Self, SurfaceError> {
        if width > MAX_SURFACE_DIMENSION || height > MAX_SURFACE_DIMENSION {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        let (w, h) = (width as i32, height as i32);
        let surface = cairo::ImageSurface::create(cairo::Format::ARgb32, w, h)?;
        Ok(Self {
            surface,
            antialias: true,
        })
    }

    /// Builder-style toggle for edge antialiasing.
    pub fn with_antialias(mut self, antialias: bool) -> Self {
        self.antialias = antialias;
        self
    }

    pub fn width(&self) -> u32 {
        self.surface.width().max(0) as u32
    }

    pub fn height(&self) -> u32 {
        self.surface.height().max(0) as u32
    }

    pub fn antialias(&self) -> bool {
        self.antialias
    }

    /// Opens a fresh drawing context configured with the canvas antialias mode.
    pub(crate) fn context(&self) -> Result<cairo::Context, SurfaceError> {
        let ctx = cairo::Context::new(&self.surface)?;
        ctx.set_antialias(if self.antialias {
            cairo::Antialias::Gray
        } else {
            cairo::Antialias::None
        });
        Ok(ctx)
    }

    /// Resets every pixel to transparent.
    pub fn clear(&self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Reads back the alpha channel.
    pub fn alpha_plane(&mut self) -> Result<AlphaPlane, SurfaceError> {
        let (width, height) = (self.width(), self.height());
        if width == 0 || height == 0 {
            // Cairo hands out no pixel buffer for empty surfaces.
            return Ok(AlphaPlane::new(width, height));
        }
        let stride = self.surface.stride().max(0) as usize;
        self.surface.flush();
        let data = self.surface.data()?;

        let mut plane = AlphaPlane::new(width, height);
        for y in 0..height as usize {
            let row = &data[y * stride..];
            for x in 0..width as usize {
                let px = u32::from_ne_bytes([
                    row[x * 4],
                    row[x * 4 + 1],
                    row[x * 4 + 2],
                    row[x * 4 + 3],
                ]);
                plane.data[y * width as usize + x] = (px >> 24) as u8;
            }
        }
        Ok(plane)
    }

    /// Reads one pixel as straight (non-premultiplied) RGBA bytes.
    pub fn pixel_rgba(&mut self, x: u32, y: u32) -> Result<Option<[u8; 4]>, SurfaceError> {
        if x >= self.width() || y >= self.height() {
            return Ok(None);
        }
        let stride = self.surface.stride().max(0) as usize;
        self.surface.flush();
        let data = self.surface.data()?;

        let offset = y as usize * stride + x as usize * 4;
        let px = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);
        let alpha = (px >> 24) as u8;
        let unpremultiply = |channel: u32| -> u8 {
            if alpha == 0 {
                0
            } else {
                ((channel & 0xff) * 255 / alpha as u32).min(255) as u8
            }
        };
        Ok(Some([
            unpremultiply(px >> 16),
            unpremultiply(px >> 8),
            unpremultiply(px),
            alpha,
        ]))
    }

    /// Encodes the canvas as PNG.
    pub fn write_png<W: Write>(&self, writer: &mut W) -> Result<(), SurfaceError> {
        self.surface.flush();
        self.surface.write_to_png(writer)?;
        Ok(())
    }
}
