//! RGBA color type, CSS-style color string parsing and predefined constants.

use thiserror::Error;

/// Errors produced while parsing a color string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Malformed color string: {0:?}")]
    Malformed(String),
}

/// Represents an RGBA color with floating-point components.
///
/// All components are in the range 0.0 (minimum) to 1.0 (maximum).
///
/// # Examples
///
/// ```
/// use highlighter::draw::Color;
/// let red = Color::parse("#ff0000").unwrap();
/// assert_eq!(red, Color { r: 1.0, g: 0.0, b: 0.0, a: 1.0 });
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red component (0.0 = no red, 1.0 = full red)
    pub r: f64,
    /// Green component (0.0 = no green, 1.0 = full green)
    pub g: f64,
    /// Blue component (0.0 = no blue, 1.0 = full blue)
    pub b: f64,
    /// Alpha/transparency (0.0 = fully transparent, 1.0 = fully opaque)
    pub a: f64,
}

impl Color {
    /// Creates a new color from RGBA components.
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Parses a color string.
    ///
    /// Supported forms:
    /// - HEX: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`
    /// - `rgb(r, g, b)` with 0-255 channels
    /// - `rgba(r, g, b, a)` with 0-255 channels and 0-1 alpha
    pub fn parse(input: &str) -> Result<Self, ColorError> {
        let trimmed = input.trim();
        let malformed = || ColorError::Malformed(input.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(malformed);
        }

        let lower = trimmed.to_ascii_lowercase();
        let (args, expected) = if let Some(rest) = lower.strip_prefix("rgba") {
            (rest, 4)
        } else if let Some(rest) = lower.strip_prefix("rgb") {
            (rest, 3)
        } else {
            return Err(malformed());
        };

        let inner = args
            .trim()
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .ok_or_else(malformed)?;
        let parts: Vec<f64> = inner
            .split(',')
            .map(|part| part.trim().parse::<f64>())
            .collect::<Result<_, _>>()
            .map_err(|_| malformed())?;

        if parts.len() != expected || parts.iter().any(|v| !v.is_finite()) {
            return Err(malformed());
        }

        let channel = |v: f64| v.clamp(0.0, 255.0) / 255.0;
        let alpha = parts.get(3).copied().unwrap_or(1.0).clamp(0.0, 1.0);
        Ok(Self::new(
            channel(parts[0]),
            channel(parts[1]),
            channel(parts[2]),
            alpha,
        ))
    }

    /// Returns the same color with its alpha forced to 1.0.
    pub fn opaque(self) -> Self {
        Self { a: 1.0, ..self }
    }

    /// Formats the color as `rgba(r, g, b, a)` with 0-255 channels.
    pub fn to_rgba_string(&self) -> String {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "rgba({}, {}, {}, {})",
            to_byte(self.r),
            to_byte(self.g),
            to_byte(self.b),
            (self.a.clamp(0.0, 1.0) * 100.0).round() / 100.0
        )
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let nibble = |i: usize| u8::from_str_radix(&hex[i..=i], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    let unit = |v: u8| v as f64 / 255.0;

    let (r, g, b, a) = match hex.len() {
        3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
        4 => (nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?),
        6 => (byte(0)?, byte(2)?, byte(4)?, 255),
        8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
        _ => return None,
    };

    Some(Color::new(unit(r), unit(g), unit(b), unit(a)))
}

// ============================================================================
// Predefined Color Constants (highlighter palette)
// ============================================================================

/// Classic highlighter yellow (`#ffff00`)
pub const YELLOW: Color = Color {
    r: 1.0,
    g: 1.0,
    b: 0.0,
    a: 1.0,
};

/// Black, used as the draw color on extraction canvases
pub const BLACK: Color = Color {
    r: 0.0,
    g: 0.0,
    b: 0.0,
    a: 1.0,
};
