//! Pointer-path strokes captured by the highlighter and eraser tools.

use serde::{Deserialize, Serialize};

/// A pixel-space pointer sample.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Which tool produced a stroke.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    /// Paints color
    #[default]
    #[serde(rename = "highlighter", alias = "highlight")]
    Highlight,
    /// Removes previously painted color
    #[serde(rename = "eraser", alias = "erase")]
    Erase,
}

/// One continuous pointer path (pointer-down to pointer-up).
///
/// Strokes are never mutated once finished; splitting and simplification
/// produce new strokes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Color string; grouping compares this literally
    pub color: String,
    /// Line width in pixels
    pub size: f64,
    /// Display opacity (0.0-1.0)
    pub opacity: f64,
    /// Tool that produced the stroke
    #[serde(rename = "type", default)]
    pub kind: ToolKind,
    /// Samples in capture order
    pub points: Vec<Point>,
    /// Stroke approximates a loaded region and renders as a chain of dots
    #[serde(rename = "isFromRegion", default, skip_serializing_if = "std::ops::Not::not")]
    pub from_region: bool,
}

impl Stroke {
    /// Creates an empty highlight stroke.
    pub fn highlight(color: impl Into<String>, size: f64, opacity: f64) -> Self {
        Self {
            color: color.into(),
            size,
            opacity,
            kind: ToolKind::Highlight,
            points: Vec::new(),
            from_region: false,
        }
    }

    /// Creates an empty eraser stroke.
    pub fn eraser(size: f64) -> Self {
        Self {
            color: String::new(),
            size,
            opacity: 1.0,
            kind: ToolKind::Erase,
            points: Vec::new(),
            from_region: false,
        }
    }

    /// Builder-style helper to attach points.
    pub fn with_points(mut self, points: impl IntoIterator<Item = Point>) -> Self {
        self.points = points.into_iter().collect();
        self
    }

    /// Copy of this stroke carrying a different point list.
    pub fn with_same_style(&self, points: Vec<Point>) -> Self {
        Self {
            color: self.color.clone(),
            size: self.size,
            opacity: self.opacity,
            kind: self.kind,
            points,
            from_region: self.from_region,
        }
    }

    pub fn is_eraser(&self) -> bool {
        self.kind == ToolKind::Erase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stroke_wire_names_follow_export_format() {
        let stroke = Stroke::highlight("#ff0000", 10.0, 0.5)
            .with_points([Point::new(0.0, 0.0), Point::new(0.0, 50.0)]);
        let json = serde_json::to_value(&stroke).unwrap();
        assert_eq!(json["type"], "highlighter");
        assert!(json.get("isFromRegion").is_none());

        let parsed: Stroke = serde_json::from_str(
            r##"{"color":"#000","size":4,"opacity":1,"type":"erase","points":[],"isFromRegion":true}"##,
        )
        .unwrap();
        assert_eq!(parsed.kind, ToolKind::Erase);
        assert!(parsed.from_region);
    }

    #[test]
    fn with_same_style_keeps_everything_but_points() {
        let stroke = Stroke::highlight("#00ff00", 8.0, 0.4).with_points([Point::new(1.0, 1.0)]);
        let copy = stroke.with_same_style(vec![Point::new(2.0, 2.0), Point::new(3.0, 3.0)]);
        assert_eq!(copy.color, stroke.color);
        assert_eq!(copy.size, 8.0);
        assert_eq!(copy.opacity, 0.4);
        assert_eq!(copy.points.len(), 2);
    }
}
