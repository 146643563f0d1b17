//! Drawing session state.
//!
//! Owns the strokes captured from pointer input, the regions loaded from a
//! previous export and the current tool settings, and drives the export and
//! import pipeline over them.

mod snapshot;

pub use snapshot::HistorySnapshot;


use crate::config::Config;
use crate::draw::{
    Canvas, Color, ColorError, Point, RenderError, Stroke, ToolKind, render_region, render_stroke,
    render_strokes,
};
use crate::erase::split_by_erasers;
use crate::export::{
    ExportData, ExportError, ExportOptions, Rectangle, compact_strokes, encode_export,
    parse_export, to_export,
};
use crate::extract::{ExtractionSettings, extract_regions};
use crate::region::{Region, RegionRecord};
use log::debug;
use std::slice;

/// In-progress highlighting over a `width × height` surface.
#[derive(Debug, Clone)]
pub struct HighlightSession {
    width: u32,
    height: u32,
    tool: ToolKind,
    color: String,
    brush_size: f64,
    eraser_size: f64,
    opacity: f64,
    strokes: Vec<Stroke>,
    active: Option<Stroke>,
    loaded_regions: Vec<RegionRecord>,
    extraction: ExtractionSettings,
    simplify_tolerance: f64,
    min_stroke_length: f64,
}

impl HighlightSession {
    /// Creates a session with default settings.
    pub fn new(width: u32, height: u32) -> Self {
        Self::from_config(width, height, &Config::default())
    }

    /// Creates a session using the drawing and extraction settings of `config`.
    pub fn from_config(width: u32, height: u32, config: &Config) -> Self {
        Self {
            width,
            height,
            tool: ToolKind::Highlight,
            color: config.drawing.default_color.clone(),
            brush_size: config.drawing.brush_size,
            eraser_size: config.drawing.eraser_size,
            opacity: config.drawing.opacity,
            strokes: Vec::new(),
            active: None,
            loaded_regions: Vec::new(),
            extraction: ExtractionSettings::from(&config.extraction),
            simplify_tolerance: config.extraction.simplify_tolerance,
            min_stroke_length: config.extraction.min_stroke_length,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn tool(&self) -> ToolKind {
        self.tool
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool = tool;
    }

    pub fn color(&self) -> &str {
        &self.color
    }

    /// Sets the highlighter color. The string is stored as given; it is only
    /// checked for being parseable.
    pub fn set_color(&mut self, color: &str) -> Result<(), ColorError> {
        Color::parse(color)?;
        self.color = color.to_string();
        Ok(())
    }

    pub fn brush_size(&self) -> f64 {
        self.brush_size
    }

    pub fn set_brush_size(&mut self, size: f64) {
        self.brush_size = size.max(1.0);
    }

    pub fn eraser_size(&self) -> f64 {
        self.eraser_size
    }

    pub fn set_eraser_size(&mut self, size: f64) {
        self.eraser_size = size.max(1.0);
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity.clamp(0.0, 1.0);
    }

    /// Finished strokes in drawing order.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    pub fn active_stroke(&self) -> Option<&Stroke> {
        self.active.as_ref()
    }

    pub fn loaded_regions(&self) -> &[RegionRecord] {
        &self.loaded_regions
    }

    /// Starts a stroke with the current tool. An unfinished stroke is finished first.
    pub fn begin_stroke(&mut self, point: Point) {
        if self.active.is_some() {
            self.end_stroke();
        }
        let stroke = match self.tool {
            ToolKind::Highlight => Stroke::highlight(&*self.color, self.brush_size, self.opacity),
            ToolKind::Erase => Stroke::eraser(self.eraser_size),
        };
        self.active = Some(stroke.with_points([point]));
    }

    pub fn extend_stroke(&mut self, point: Point) {
        if let Some(active) = self.active.as_mut() {
            active.points.push(point);
        }
    }

    /// Finishes the active stroke.
    ///
    /// An eraser stroke splits every existing highlight stroke around its
    /// samples and is then kept, so it also erases loaded regions.
    pub fn end_stroke(&mut self) {
        let Some(stroke) = self.active.take() else {
            return;
        };

        if stroke.is_eraser() {
            let eraser = slice::from_ref(&stroke);
            let before = self.strokes.len();
            self.strokes = self
                .strokes
                .iter()
                .flat_map(|existing| match existing.kind {
                    ToolKind::Highlight => split_by_erasers(existing, eraser),
                    ToolKind::Erase => vec![existing.clone()],
                })
                .collect();
            debug!(
                "Eraser stroke turned {} strokes into {}",
                before,
                self.strokes.len()
            );
        }

        self.strokes.push(stroke);
    }

    /// Drops all strokes and loaded regions.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.loaded_regions.clear();
        self.active = None;
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot::new(&self.strokes, &self.loaded_regions)
    }

    /// Replaces strokes and loaded regions with those of `snapshot`.
    pub fn restore(&mut self, snapshot: &HistorySnapshot) {
        self.strokes = snapshot.strokes().to_vec();
        self.loaded_regions = snapshot.loaded_regions().to_vec();
        self.active = None;
    }

    /// Compacts strokes and extracts regions from them and the loaded regions.
    pub fn regions(&self) -> Result<Vec<Region>, RenderError> {
        let strokes = compact_strokes(&self.strokes, self.simplify_tolerance, self.min_stroke_length);
        extract_regions(
            self.width,
            self.height,
            &strokes,
            &self.loaded_regions,
            &self.extraction,
        )
    }

    pub fn export_data(&self) -> Result<ExportData, RenderError> {
        Ok(to_export(self.width, self.height, &self.regions()?))
    }

    pub fn export_blob(&self, options: &ExportOptions) -> Result<String, ExportError> {
        encode_export(&self.export_data()?, options)
    }

    /// Loads a previously exported blob.
    ///
    /// Loaded regions are replaced and strokes cleared. A session without a
    /// size adopts the size recorded in the export.
    pub fn import_blob(&mut self, blob: &str) -> Result<(), ExportError> {
        let export = parse_export(blob)?;
        if self.width == 0 || self.height == 0 {
            self.width = export.width;
            self.height = export.height;
        }
        debug!(
            "Imported {} regions (version {}, compressed: {})",
            export.regions.len(),
            export.version,
            export.compressed
        );
        self.loaded_regions = export.regions;
        self.strokes.clear();
        self.active = None;
        Ok(())
    }

    pub fn rectangles(&self) -> Result<Vec<Rectangle>, RenderError> {
        Ok(self
            .regions()?
            .iter()
            .map(|region| Rectangle::from_region(region, self.width, self.height))
            .collect())
    }

    /// Draws loaded regions, then strokes, then the active stroke onto `canvas`.
    pub fn render(&self, canvas: &Canvas) -> Result<(), RenderError> {
        canvas.clear()?;
        let (width, height) = (canvas.width(), canvas.height());
        for region in &self.loaded_regions {
            render_region(canvas, region, width, height)?;
        }
        render_strokes(canvas, &self.strokes)?;
        if let Some(active) = &self.active {
            render_stroke(canvas, active)?;
        }
        Ok(())
    }
}
