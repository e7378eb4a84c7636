//! Drawing-surface capability consumed by the grid renderer.
//!
//! All coordinates are millimetres with the origin at the top-left corner of
//! the page; text is positioned by its baseline.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::pdf::metrics;

/// Page dimensions in millimetres.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4_LANDSCAPE: PageSize = PageSize {
        width: 297.0,
        height: 210.0,
    };
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FontStyle {
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Right,
}

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const BLACK: Rgb = Rgb(0, 0, 0);
}

/// Axis-aligned rectangle; `y` is the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }
}

/// Minimal set of drawing operations the renderer needs.
pub trait DrawingSurface {
    /// What `finish` produces (document bytes, a command log, ...).
    type Output;

    fn page_size(&self) -> PageSize;

    fn set_font(&mut self, style: FontStyle, size_pt: f64);

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign);

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64);

    /// Filled and stroked rectangle using the current colours.
    fn rect(&mut self, rect: Rect);

    fn set_fill_color(&mut self, color: Rgb);

    fn set_stroke_color(&mut self, color: Rgb);

    fn set_dashed(&mut self, dashed: bool);

    /// Width of `text` in the current font, in millimetres.
    fn text_width(&self, text: &str) -> f64;

    fn finish(self) -> Result<Self::Output>;
}

/// One recorded drawing call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    SetFont { style: FontStyle, size_pt: f64 },
    Text { text: String, x: f64, y: f64, align: TextAlign },
    Line { x1: f64, y1: f64, x2: f64, y2: f64 },
    Rect(Rect),
    FillColor(Rgb),
    StrokeColor(Rgb),
    Dashed(bool),
}

/// In-memory surface that keeps every call, for geometry assertions.
#[derive(Debug, Clone)]
pub struct RecordingSurface {
    page: PageSize,
    font: (FontStyle, f64),
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    pub fn new(page: PageSize) -> Self {
        Self {
            page,
            font: (FontStyle::Normal, 10.0),
            commands: Vec::new(),
        }
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Every rectangle in drawing order.
    pub fn rects(&self) -> Vec<Rect> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Rect(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    /// Every text call as `(text, x, y)`.
    pub fn texts(&self) -> Vec<(String, f64, f64)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, x, y, .. } => Some((text.clone(), *x, *y)),
                _ => None,
            })
            .collect()
    }
}

impl DrawingSurface for RecordingSurface {
    type Output = Vec<DrawCommand>;

    fn page_size(&self) -> PageSize {
        self.page
    }

    fn set_font(&mut self, style: FontStyle, size_pt: f64) {
        self.font = (style, size_pt);
        self.commands.push(DrawCommand::SetFont { style, size_pt });
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            x,
            y,
            align,
        });
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.commands.push(DrawCommand::Line { x1, y1, x2, y2 });
    }

    fn rect(&mut self, rect: Rect) {
        self.commands.push(DrawCommand::Rect(rect));
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::FillColor(color));
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::StrokeColor(color));
    }

    fn set_dashed(&mut self, dashed: bool) {
        self.commands.push(DrawCommand::Dashed(dashed));
    }

    fn text_width(&self, text: &str) -> f64 {
        metrics::text_width(text, self.font.0, self.font.1)
    }

    fn finish(self) -> Result<Self::Output> {
        Ok(self.commands)
    }
}
