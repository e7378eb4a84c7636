//! `printpdf` backend for the drawing surface.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, LineDashPattern, Mm, PdfDocument,
    PdfDocumentReference, PdfLayerReference, Point, Rect as PdfRect, Rgb as PdfRgb,
};

use super::metrics;
use crate::error::{Result, TimetableError};
use crate::timetable::surface::{DrawingSurface, FontStyle, PageSize, Rect, Rgb, TextAlign};

/// Stroke width matching the 0.2 mm hairline of the printed plans, in points.
const LINE_THICKNESS_PT: f32 = 0.57;
/// Dash and gap length of hour sub-lines, in points.
const DASH_PT: i64 = 3;

/// Single-page PDF document drawn in top-left millimetre coordinates.
pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    page: PageSize,
    font: (FontStyle, f64),
}

impl PdfSurface {
    /// # Errors
    /// `Surface` when the built-in fonts cannot be registered.
    pub fn new(title: &str, page: PageSize) -> Result<Self> {
        let (doc, page_index, layer_index) = PdfDocument::new(
            title,
            Mm(page.width as f32),
            Mm(page.height as f32),
            "Timetable",
        );
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| TimetableError::Surface(format!("Failed to load Helvetica: {}", e)))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| TimetableError::Surface(format!("Failed to load Helvetica-Bold: {}", e)))?;
        let layer = doc.get_page(page_index).get_layer(layer_index);
        layer.set_outline_thickness(LINE_THICKNESS_PT);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            page,
            font: (FontStyle::Normal, 10.0),
        })
    }

    fn point(&self, x: f64, y: f64) -> Point {
        Point::new(Mm(x as f32), Mm((self.page.height - y) as f32))
    }

    fn color(color: Rgb) -> Color {
        Color::Rgb(PdfRgb::new(
            f32::from(color.0) / 255.0,
            f32::from(color.1) / 255.0,
            f32::from(color.2) / 255.0,
            None,
        ))
    }
}

impl DrawingSurface for PdfSurface {
    type Output = Vec<u8>;

    fn page_size(&self) -> PageSize {
        self.page
    }

    fn set_font(&mut self, style: FontStyle, size_pt: f64) {
        self.font = (style, size_pt);
    }

    fn text(&mut self, text: &str, x: f64, y: f64, align: TextAlign) {
        if text.is_empty() {
            return;
        }
        let x = match align {
            TextAlign::Left => x,
            TextAlign::Right => x - self.text_width(text),
        };
        let font = match self.font.0 {
            FontStyle::Normal => &self.regular,
            FontStyle::Bold => &self.bold,
        };
        self.layer.use_text(
            text,
            self.font.1 as f32,
            Mm(x as f32),
            Mm((self.page.height - y) as f32),
            font,
        );
    }

    fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.layer.add_line(Line {
            points: vec![(self.point(x1, y1), false), (self.point(x2, y2), false)],
            is_closed: false,
        });
    }

    fn rect(&mut self, rect: Rect) {
        let top = self.page.height - rect.y;
        let bottom = top - rect.height;
        let right = rect.x + rect.width;
        let shape = PdfRect::new(
            Mm(rect.x.min(right) as f32),
            Mm(bottom.min(top) as f32),
            Mm(rect.x.max(right) as f32),
            Mm(bottom.max(top) as f32),
        )
        .with_mode(PaintMode::FillStroke);
        self.layer.add_rect(shape);
    }

    fn set_fill_color(&mut self, color: Rgb) {
        self.layer.set_fill_color(Self::color(color));
    }

    fn set_stroke_color(&mut self, color: Rgb) {
        self.layer.set_outline_color(Self::color(color));
    }

    fn set_dashed(&mut self, dashed: bool) {
        let pattern = if dashed {
            LineDashPattern {
                dash_1: Some(DASH_PT),
                gap_1: Some(DASH_PT),
                ..Default::default()
            }
        } else {
            LineDashPattern::default()
        };
        self.layer.set_line_dash_pattern(pattern);
    }

    fn text_width(&self, text: &str) -> f64 {
        metrics::text_width(text, self.font.0, self.font.1)
    }

    fn finish(self) -> Result<Vec<u8>> {
        self.doc
            .save_to_bytes()
            .map_err(|e| TimetableError::Surface(format!("Failed to serialize PDF: {}", e)))
    }
}
