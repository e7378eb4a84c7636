//! Text metrics for the built-in Helvetica faces.
//!
//! Advance widths are the standard Adobe AFM values (1/1000 em) for the
//! printable ASCII range; anything else falls back to the width of a digit.

use crate::timetable::surface::FontStyle;

const PT_TO_MM: f64 = 25.4 / 72.0;
const FALLBACK_WIDTH: u16 = 556;

#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

fn glyph_width(c: char, style: FontStyle) -> u16 {
    let table = match style {
        FontStyle::Normal => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
    };
    (c as usize)
        .checked_sub(32)
        .and_then(|i| table.get(i))
        .copied()
        .unwrap_or(FALLBACK_WIDTH)
}

/// Rendered width of `text` in millimetres at `size_pt`.
pub fn text_width(text: &str, style: FontStyle, size_pt: f64) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(glyph_width(c, style))).sum();
    f64::from(units) / 1000.0 * size_pt * PT_TO_MM
}
