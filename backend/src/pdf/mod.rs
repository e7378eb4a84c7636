//! PDF output.
//!
//! [`PdfSurface`] renders the timetable into a single A4 page using the
//! built-in Helvetica faces; [`metrics`] supplies their advance widths so text
//! can be measured without embedding a font.

pub mod metrics;
pub mod surface;

pub use surface::PdfSurface;
