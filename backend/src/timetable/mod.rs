//! Timetable layout engine.
//!
//! ```text
//! Session / BreakPeriod ──► normalizer ──► NormalizedSchedule + break spans
//!                                                  │
//!                                                  ▼
//!                            renderer (GridGeometry) ──► DrawingSurface
//! ```
//!
//! The normalizer is pure data transformation; the renderer only issues
//! drawing calls. Both are stateless and can run concurrently on independent
//! inputs.

pub mod layout;
pub mod normalizer;
pub mod renderer;
pub mod surface;
pub mod week;

#[cfg(test)]
mod renderer_tests;

pub use layout::{GridGeometry, LabelDetail, LayoutConfig};
pub use normalizer::{
    compute_date_range, date_strip, grid_span, normalize_break_periods, normalize_sessions,
    DateRange, GridBounds, NormalizedSchedule, PositionedBreakSpan, PositionedSession,
};
pub use renderer::{GridRenderer, LabelConfig, RenderInput, RenderSummary};
pub use surface::{DrawCommand, DrawingSurface, FontStyle, PageSize, Rect, RecordingSurface, Rgb, TextAlign};
pub use week::WeekModel;
