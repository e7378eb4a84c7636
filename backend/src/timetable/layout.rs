//! Grid geometry.
//!
//! `LayoutConfig` holds the fixed page measurements; `GridGeometry` combines
//! them with the page size and the data-driven bounds into the numbers every
//! drawing step needs.

use serde::{Deserialize, Serialize};

use super::normalizer::{GridBounds, PositionedBreakSpan, PositionedSession};
use super::surface::{PageSize, Rect, Rgb};
use crate::error::{Result, TimetableError};

pub const SESSION_FILL: Rgb = Rgb(255, 255, 100);
pub const BREAK_FILL: Rgb = Rgb(255, 200, 200);
pub const SUBLINE_STROKE: Rgb = Rgb(150, 150, 150);

/// Block height above which the location gets its own line.
pub const LOCATION_LINE_MIN_HEIGHT: f64 = 5.0;
/// Block height above which the time range is printed as well.
pub const TIME_RANGE_MIN_HEIGHT: f64 = 9.0;

/// Page measurements in millimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Left/right page margin; also the grid's x origin.
    pub margin: f64,
    /// Top edge of the first weekday row.
    pub top_margin: f64,
    /// Vertical distance between consecutive weekday rows.
    pub row_pitch: f64,
    /// Height of the hour-banded part of a row.
    pub row_height: f64,
    /// Height of the date strip above each row.
    pub header_gap: f64,
    pub day_label_x: f64,
    /// Right edge of the left-hand hour labels.
    pub hour_label_left_x: f64,
    /// Distance of the footer baseline from the bottom edge.
    pub footer_offset: f64,
    /// Gap on the left of session blocks.
    pub block_inset: f64,
    pub day_label_size: f64,
    pub date_label_size: f64,
    pub hour_label_size: f64,
    pub session_label_size: f64,
    pub time_range_size: f64,
    pub footer_size: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin: 15.0,
            top_margin: 15.0,
            row_pitch: 30.0,
            row_height: 27.0,
            header_gap: 2.0,
            day_label_x: 2.0,
            hour_label_left_x: 13.0,
            footer_offset: 10.0,
            block_inset: 1.0,
            day_label_size: 7.0,
            date_label_size: 4.0,
            hour_label_size: 5.0,
            session_label_size: 5.0,
            time_range_size: 4.0,
            footer_size: 10.0,
        }
    }
}

/// How much text fits into a session block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelDetail {
    /// Name with the location packed inline.
    Compact,
    /// Name, location below.
    WithLocation,
    /// Name, location, and time range.
    WithTimeRange,
}

impl LabelDetail {
    pub fn for_height(height: f64) -> Self {
        if height > TIME_RANGE_MIN_HEIGHT {
            Self::WithTimeRange
        } else if height > LOCATION_LINE_MIN_HEIGHT {
            Self::WithLocation
        } else {
            Self::Compact
        }
    }
}

/// Resolved grid measurements for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub origin_x: f64,
    pub origin_y: f64,
    pub column_width: f64,
    pub row_pitch: f64,
    pub row_height: f64,
    pub header_gap: f64,
    pub hour_height: f64,
    pub block_inset: f64,
    pub min_hour: u32,
    pub week_count: u32,
}

impl GridGeometry {
    /// # Errors
    /// `DegenerateHourRange` when `min_hour >= max_hour`, `EmptyGrid` for zero weeks.
    pub fn new(page: PageSize, layout: &LayoutConfig, bounds: &GridBounds) -> Result<Self> {
        if bounds.min_hour >= bounds.max_hour {
            return Err(TimetableError::DegenerateHourRange {
                min_hour: bounds.min_hour,
                max_hour: bounds.max_hour,
            });
        }
        if bounds.week_count == 0 {
            return Err(TimetableError::EmptyGrid);
        }

        Ok(Self {
            origin_x: layout.margin,
            origin_y: layout.top_margin,
            column_width: (page.width - 2.0 * layout.margin) / f64::from(bounds.week_count),
            row_pitch: layout.row_pitch,
            row_height: layout.row_height,
            header_gap: layout.header_gap,
            hour_height: layout.row_height / f64::from(bounds.hours_per_row()),
            block_inset: layout.block_inset,
            min_hour: bounds.min_hour,
            week_count: bounds.week_count,
        })
    }

    /// Right edge of the last week column.
    pub fn grid_right(&self) -> f64 {
        self.origin_x + f64::from(self.week_count) * self.column_width
    }

    /// Top edge of the hour bands of a weekday row (Monday=1).
    pub fn row_top(&self, day_of_week: u32) -> f64 {
        self.origin_y + f64::from(day_of_week.saturating_sub(1)) * self.row_pitch
    }

    pub fn column_left(&self, week_index: u32) -> f64 {
        self.origin_x + f64::from(week_index) * self.column_width
    }

    /// Block of a session. `None` when the geometry is not finite or the
    /// session finishes before it starts.
    pub fn session_rect(&self, session: &PositionedSession) -> Option<Rect> {
        let hour_offset = f64::from(session.start_hour) - f64::from(self.min_hour);
        let rect = Rect {
            x: self.column_left(session.week_index) + self.block_inset,
            y: self.row_top(session.day_of_week) + hour_offset * self.hour_height,
            width: self.column_width - self.block_inset,
            height: self.hour_height * session.duration_hours,
        };
        (rect.is_finite() && rect.height >= 0.0).then_some(rect)
    }

    /// Shaded cell of a break day. `None` when its column is outside the grid.
    pub fn break_rect(&self, span: &PositionedBreakSpan) -> Option<Rect> {
        if span.week_index == 0 || span.week_index > self.week_count {
            return None;
        }
        let rect = Rect {
            x: self.column_left(span.week_index - 1),
            y: self.row_top(span.day_of_week),
            width: self.column_width,
            height: self.row_height,
        };
        rect.is_finite().then_some(rect)
    }
}
