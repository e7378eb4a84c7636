//! Schedule normalizer.
//!
//! Turns parsed sessions and break periods into grid coordinates: a zero-based
//! week column, a weekday row, and hour bounds. Nothing here draws.

use chrono::{NaiveDate, NaiveDateTime, Timelike};
use log::{debug, warn};

use super::week::{ceil_weeks, WeekModel};
use crate::error::{Result, TimetableError};
use crate::models::{ceil_hour, duration_hours, BreakPeriod, Session};

/// Earliest and latest timestamp across all sessions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub earliest: NaiveDateTime,
    pub latest: NaiveDateTime,
}

/// A session placed on the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedSession {
    pub name: String,
    pub location: String,
    /// Zero-based week column.
    pub week_index: u32,
    /// Monday=1 .. last visible day.
    pub day_of_week: u32,
    /// Hour of the start, truncated.
    pub start_hour: u32,
    pub duration_hours: f64,
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
}

/// Hour range and week count of the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridBounds {
    pub min_hour: u32,
    pub max_hour: u32,
    pub week_count: u32,
}

impl GridBounds {
    /// Number of hour bands per weekday row.
    pub fn hours_per_row(&self) -> u32 {
        self.max_hour.saturating_sub(self.min_hour)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedSchedule {
    pub sessions: Vec<PositionedSession>,
    pub bounds: GridBounds,
    pub dropped_hidden_days: usize,
    pub dropped_before_anchor: usize,
}

/// One shaded day of a break period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionedBreakSpan {
    /// `ceil(days since grid start / 7)`; drawn in column `week_index - 1`.
    pub week_index: u32,
    pub day_of_week: u32,
    pub date: NaiveDate,
    pub start_hour: u32,
    pub finish_hour: u32,
}

/// Chronological extent of all session timestamps.
///
/// # Errors
/// `InvalidInput` for an empty session list.
pub fn compute_date_range(sessions: &[Session]) -> Result<DateRange> {
    let mut stamps: Vec<NaiveDateTime> = sessions
        .iter()
        .flat_map(|s| [s.start, s.finish])
        .collect();
    stamps.sort();

    match (stamps.first(), stamps.last()) {
        (Some(earliest), Some(latest)) => Ok(DateRange {
            earliest: *earliest,
            latest: *latest,
        }),
        _ => Err(TimetableError::InvalidInput(
            "cannot compute a date range without sessions".to_string(),
        )),
    }
}

/// Place every session on the week/day grid and derive the grid bounds.
///
/// Weeks are counted from the first session in input order, not the
/// chronologically earliest one.
///
/// # Errors
/// - `InvalidInput` for an empty session list
/// - `DegenerateHourRange` when the latest finish hour is not after the earliest start hour
/// - `NoPlaceableSessions` when every session is on a hidden weekday or before
///   the first session's week
pub fn normalize_sessions(sessions: &[Session], week: &WeekModel) -> Result<NormalizedSchedule> {
    let anchor = sessions.first().ok_or_else(|| {
        TimetableError::InvalidInput("cannot normalize an empty session list".to_string())
    })?;
    let anchor_boundary = WeekModel::week_boundary(&anchor.start.date());

    let mut min_hour = u32::MAX;
    let mut max_hour = 0;
    let mut positioned = Vec::with_capacity(sessions.len());
    let mut dropped_hidden_days = 0;
    let mut dropped_before_anchor = 0;

    for session in sessions {
        min_hour = min_hour.min(session.start.hour());
        max_hour = max_hour.max(ceil_hour(&session.finish));

        let day_of_week = WeekModel::day_of_week(&session.start.date());
        if !week.is_visible(day_of_week) {
            dropped_hidden_days += 1;
            continue;
        }

        let boundary = WeekModel::week_boundary(&session.start.date());
        let week_index = ceil_weeks((boundary - anchor_boundary).num_days());
        if week_index < 0 {
            warn!(
                "Dropping session '{}' at {}: before the first session's week",
                session.name, session.start
            );
            dropped_before_anchor += 1;
            continue;
        }

        positioned.push(PositionedSession {
            name: session.name.clone(),
            location: session.location.clone(),
            week_index: week_index as u32,
            day_of_week,
            start_hour: session.start.hour(),
            duration_hours: duration_hours(&session.start, &session.finish),
            start: session.start,
            finish: session.finish,
        });
    }

    if min_hour >= max_hour {
        return Err(TimetableError::DegenerateHourRange { min_hour, max_hour });
    }

    let week_count = positioned
        .iter()
        .map(|s| s.week_index + 1)
        .max()
        .ok_or(TimetableError::NoPlaceableSessions {
            hidden_days: dropped_hidden_days,
            before_first_week: dropped_before_anchor,
        })?;

    debug!(
        "Normalized {} sessions into {} weeks, hours {}..{} ({} hidden-day, {} pre-anchor dropped)",
        positioned.len(),
        week_count,
        min_hour,
        max_hour,
        dropped_hidden_days,
        dropped_before_anchor
    );

    Ok(NormalizedSchedule {
        sessions: positioned,
        bounds: GridBounds {
            min_hour,
            max_hour,
            week_count,
        },
        dropped_hidden_days,
        dropped_before_anchor,
    })
}

/// Monday-aligned start and last-visible-day-aligned end of the date range.
pub fn grid_span(range: &DateRange, week: &WeekModel) -> (NaiveDate, NaiveDate) {
    (
        WeekModel::week_start(&range.earliest.date()),
        week.week_end(&range.latest.date()),
    )
}

/// Split break periods into one shaded span per visible day.
///
/// The week index is `ceil(days since grid_start / 7)`, so `grid_start`
/// itself gets index 0 and is dropped, the rest of the first week is 1 and
/// a later Monday shares the index of the week before it. Days outside
/// `grid_start..=grid_end` are clipped.
pub fn normalize_break_periods(
    periods: &[BreakPeriod],
    grid_start: NaiveDate,
    grid_end: NaiveDate,
    min_hour: u32,
    max_hour: u32,
    week: &WeekModel,
) -> Vec<PositionedBreakSpan> {
    periods
        .iter()
        .flat_map(|period| {
            let first = period.start.date().max(grid_start);
            let last = period.finish.date().min(grid_end);
            first.iter_days().take_while(move |d| *d <= last)
        })
        .filter_map(|date| {
            let day_of_week = WeekModel::day_of_week(&date);
            let week_index = ceil_weeks((date - grid_start).num_days());
            let keep = week.is_visible(day_of_week) && week_index >= 1;

            keep.then_some(PositionedBreakSpan {
                week_index: week_index as u32,
                day_of_week,
                date,
                start_hour: min_hour,
                finish_hour: max_hour,
            })
        })
        .collect()
}

/// Visible dates of the grid, in the order the date labels are assigned.
pub fn date_strip(grid_start: NaiveDate, grid_end: NaiveDate, week: &WeekModel) -> Vec<NaiveDate> {
    week.visible_dates(grid_start, grid_end)
}
