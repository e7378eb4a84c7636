//! Timestamp parsing and the date formats printed on the timetable.
//!
//! Timestamps are kept as wall-clock `NaiveDateTime`: the hour printed on the
//! grid is the hour written in the request, whatever offset it carries.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike};

use crate::error::{Result, TimetableError};

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 timestamp into its wall-clock date and time.
///
/// `field` names the offending record in the error (e.g. `terms[3].start`).
pub fn parse_timestamp(value: &str, field: &str) -> Result<NaiveDateTime> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_local());
    }

    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| TimetableError::invalid_timestamp(field, value))
}

/// Hour of the timestamp, rounded up when any minute or second is set.
pub fn ceil_hour(ts: &NaiveDateTime) -> u32 {
    let partial = ts.minute() != 0 || ts.second() != 0 || ts.nanosecond() != 0;
    ts.hour() + u32::from(partial)
}

/// Exact length of `start..finish` in hours.
pub fn duration_hours(start: &NaiveDateTime, finish: &NaiveDateTime) -> f64 {
    (*finish - *start).num_milliseconds() as f64 / 3_600_000.0
}

/// `DD.MM`, used for the per-cell date labels.
pub fn format_day_month(date: &NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

/// `DD.MM.YYYY`, used in the footer.
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// `HH:MM`, used for the time range inside tall session blocks.
pub fn format_time(ts: &NaiveDateTime) -> String {
    ts.format("%H:%M").to_string()
}
