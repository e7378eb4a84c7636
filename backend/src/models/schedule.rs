// ============================================================================
// Schedule records
// ============================================================================
//
// Wire records mirror the JSON submitted by the planning frontend (camelCase,
// timestamps as strings). Domain records carry parsed timestamps and are what
// the normalizer consumes.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::time::parse_timestamp;
use crate::error::{Result, TimetableError};

/// Complete render request as submitted over HTTP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    pub terms: Vec<TermRecord>,
    pub course: CourseRecord,
    #[serde(default)]
    pub year_plan_terms: Vec<YearPlanTermRecord>,
}

/// One scheduled class meeting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TermRecord {
    pub name: String,
    #[serde(default)]
    pub id: String,
    pub start: String,
    pub finish: String,
    #[serde(default)]
    pub rooms: String,
}

/// A holiday or other break from the year plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearPlanTermRecord {
    #[serde(default)]
    pub id: String,
    pub start: String,
    pub finish: String,
}

/// Course metadata shown in the footer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseRecord {
    pub name: String,
    pub start: String,
    pub finish: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class_name: Option<String>,
}

/// A scheduled class meeting with parsed timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub name: String,
    pub identifier: String,
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
    pub location: String,
}

/// A contiguous span to shade across every visible day it touches.
#[derive(Debug, Clone, PartialEq)]
pub struct BreakPeriod {
    pub identifier: String,
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CourseInfo {
    pub name: String,
    pub start: NaiveDateTime,
    pub finish: NaiveDateTime,
    pub class_label: Option<String>,
}

/// Parsed render request.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleInput {
    pub sessions: Vec<Session>,
    pub break_periods: Vec<BreakPeriod>,
    pub course: CourseInfo,
}

impl RenderRequest {
    /// Parse every timestamp of the request.
    ///
    /// # Errors
    /// `InvalidInput` when no terms are given, `InvalidTimestamp` naming the
    /// first field that does not parse.
    pub fn into_input(self) -> Result<ScheduleInput> {
        if self.terms.is_empty() {
            return Err(TimetableError::InvalidInput(
                "at least one term is required".to_string(),
            ));
        }

        let sessions = self
            .terms
            .into_iter()
            .enumerate()
            .map(|(i, term)| -> Result<Session> {
                Ok(Session {
                    start: parse_timestamp(&term.start, &format!("terms[{i}].start"))?,
                    finish: parse_timestamp(&term.finish, &format!("terms[{i}].finish"))?,
                    name: term.name,
                    identifier: term.id,
                    location: term.rooms,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let break_periods = self
            .year_plan_terms
            .into_iter()
            .enumerate()
            .map(|(i, term)| -> Result<BreakPeriod> {
                Ok(BreakPeriod {
                    start: parse_timestamp(&term.start, &format!("yearPlanTerms[{i}].start"))?,
                    finish: parse_timestamp(&term.finish, &format!("yearPlanTerms[{i}].finish"))?,
                    identifier: term.id,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let course = CourseInfo {
            start: parse_timestamp(&self.course.start, "course.start")?,
            finish: parse_timestamp(&self.course.finish, "course.finish")?,
            name: self.course.name,
            class_label: self.course.class_name.filter(|s| !s.trim().is_empty()),
        };

        Ok(ScheduleInput {
            sessions,
            break_periods,
            course,
        })
    }
}
