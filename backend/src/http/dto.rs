//! Request and response bodies of the HTTP API.

use serde::{Deserialize, Serialize};

pub use crate::models::{CourseRecord, RenderRequest, TermRecord, YearPlanTermRecord};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
}

/// Attachment name of the generated document.
pub const PDF_FILENAME: &str = "semester_plan.pdf";
