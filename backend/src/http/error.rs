//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::TimetableError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// Unknown route
    NotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Internal server error
    Internal(String),
    /// Normalization or rendering error
    Timetable(TimetableError),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg)),
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            AppError::Timetable(e) => {
                let (status, code) = if e.is_client_error() {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST")
                } else {
                    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
                };
                let mut error = ApiError::new(code, e.to_string());
                if let TimetableError::InvalidTimestamp { field, .. } = e {
                    error = error.with_details(field);
                }
                (status, error)
            }
        };

        (status, Json(error)).into_response()
    }
}

impl From<TimetableError> for AppError {
    fn from(err: TimetableError) -> Self {
        AppError::Timetable(err)
    }
}
