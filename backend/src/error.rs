//! Error types for the timetable engine.

use thiserror::Error;

/// Result type for timetable operations
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors that can occur while turning schedule data into a document.
#[derive(Error, Debug)]
pub enum TimetableError {
    /// The request carries nothing the layout can be computed from
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A timestamp could not be parsed
    #[error("Invalid timestamp in {field}: '{value}'")]
    InvalidTimestamp { field: String, value: String },

    /// The hour range has no rows to subdivide
    #[error("Degenerate hour range: {min_hour}..{max_hour}")]
    DegenerateHourRange { min_hour: u32, max_hour: u32 },

    /// Every session was dropped before placement
    #[error(
        "No session could be placed on the grid: {hidden_days} on hidden weekdays, \
         {before_first_week} before the first session's week"
    )]
    NoPlaceableSessions {
        hidden_days: usize,
        before_first_week: usize,
    },

    /// The grid has no week columns to draw
    #[error("Grid has no week columns")]
    EmptyGrid,

    /// The drawing backend failed to produce the document
    #[error("Document backend error: {0}")]
    Surface(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// I/O error (config files)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl TimetableError {
    /// Create an `InvalidTimestamp` error for the given field.
    pub fn invalid_timestamp(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self::InvalidTimestamp {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Whether the error was caused by the submitted data rather than the server.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput(_)
                | Self::InvalidTimestamp { .. }
                | Self::DegenerateHourRange { .. }
                | Self::NoPlaceableSessions { .. }
                | Self::EmptyGrid
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        assert!(TimetableError::InvalidInput("no terms".into()).is_client_error());
        assert!(TimetableError::invalid_timestamp("terms[0].start", "x").is_client_error());
        assert!(TimetableError::DegenerateHourRange { min_hour: 9, max_hour: 9 }.is_client_error());
        assert!(TimetableError::EmptyGrid.is_client_error());
        assert!(TimetableError::NoPlaceableSessions { hidden_days: 1, before_first_week: 1 }
            .is_client_error());
        assert!(!TimetableError::Surface("boom".into()).is_client_error());
        assert!(!TimetableError::Configuration("bad".into()).is_client_error());
    }

    #[test]
    fn test_no_placeable_sessions_message() {
        let err = TimetableError::NoPlaceableSessions {
            hidden_days: 1,
            before_first_week: 1,
        };
        assert_eq!(
            err.to_string(),
            "No session could be placed on the grid: 1 on hidden weekdays, 1 before the first session's week"
        );
    }

    #[test]
    fn test_invalid_timestamp_message() {
        let err = TimetableError::invalid_timestamp("terms[2].finish", "tomorrow");
        assert_eq!(err.to_string(), "Invalid timestamp in terms[2].finish: 'tomorrow'");
    }
}
