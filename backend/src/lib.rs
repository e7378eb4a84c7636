//! # Semester Timetable
//!
//! Renders a semester's course sessions as a printable weekly-grid PDF.
//!
//! A request lists the scheduled sessions (terms), the academic break
//! periods (year-plan terms) and the course the plan belongs to. Sessions are
//! normalized into week/day/hour grid positions, then drawn one column per
//! week and one row per weekday on an A4 landscape page, with break days
//! shaded and a footer naming the course.
//!
//! ## Architecture
//!
//! - [`models`]: wire records, domain records and timestamp handling
//! - [`timetable`]: week model, normalizer, layout geometry and grid renderer
//! - [`pdf`]: `printpdf` drawing surface and Helvetica text metrics
//! - [`services`]: the end-to-end render pipeline
//! - [`config`]: TOML configuration with environment overrides
//! - [`http`]: Axum-based HTTP server and request handlers
//!
//! ## Example
//!
//! ```no_run
//! use chrono::Local;
//! use semester_timetable::config::AppConfig;
//! use semester_timetable::services::render_json_request;
//!
//! let body = std::fs::read_to_string("request.json")?;
//! let document = render_json_request(&body, &AppConfig::default(), Local::now().date_naive())?;
//! std::fs::write("semester_plan.pdf", &document.bytes)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod pdf;
pub mod services;
pub mod timetable;

#[cfg(feature = "http-server")]
pub mod http;

pub use error::{Result, TimetableError};
