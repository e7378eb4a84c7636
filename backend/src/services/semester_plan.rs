//! Semester plan rendering pipeline.
//!
//! date range → session normalization → grid span → break spans → date strip
//! → [`GridRenderer`] → document bytes.

use chrono::NaiveDate;
use log::{debug, info, warn};

use crate::config::AppConfig;
use crate::error::{Result, TimetableError};
use crate::models::{RenderRequest, ScheduleInput};
use crate::pdf::PdfSurface;
use crate::timetable::{
    compute_date_range, date_strip, grid_span, normalize_break_periods, normalize_sessions,
    DrawingSurface, GridRenderer, NormalizedSchedule, PositionedBreakSpan, RenderInput,
    RenderSummary,
};

/// A finished document and what went into it.
#[derive(Debug, Clone)]
pub struct RenderedDocument {
    pub bytes: Vec<u8>,
    pub summary: RenderSummary,
}

/// Render model built from one schedule, ready to be drawn.
#[derive(Debug, Clone)]
pub struct PreparedRender {
    pub schedule: NormalizedSchedule,
    pub breaks: Vec<PositionedBreakSpan>,
    pub date_strip: Vec<NaiveDate>,
    pub grid_start: NaiveDate,
    pub grid_end: NaiveDate,
}

/// Run the normalizer over `input`.
///
/// # Errors
/// Any normalization failure; nothing is drawn in that case.
pub fn prepare_render(input: &ScheduleInput, config: &AppConfig) -> Result<PreparedRender> {
    let week = &config.week;
    let range = compute_date_range(&input.sessions)?;
    let schedule = normalize_sessions(&input.sessions, week)?;
    let (grid_start, grid_end) = grid_span(&range, week);

    let breaks = normalize_break_periods(
        &input.break_periods,
        grid_start,
        grid_end,
        schedule.bounds.min_hour,
        schedule.bounds.max_hour,
        week,
    );
    let date_strip = date_strip(grid_start, grid_end, week);

    debug!(
        "Grid {}..{}: {} weeks, hours {}..{}, {} break spans",
        grid_start,
        grid_end,
        schedule.bounds.week_count,
        schedule.bounds.min_hour,
        schedule.bounds.max_hour,
        breaks.len()
    );

    Ok(PreparedRender {
        schedule,
        breaks,
        date_strip,
        grid_start,
        grid_end,
    })
}

/// Render onto any drawing surface and return its output.
pub fn render_with_surface<S: DrawingSurface>(
    input: &ScheduleInput,
    config: &AppConfig,
    mut surface: S,
    generated_on: NaiveDate,
) -> Result<(S::Output, RenderSummary)> {
    let prepared = prepare_render(input, config)?;
    let renderer = GridRenderer::new(&config.layout, &config.labels, config.week);

    let summary = renderer.render(
        &mut surface,
        &RenderInput {
            schedule: &prepared.schedule,
            breaks: &prepared.breaks,
            date_strip: &prepared.date_strip,
            course: &input.course,
            generated_on,
        },
    )?;

    let dropped = prepared.schedule.dropped_hidden_days + prepared.schedule.dropped_before_anchor;
    if dropped > 0 || summary.sessions_skipped > 0 {
        warn!(
            "{} of {} sessions not drawn ({} hidden day, {} before first week, {} bad geometry)",
            dropped + summary.sessions_skipped,
            input.sessions.len(),
            prepared.schedule.dropped_hidden_days,
            prepared.schedule.dropped_before_anchor,
            summary.sessions_skipped
        );
    }

    Ok((surface.finish()?, summary))
}

/// Render the semester plan as a PDF.
///
/// # Errors
/// Normalization errors for unusable schedules, `Surface` if the PDF backend fails.
pub fn render_semester_plan(
    input: &ScheduleInput,
    config: &AppConfig,
    generated_on: NaiveDate,
) -> Result<RenderedDocument> {
    let surface = PdfSurface::new(&config.page.title, config.page.size())?;
    let (bytes, summary) = render_with_surface(input, config, surface, generated_on)?;

    info!(
        "Rendered '{}': {} sessions, {} break spans, {} bytes",
        input.course.name,
        summary.sessions_drawn,
        summary.breaks_drawn,
        bytes.len()
    );

    Ok(RenderedDocument { bytes, summary })
}

/// Parse a JSON request body and render it.
pub fn render_json_request(
    body: &str,
    config: &AppConfig,
    generated_on: NaiveDate,
) -> Result<RenderedDocument> {
    let request: RenderRequest = serde_json::from_str(body)
        .map_err(|e| TimetableError::InvalidInput(format!("Malformed request: {}", e)))?;
    let input = request.into_input()?;
    render_semester_plan(&input, config, generated_on)
}
