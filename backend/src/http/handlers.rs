//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for the actual work.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode, Uri},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Local;
use tracing::{info, info_span, warn};
use uuid::Uuid;

use super::dto::{HealthResponse, RenderRequest, PDF_FILENAME};
use super::error::AppError;
use super::state::AppState;
use crate::services::render_semester_plan;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Header carrying the per-request id.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check() -> HandlerResult<HealthResponse> {
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

// =============================================================================
// Document generation
// =============================================================================

/// POST /generate-pdf
///
/// Render the submitted schedule and return it as a PDF attachment.
pub async fn generate_pdf(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    let Json(request) = payload.map_err(|rejection| {
        warn!(%request_id, "Rejected request body: {}", rejection.body_text());
        AppError::BadRequest(rejection.body_text())
    })?;

    let span = info_span!(
        "generate_pdf",
        %request_id,
        terms = request.terms.len(),
        breaks = request.year_plan_terms.len()
    );
    let config = Arc::clone(&state.config);
    let generated_on = Local::now().date_naive();

    // printpdf documents are not Send, so the whole render stays on one thread
    let render_span = span.clone();
    let result = tokio::task::spawn_blocking(move || {
        let _guard = render_span.enter();
        let input = request.into_input()?;
        render_semester_plan(&input, &config, generated_on)
    })
    .await
    .map_err(|e| AppError::Internal(format!("Task join error: {}", e)))?;

    let document = match result {
        Ok(document) => document,
        Err(e) => {
            span.in_scope(|| warn!("Render failed: {}", e));
            return Err(AppError::from(e));
        }
    };

    span.in_scope(|| {
        info!(
            sessions = document.summary.sessions_drawn,
            skipped = document.summary.sessions_skipped,
            bytes = document.bytes.len(),
            "PDF generated"
        )
    });

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{}\"", PDF_FILENAME))
            .map_err(|e| AppError::Internal(e.to_string()))?,
    );
    headers.insert(
        HeaderName::from_static(REQUEST_ID_HEADER),
        HeaderValue::from_str(&request_id.to_string())
            .map_err(|e| AppError::Internal(e.to_string()))?,
    );

    Ok((StatusCode::OK, headers, document.bytes).into_response())
}

/// Fallback for unknown routes.
pub async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}
