//! Axum route handlers for the sourcing API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::errors::AppError;
use crate::sourcing::pipeline::RunSummary;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RunRequest {
    pub jd_text: String,
    pub rubric: String,
}

/// POST /api/v1/sourcing/run
///
/// Runs the full sourcing pipeline over the submitted job description and
/// rubric. Serve mode returns everything in the response body; per-stage
/// artifact files are only written by the CLI run mode.
pub async fn handle_run(
    State(state): State<AppState>,
    Json(request): Json<RunRequest>,
) -> Result<Json<RunSummary>, AppError> {
    if request.jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_text cannot be empty".to_string()));
    }
    if request.rubric.trim().is_empty() {
        return Err(AppError::Validation("rubric cannot be empty".to_string()));
    }

    let summary = state
        .pipeline
        .run(&request.jd_text, &request.rubric, None)
        .await?;

    Ok(Json(summary))
}
