//! Axum route handlers for job extraction.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;

use crate::errors::{json_body, AppError};
use crate::extraction::extract_job_details;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractJobRequest {
    #[serde(default)]
    pub job_url: Option<String>,
}

/// POST /api/extract-job
///
/// Scrapes the posting at `jobUrl` and returns the extracted object
/// (normally `{company, position, notes}`).
pub async fn handle_extract_job(
    State(state): State<AppState>,
    payload: Result<Json<ExtractJobRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let request = json_body(payload)?;
    let job_url = request
        .job_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| AppError::Validation("Job URL is required".to_string()))?;

    let details = extract_job_details(&state.http, state.llm.as_ref(), job_url)
        .await
        .map_err(|e| AppError::ExtractJob(format!("{e:#}")))?;

    Ok(Json(details))
}
