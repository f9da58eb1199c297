use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::cover_letter::{generate_cover_letter, CoverLetterRequest, CoverLetterResponse};
use crate::errors::{json_body, AppError};
use crate::state::AppState;

/// POST /api/generate-cover-letter
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let request = json_body(payload)?;
    let cover_letter = generate_cover_letter(state.llm.as_ref(), &request)
        .await
        .map_err(|e| AppError::CoverLetter(format!("{:#}", anyhow::Error::from(e))))?;

    Ok(Json(CoverLetterResponse { cover_letter }))
}
