use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

pub const EXTRACT_JOB_FAILED: &str = "Failed to extract job details. Some sites block scraping.";
pub const COVER_LETTER_FAILED: &str = "Failed to generate cover letter";

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// Upstream failures keep the raw error text in the `message` field of the body.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Job extraction failed: {0}")]
    ExtractJob(String),

    #[error("Cover letter generation failed: {0}")]
    CoverLetter(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::ExtractJob(msg) => {
                tracing::error!("Error extracting job details: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": EXTRACT_JOB_FAILED, "message": msg }),
                )
            }
            AppError::CoverLetter(msg) => {
                tracing::error!("Error generating cover letter: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": COVER_LETTER_FAILED, "message": msg }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Unwraps a JSON body extractor result. A request with no JSON content type
/// is read as an empty body so field validation still answers; a malformed
/// body is a 400 with the JSON `{error}` shape instead of axum's plain text.
pub fn json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(AppError::Validation(rejection.body_text())),
    }
}
