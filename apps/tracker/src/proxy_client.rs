//! Client for the job tracker API's AI proxy endpoints.
//!
//! One request per call: no retry and no timeout, the first failure goes
//! straight back to the caller.

use reqwest::{Client, Response};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{message} (status {status})")]
    Remote { status: u16, message: String },
}

/// Fields extracted from a job posting. Any of them may be missing, and the
/// server does not check their JSON types, so non-string values are flattened
/// to text.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JobDetails {
    #[serde(default, deserialize_with = "lenient_text")]
    pub company: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub position: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub notes: Option<String>,
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(value_text(Value::deserialize(deserializer)?))
}

/// Strings as-is, arrays joined with ", ", null as nothing, anything else as JSON.
fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExtractJobRequest<'a> {
    job_url: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CoverLetterRequest<'a> {
    company: &'a str,
    position: &'a str,
    notes: &'a str,
    user_experience: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CoverLetterResponse {
    cover_letter: String,
}

/// `{error, message}` body returned by the API on failure.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
    message: Option<String>,
}

#[derive(Clone)]
pub struct ProxyClient {
    client: Client,
    base_url: String,
}

impl ProxyClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// POST /api/extract-job
    pub async fn extract_job_details(&self, job_url: &str) -> Result<JobDetails, ProxyError> {
        let result = async {
            let response = self
                .client
                .post(format!("{}/api/extract-job", self.base_url))
                .json(&ExtractJobRequest { job_url })
                .send()
                .await?;
            let response = ensure_success(response, "Failed to extract job details").await?;
            Ok::<_, ProxyError>(response.json::<JobDetails>().await?)
        }
        .await;

        if let Err(e) = &result {
            error!("AI extraction failed: {e}");
        }
        result
    }

    /// POST /api/generate-cover-letter. Returns the letter text.
    pub async fn generate_cover_letter(
        &self,
        company: &str,
        position: &str,
        notes: &str,
        user_experience: &str,
    ) -> Result<String, ProxyError> {
        let request = CoverLetterRequest {
            company,
            position,
            notes,
            user_experience,
        };

        let result = async {
            let response = self
                .client
                .post(format!("{}/api/generate-cover-letter", self.base_url))
                .json(&request)
                .send()
                .await?;
            let response = ensure_success(response, "Failed to generate cover letter").await?;
            Ok::<_, ProxyError>(response.json::<CoverLetterResponse>().await?.cover_letter)
        }
        .await;

        if let Err(e) = &result {
            error!("Cover letter generation failed: {e}");
        }
        result
    }
}

/// Passes successful responses through; turns anything else into `ProxyError::Remote`,
/// preferring the server's own message.
async fn ensure_success(response: Response, fallback: &str) -> Result<Response, ProxyError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    debug!("API returned {status}: {body}");
    let message = serde_json::from_str::<ErrorEnvelope>(&body)
        .ok()
        .and_then(|e| e.message.or(e.error))
        .unwrap_or_else(|| fallback.to_string());

    Err(ProxyError::Remote {
        status: status.as_u16(),
        message,
    })
}
