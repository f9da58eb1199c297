//! Cover letter generation.

pub mod handlers;
pub mod prompts;

use serde::{Deserialize, Serialize};

use crate::cover_letter::prompts::{COVER_LETTER_PROMPT_TEMPLATE, DEFAULT_EXPERIENCE};
use crate::llm_client::{LlmError, TextGenerator};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub user_experience: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// Fills the cover letter template. A blank experience falls back to the default blurb.
pub fn build_prompt(request: &CoverLetterRequest) -> String {
    let experience = request
        .user_experience
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .unwrap_or(DEFAULT_EXPERIENCE);

    COVER_LETTER_PROMPT_TEMPLATE
        .replace("{company}", request.company.as_deref().unwrap_or_default())
        .replace("{position}", request.position.as_deref().unwrap_or_default())
        .replace("{notes}", request.notes.as_deref().unwrap_or_default())
        .replace("{experience}", experience)
}

pub async fn generate_cover_letter(
    llm: &dyn TextGenerator,
    request: &CoverLetterRequest,
) -> Result<String, LlmError> {
    llm.generate(&build_prompt(request), None).await
}
