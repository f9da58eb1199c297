//! Job posting extraction: fetch the page, reduce it to text, ask the LLM for
//! company / position / notes.

pub mod handlers;
pub mod page;
pub mod prompts;

use anyhow::{bail, Result};
use reqwest::Client;
use serde_json::Value;
use tracing::info;

use crate::extraction::prompts::JOB_EXTRACT_PROMPT_TEMPLATE;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::{generate_json, TextGenerator};

/// Fetches `job_url`, strips it to plain text and asks the LLM for the posting's
/// details. The reply object is returned as-is: field types and extra keys are
/// left for the caller to interpret.
pub async fn extract_job_details(
    http: &Client,
    llm: &dyn TextGenerator,
    job_url: &str,
) -> Result<Value> {
    let html = page::fetch_page(http, job_url).await?;
    let text = page::page_text(&html);
    info!(url = job_url, chars = text.chars().count(), "Fetched job posting");

    let prompt = JOB_EXTRACT_PROMPT_TEMPLATE.replace("{page_text}", &text);
    let details = generate_json::<Value>(llm, &prompt, Some(JSON_ONLY_SYSTEM)).await?;
    if !details.is_object() {
        bail!("LLM reply is not a JSON object");
    }

    Ok(details)
}
