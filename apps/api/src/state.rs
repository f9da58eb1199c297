use std::sync::Arc;

use reqwest::Client;

use crate::llm_client::TextGenerator;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Generative-language backend. `LlmClient` in production.
    pub llm: Arc<dyn TextGenerator>,
    /// Plain HTTP client for fetching job postings.
    pub http: Client,
}

impl AppState {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self {
            llm,
            http: Client::new(),
        }
    }
}
