//! Integration tests for POST /api/extract-job.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, post_json, post_raw, FakeGenerator};
use serde_json::json;
use wiremock::matchers::{header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use jobtrack_api::errors::EXTRACT_JOB_FAILED;
use jobtrack_api::llm_client::LlmClient;

const POSTING: &str = r#"<html><body>
    <nav>Jobs | Companies</nav>
    <h1>SWE Intern</h1>
    <p>Acme Corp is hiring interns who know Rust.</p>
    <script>track();</script>
</body></html>"#;

async fn posting_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/jobs/42"))
        .and(header_exists("user-agent"))
        .respond_with(ResponseTemplate::new(200).set_body_string(POSTING))
        .mount(&server)
        .await;
    server
}

#[tokio::test]
async fn extracts_fenced_json_from_llm_reply() {
    let server = posting_server().await;
    let llm = FakeGenerator::replying(
        "```json\n{\"company\": \"Acme\", \"position\": \"SWE Intern\", \"notes\": \"Rust.\"}\n```",
    );
    let app = build_test_app(llm.clone());

    let response = post_json(
        app,
        "/api/extract-job",
        json!({ "jobUrl": format!("{}/jobs/42", server.uri()) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["position"], "SWE Intern");
    assert_eq!(body["notes"], "Rust.");

    let prompt = llm.last_prompt();
    assert!(prompt.contains("Acme Corp is hiring interns who know Rust."));
    assert!(!prompt.contains("Jobs | Companies"));
    assert!(!prompt.contains("track()"));
}

#[tokio::test]
async fn missing_job_url_is_rejected_without_upstream_calls() {
    let llm = FakeGenerator::replying("{}");
    let app = build_test_app(llm.clone());

    let response = post_json(app, "/api/extract-job", json!({})).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Job URL is required");
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn request_without_content_type_gets_json_validation_error() {
    let llm = FakeGenerator::replying("{}");
    let app = build_test_app(llm.clone());

    let response = post_raw(app, "/api/extract-job", None, "").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body, json!({ "error": "Job URL is required" }));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn malformed_json_body_gets_json_error() {
    let llm = FakeGenerator::replying("{}");
    let app = build_test_app(llm.clone());

    let response = post_raw(
        app,
        "/api/extract-job",
        Some("application/json"),
        "{\"jobUrl\": ",
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert!(body["error"].is_string());
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn unreachable_url_returns_500() {
    let llm = FakeGenerator::replying("{}");
    let app = build_test_app(llm.clone());

    let response = post_json(
        app,
        "/api/extract-job",
        json!({ "jobUrl": "http://127.0.0.1:9/unreachable" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], EXTRACT_JOB_FAILED);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("Failed to fetch job posting"));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn page_error_status_returns_500() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;
    let llm = FakeGenerator::replying("{}");
    let app = build_test_app(llm.clone());

    let response = post_json(
        app,
        "/api/extract-job",
        json!({ "jobUrl": format!("{}/blocked", server.uri()) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["message"].as_str().unwrap().contains("403"));
    assert_eq!(llm.calls(), 0);
}

#[tokio::test]
async fn non_json_llm_reply_returns_500_with_parse_message() {
    let server = posting_server().await;
    let llm = FakeGenerator::replying("Sorry, I cannot help with that.");
    let app = build_test_app(llm);

    let response = post_json(
        app,
        "/api/extract-job",
        json!({ "jobUrl": format!("{}/jobs/42", server.uri()) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "JSON parse error: expected value at line 1 column 1"
    );
}

#[tokio::test]
async fn non_string_fields_and_extra_keys_pass_through() {
    let server = posting_server().await;
    let llm = FakeGenerator::replying(
        r#"{"company": "Acme", "position": "SWE Intern", "notes": ["Rust", "remote"], "salary": 90000}"#,
    );
    let app = build_test_app(llm);

    let response = post_json(
        app,
        "/api/extract-job",
        json!({ "jobUrl": format!("{}/jobs/42", server.uri()) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["notes"], json!(["Rust", "remote"]));
    assert_eq!(body["salary"], 90000);
    assert_eq!(body["company"], "Acme");
}

#[tokio::test]
async fn non_object_llm_reply_returns_500() {
    let server = posting_server().await;
    let llm = FakeGenerator::replying(r#"["Acme", "SWE Intern"]"#);
    let app = build_test_app(llm);

    let response = post_json(
        app,
        "/api/extract-job",
        json!({ "jobUrl": format!("{}/jobs/42", server.uri()) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["message"], "LLM reply is not a JSON object");
}

#[tokio::test]
async fn extracts_through_gemini_api() {
    let server = posting_server().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [{ "text": "{\"company\": \"Acme\", \"position\": \"SWE Intern\", \"notes\": \"\"}" }]
                }
            }],
            "usageMetadata": { "promptTokenCount": 120, "candidatesTokenCount": 20 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let llm = LlmClient::new("test-key".into(), server.uri(), "gemini-test".into());
    let app = build_test_app(Arc::new(llm));

    let response = post_json(
        app,
        "/api/extract-job",
        json!({ "jobUrl": format!("{}/jobs/42", server.uri()) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["company"], "Acme");
    assert_eq!(body["notes"], "");
}

#[tokio::test]
async fn gemini_error_is_not_retried() {
    let server = posting_server().await;
    Mock::given(method("POST"))
        .and(path("/v1beta/models/gemini-test:generateContent"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": { "code": 503, "message": "The model is overloaded.", "status": "UNAVAILABLE" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let llm = LlmClient::new("test-key".into(), server.uri(), "gemini-test".into());
    let app = build_test_app(Arc::new(llm));

    let response = post_json(
        app,
        "/api/extract-job",
        json!({ "jobUrl": format!("{}/jobs/42", server.uri()) }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(
        body["message"],
        "API error (status 503): The model is overloaded."
    );
}
