pub mod health;

use anyhow::{Context, Result};
use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::cover_letter::handlers::handle_generate_cover_letter;
use crate::extraction::handlers::handle_extract_job;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", get(health::health_handler))
        .route("/api/extract-job", post(handle_extract_job))
        .route(
            "/api/generate-cover-letter",
            post(handle_generate_cover_letter),
        )
        .with_state(state)
}

/// CORS restricted to the configured origin allowlist.
pub fn build_cors_layer(origins: &[String]) -> Result<CorsLayer> {
    let origins = origins
        .iter()
        .map(|o| {
            o.parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([CONTENT_TYPE]))
}

/// Router plus the middleware stack used in production.
pub fn build_app(state: AppState, cors_origins: &[String]) -> Result<Router> {
    Ok(build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors_layer(cors_origins)?))
}
