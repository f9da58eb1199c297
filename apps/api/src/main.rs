use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobtrack_api::config::Config;
use jobtrack_api::llm_client::LlmClient;
use jobtrack_api::routes::build_app;
use jobtrack_api::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={level},tower_http={level}",
                env!("CARGO_CRATE_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting job tracker API v{}", env!("CARGO_PKG_VERSION"));

    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_api_base.clone(),
        config.gemini_model.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let state = AppState::new(Arc::new(llm));
    let app = build_app(state, &config.cors_origins)?;
    info!("CORS origins: {:?}", config.cors_origins);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");
    info!("API available at http://localhost:{}/api", config.port);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
