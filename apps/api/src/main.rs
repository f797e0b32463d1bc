mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod resolver;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::LlmResumeAnalyzer;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::resolver::session::ReportSession;
use crate::resolver::store::{FileStore, MemoryStore};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Analyzer API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(
        config.openrouter_api_key.clone(),
        config.openrouter_model.clone(),
        config.site_url.clone(),
    );
    info!("LLM client initialized (model: {})", llm.model());

    let analyzer = Arc::new(LlmResumeAnalyzer(llm));

    // The session slot lives for the process; the durable slot is a file under DATA_DIR.
    let report = Arc::new(ReportSession::new(
        Arc::new(MemoryStore::new()),
        Arc::new(FileStore::new(config.data_dir.clone())),
    ));
    info!(
        "Analysis slots ready (durable dir: {})",
        config.data_dir.display()
    );

    // Build app state
    let state = AppState { analyzer, report };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
