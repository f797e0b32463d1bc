use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::analysis::analyzer::ConnectionStatus;
use crate::state::AppState;

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": "0.1.0",
        "service": "resume-analyzer-api"
    }))
}

/// GET /health/llm
/// Sends a one-token probe through the configured model and reports whether a
/// response came back.
pub async fn llm_health_handler(State(state): State<AppState>) -> Json<ConnectionStatus> {
    Json(state.analyzer.test_connection().await)
}
