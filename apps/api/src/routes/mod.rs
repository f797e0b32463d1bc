pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers::handle_analyze_resume;
use crate::resolver::handlers::{handle_get_analysis, handle_reset};
use crate::state::AppState;

/// Request body cap for the router. Axum's default is 2MiB, below the 5MB
/// upload cap, and multipart framing needs headroom beyond the file bytes.
const BODY_LIMIT_BYTES: usize = 8 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/health/llm", get(health::llm_health_handler))
        .route("/api/analyze-resume", post(handle_analyze_resume))
        .route("/api/analysis", get(handle_get_analysis))
        .route("/api/analysis/reset", post(handle_reset))
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .with_state(state)
}
