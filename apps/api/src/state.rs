use std::sync::Arc;

use crate::analysis::analyzer::ResumeAnalyzer;
use crate::resolver::session::ReportSession;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable analyzer. Default: LlmResumeAnalyzer over OpenRouter; tests
    /// swap in a canned backend.
    pub analyzer: Arc<dyn ResumeAnalyzer>,
    /// Resolution state plus the session and durable slots behind it.
    pub report: Arc<ReportSession>,
}
