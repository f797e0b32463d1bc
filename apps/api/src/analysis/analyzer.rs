//! Resume analysis behind a pluggable, trait-based backend.
//!
//! Default: `LlmResumeAnalyzer` (OpenRouter-backed).
//! `AppState` holds an `Arc<dyn ResumeAnalyzer>` so handler tests can swap in
//! a canned backend without network access.

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::analysis::prompts::{ANALYSIS_PROMPT_TEMPLATE, ANALYSIS_SYSTEM, CONNECTION_PROBE};
use crate::errors::AppError;
use crate::llm_client::{strip_json_fences, LlmClient, LlmError};
use crate::models::analysis::{has_required_scores, ResumeAnalysis};

/// User-facing message when the LLM output is not usable JSON.
pub const PARSE_FAILED_MSG: &str = "Failed to parse AI response. Please try again.";
/// User-facing message when parsed JSON fails the score gate.
pub const INVALID_STRUCTURE_MSG: &str = "Invalid analysis response structure";

/// Outcome of the connectivity probe, rendered by the health surface.
#[derive(Debug, Serialize)]
pub struct ConnectionStatus {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The resume analyzer trait. Implement this to swap backends without
/// touching the endpoint, handler, or caller code.
///
/// Carried in `AppState` as `Arc<dyn ResumeAnalyzer>`.
#[async_trait]
pub trait ResumeAnalyzer: Send + Sync {
    async fn analyze(&self, resume_text: &str) -> Result<ResumeAnalysis, AppError>;

    async fn test_connection(&self) -> ConnectionStatus;
}

/// Production analyzer backed by the OpenRouter client.
pub struct LlmResumeAnalyzer(pub LlmClient);

#[async_trait]
impl ResumeAnalyzer for LlmResumeAnalyzer {
    async fn analyze(&self, resume_text: &str) -> Result<ResumeAnalysis, AppError> {
        info!(
            "Analyzing resume ({} chars of extracted text)",
            resume_text.len()
        );

        let prompt = ANALYSIS_PROMPT_TEMPLATE.replace("{resume_text}", resume_text);

        let response = self
            .0
            .call(&prompt, ANALYSIS_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;

        let text = response
            .text()
            .ok_or_else(|| AppError::Llm(LlmError::EmptyContent.to_string()))?;

        let analysis = parse_analysis_text(text)?;

        info!(
            "Analysis complete: overall={}, ats={}",
            analysis.overall_score, analysis.ats_score
        );

        Ok(analysis)
    }

    async fn test_connection(&self) -> ConnectionStatus {
        match self.0.probe(CONNECTION_PROBE).await {
            Ok(response) => match response.text() {
                Some(content) => ConnectionStatus {
                    success: true,
                    message: Some(content.to_string()),
                    model: Some(self.0.model().to_string()),
                    error: None,
                },
                None => ConnectionStatus {
                    success: false,
                    message: None,
                    model: None,
                    error: Some(LlmError::EmptyContent.to_string()),
                },
            },
            Err(LlmError::Api { message, .. }) => ConnectionStatus {
                success: false,
                message: None,
                model: None,
                error: Some(if message.is_empty() {
                    "Connection failed".to_string()
                } else {
                    message
                }),
            },
            Err(e) => ConnectionStatus {
                success: false,
                message: None,
                model: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Parses raw LLM output into a typed analysis.
///
/// Fences are stripped first, then the score gate runs on the raw JSON, then
/// the full typed decode. The gate failure is reported distinctly so a
/// wrong-shaped response is distinguishable from unparseable text.
fn parse_analysis_text(text: &str) -> Result<ResumeAnalysis, AppError> {
    let cleaned = strip_json_fences(text);

    let value: Value =
        serde_json::from_str(cleaned).map_err(|_| AppError::Llm(PARSE_FAILED_MSG.to_string()))?;

    if !has_required_scores(&value) {
        return Err(AppError::Llm(INVALID_STRUCTURE_MSG.to_string()));
    }

    ResumeAnalysis::from_json_value(value).map_err(|_| AppError::Llm(PARSE_FAILED_MSG.to_string()))
}
