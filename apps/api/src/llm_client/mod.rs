//! LLM Client — the single point of entry for all OpenRouter calls in the API.
//!
//! ARCHITECTURAL RULE: No other module may call OpenRouter directly.
//! All LLM interactions MUST go through this module.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// Sent as `X-Title` so OpenRouter attributes traffic to this app.
const APP_TITLE: &str = "AI Resume Analyzer";
/// Token budget for a full analysis response.
pub const MAX_TOKENS: u32 = 2500;
/// Sampling temperature for analysis calls. Low, the output must stay parseable.
pub const TEMPERATURE: f32 = 0.3;
/// Token budget for the connectivity probe.
const PROBE_MAX_TOKENS: u32 = 50;
/// Upstream calls are capped at 60s end to end.
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("OpenRouter API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No response from AI model")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    /// The model that actually served the request, as reported upstream.
    pub model: Option<String>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the message content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct OpenRouterError {
    error: OpenRouterErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenRouterErrorBody {
    message: String,
}

/// The single LLM client used by all services in the API.
/// Wraps the OpenRouter chat-completions endpoint with structured output helpers.
///
/// Calls are made exactly once. A failed analysis is surfaced to the uploader,
/// who resubmits; retrying here would stack delays on an interactive request.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    model: String,
    site_url: String,
}

impl LlmClient {
    pub fn new(api_key: String, model: String, site_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
            model,
            site_url,
        }
    }

    /// The configured model identifier, e.g. `anthropic/claude-3.5-haiku`.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Makes a single chat-completion call with the analysis token budget.
    pub async fn call(&self, prompt: &str, system: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            max_tokens: MAX_TOKENS,
            temperature: Some(TEMPERATURE),
        };

        self.execute(&request_body).await
    }

    /// Minimal round-trip used by the health surface. Tiny token budget,
    /// no system prompt, default sampling.
    pub async fn probe(&self, prompt: &str) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: PROBE_MAX_TOKENS,
            temperature: None,
        };

        self.execute(&request_body).await
    }

    async fn execute(&self, request_body: &ChatRequest<'_>) -> Result<ChatResponse, LlmError> {
        let response = self
            .client
            .post(OPENROUTER_API_URL)
            .bearer_auth(&self.api_key)
            .header("HTTP-Referer", &self.site_url)
            .header("X-Title", APP_TITLE)
            .json(request_body)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Try to parse the upstream error message
            let message = serde_json::from_str::<OpenRouterError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let chat_response = parse_chat_response(&body)?;

        if let Some(usage) = &chat_response.usage {
            debug!(
                "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                chat_response.model.as_deref().unwrap_or("unknown"),
                usage.prompt_tokens,
                usage.completion_tokens
            );
        }

        Ok(chat_response)
    }
}

/// Decodes a chat-completions response body. A 2xx body that is not the
/// expected envelope is a Parse error, not a transport failure.
fn parse_chat_response(body: &str) -> Result<ChatResponse, LlmError> {
    serde_json::from_str(body).map_err(LlmError::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}
