// Resume analysis pipeline.
// Implements: upload validation, PDF text extraction, LLM scoring, response gating.
// All LLM calls go through llm_client; no direct OpenRouter calls here.

pub mod analyzer;
pub mod handlers;
pub mod pdf;
pub mod prompts;
