//! Core trait definitions for LLM providers and scenario sources.
//!
//! `LlmProvider` is implemented by the `techquiz-providers` crate;
//! `ScenarioSource` is what the quiz controller pulls scenarios from.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::model::{Level, Scenario};

// ---------------------------------------------------------------------------
// LLM Provider trait
// ---------------------------------------------------------------------------

/// Trait for LLM backends that produce structured text from prompts.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g. "gemini").
    fn name(&self) -> &str;

    /// Generate a completion for a prompt.
    async fn generate(&self, request: &GenerateRequest) -> anyhow::Result<GenerateResponse>;

    /// List known models for this provider.
    fn available_models(&self) -> Vec<ModelInfo>;
}

/// Request to generate text from an LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    /// Model identifier (e.g. "gemini-3-flash-preview").
    pub model: String,
    /// The main prompt.
    pub prompt: String,
    /// Optional system instruction.
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
    /// JSON Schema the output must conform to. Each backend maps it onto its
    /// own structured-output parameter.
    #[serde(default)]
    pub response_schema: Option<serde_json::Value>,
}

/// Response from an LLM generation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// The raw response text.
    pub content: String,
    /// Model that actually generated the response.
    pub model: String,
    /// Token usage.
    pub token_usage: TokenUsage,
    /// Latency in milliseconds.
    pub latency_ms: u64,
}

/// Token accounting for a single request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Information about an available model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model identifier.
    pub id: String,
    /// Human-readable model name.
    pub name: String,
    /// Provider name.
    pub provider: String,
    /// Maximum context window size in tokens.
    pub max_context: u32,
}

// ---------------------------------------------------------------------------
// Scenario source trait
// ---------------------------------------------------------------------------

/// Anything the quiz controller can ask for the next scenario.
///
/// An `Err` here is the unrecovered path: the session stops loading and shows
/// no scenario. Ordinary generation failures should be absorbed by the
/// implementation (see `ScenarioGenerator`).
#[async_trait]
pub trait ScenarioSource: Send + Sync {
    async fn next_scenario(&self, level: Level) -> anyhow::Result<Scenario>;
}

// ---------------------------------------------------------------------------
// Payload extraction
// ---------------------------------------------------------------------------

/// Extract the JSON document from an LLM response.
///
/// Handles:
/// - A ```json fenced block (preferred)
/// - A bare ``` fenced block (if no json-tagged block is found)
/// - Raw JSON with no markdown (returned trimmed)
pub fn extract_json_payload(response: &str) -> &str {
    let mut generic: Option<&str> = None;
    let mut rest = response;

    while let Some(open) = rest.find("```") {
        let after_fence = &rest[open + 3..];
        let Some(line_end) = after_fence.find('\n') else {
            break;
        };
        let lang = after_fence[..line_end].trim().to_ascii_lowercase();
        let body_start = &after_fence[line_end + 1..];
        // An unclosed block (truncated response) runs to the end of the text.
        let (body, remainder) = match body_start.find("```") {
            Some(close) => (&body_start[..close], &body_start[close + 3..]),
            None => (body_start, ""),
        };

        if lang == "json" {
            return body.trim();
        }
        if lang.is_empty() && generic.is_none() {
            generic = Some(body.trim());
        }
        rest = remainder;
    }

    generic.unwrap_or_else(|| response.trim())
}
