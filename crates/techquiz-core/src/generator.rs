//! Scenario generation client.
//!
//! Builds a grounded prompt for a level and a random topic, asks the provider
//! for schema-constrained JSON, and parses the result. `generate` is total:
//! any failure yields `Scenario::fallback()`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;

use crate::error::GenerationError;
use crate::material::{build_prompt, SYSTEM_PROMPT};
use crate::model::{Level, Scenario, Topic};
use crate::traits::{extract_json_payload, GenerateRequest, LlmProvider, ScenarioSource};

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Sampling and model settings for scenario requests.
#[derive(Debug, Clone)]
pub struct GeneratorSettings {
    /// Model identifier passed to the provider.
    pub model: String,
    /// Sampling temperature.
    pub temperature: f64,
    /// Max tokens for generation.
    pub max_tokens: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2048,
        }
    }
}

/// The output schema every scenario response must follow.
pub fn scenario_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "context": {
                "type": "string",
                "description": "The professional scenario description (2 sentences), strictly based on the provided topic context."
            },
            "question": {
                "type": "string",
                "description": "The specific question the user must answer based on the scenario."
            },
            "topic": {
                "type": "string",
                "description": "The technical topic of this scenario."
            },
            "options": {
                "type": "array",
                "description": "A list of 3 possible answers.",
                "items": {
                    "type": "object",
                    "properties": {
                        "id": { "type": "string" },
                        "text": { "type": "string" },
                        "isCorrect": { "type": "boolean" }
                    },
                    "required": ["id", "text", "isCorrect"]
                }
            },
            "feedback": {
                "type": "string",
                "description": "Educational feedback explaining the correct answer using the specific grammar rule found in the provided material."
            }
        },
        "required": ["context", "question", "options", "feedback", "topic"]
    })
}

/// Parse a raw provider payload into a scenario.
///
/// Only presence and types are checked here. Option count and the single
/// correct answer are left to the schema and prompt.
pub fn parse_scenario(content: &str) -> Result<Scenario, GenerationError> {
    let payload = extract_json_payload(content);
    if payload.is_empty() {
        return Err(GenerationError::EmptyPayload);
    }
    Ok(serde_json::from_str(payload)?)
}

/// Generates scenarios through an LLM provider.
pub struct ScenarioGenerator {
    provider: Arc<dyn LlmProvider>,
    settings: GeneratorSettings,
}

impl ScenarioGenerator {
    pub fn new(provider: Arc<dyn LlmProvider>, settings: GeneratorSettings) -> Self {
        Self { provider, settings }
    }

    pub fn settings(&self) -> &GeneratorSettings {
        &self.settings
    }

    /// Generate a scenario for `level` on a random topic.
    ///
    /// Never fails: every error is logged and replaced by the fallback.
    pub async fn generate(&self, level: Level) -> Scenario {
        let topic = Topic::random(&mut rand::thread_rng());
        self.generate_for_topic(level, topic).await
    }

    /// Generate a scenario for `level` on a given topic.
    pub async fn generate_for_topic(&self, level: Level, topic: Topic) -> Scenario {
        match self.try_generate(level, topic).await {
            Ok(scenario) => scenario,
            Err(e) => {
                tracing::warn!(
                    provider = self.provider.name(),
                    %level,
                    topic = topic.label(),
                    "scenario generation failed, serving fallback: {e}"
                );
                Scenario::fallback()
            }
        }
    }

    /// The request sent for `level` and `topic`.
    pub fn request_for(&self, level: Level, topic: Topic) -> GenerateRequest {
        GenerateRequest {
            model: self.settings.model.clone(),
            prompt: build_prompt(level, topic),
            system_prompt: Some(SYSTEM_PROMPT.to_string()),
            max_tokens: self.settings.max_tokens,
            temperature: self.settings.temperature,
            response_schema: Some(scenario_schema()),
        }
    }

    async fn try_generate(
        &self,
        level: Level,
        topic: Topic,
    ) -> Result<Scenario, GenerationError> {
        let request = self.request_for(level, topic);
        let response = self
            .provider
            .generate(&request)
            .await
            .map_err(GenerationError::Provider)?;
        tracing::debug!(
            model = %response.model,
            latency_ms = response.latency_ms,
            total_tokens = response.token_usage.total_tokens,
            "scenario response received"
        );
        parse_scenario(&response.content)
    }
}

#[async_trait]
impl ScenarioSource for ScenarioGenerator {
    async fn next_scenario(&self, level: Level) -> anyhow::Result<Scenario> {
        Ok(self.generate(level).await)
    }
}
