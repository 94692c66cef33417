//! techquiz-providers — LLM provider integrations.
//!
//! Implements the `LlmProvider` trait for Gemini, OpenAI-compatible APIs and
//! Ollama, plus the TOML configuration that selects between them.

pub mod config;
pub mod gemini;
mod http;
pub mod mock;
pub mod ollama;
pub mod openai;

pub use config::{create_provider, load_config, load_config_from, ProviderConfig, QuizConfig};
pub use techquiz_core::error::ProviderError;
