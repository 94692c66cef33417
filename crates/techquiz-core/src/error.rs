//! Error types.
//!
//! `ProviderError` classifies transport failures so callers can log them
//! precisely; `GenerationError` is the generator's internal taxonomy, which
//! never escapes `ScenarioGenerator::generate` (every variant maps to the
//! fallback scenario).

use thiserror::Error;

/// Errors that can occur when interacting with an LLM provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The requested model was not found.
    #[error("model not found: {0}")]
    ModelNotFound(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),

    /// The HTTP client could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    ClientSetup(String),
}

impl ProviderError {
    /// Returns `true` if this error is a configuration problem rather than a
    /// transient transport failure.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::AuthenticationFailed(_)
                | ProviderError::ModelNotFound(_)
                | ProviderError::ClientSetup(_)
        )
    }
}

/// Why a generation attempt did not produce a usable scenario.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The provider call itself failed.
    #[error("provider request failed: {0:#}")]
    Provider(anyhow::Error),

    /// The provider answered with no text.
    #[error("empty response payload")]
    EmptyPayload,

    /// The payload was not JSON of the expected shape.
    #[error("malformed scenario JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// Errors raised by glossary loading.
#[derive(Debug, Error)]
pub enum GlossaryError {
    /// The glossary file is not valid TOML of the expected shape.
    #[error("failed to parse glossary: {0}")]
    Parse(#[from] toml::de::Error),

    /// A term key was empty or whitespace.
    #[error("glossary contains a blank term")]
    BlankTerm,
}

/// Errors raised by the quiz controller handle.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The controller task has stopped and no longer accepts intents.
    #[error("quiz controller is no longer running")]
    ControllerStopped,
}
