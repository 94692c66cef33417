//! Shared HTTP plumbing for the remote providers.

use std::time::Duration;

use techquiz_core::error::ProviderError;

/// Request timeout used when the config does not set one.
pub(crate) const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Build a client whose requests give up after `timeout_secs`.
pub(crate) fn build_client(timeout_secs: u64) -> Result<reqwest::Client, ProviderError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .map_err(|e| ProviderError::ClientSetup(e.to_string()))
}

/// Classify a failed `send()`.
pub(crate) fn send_error(e: reqwest::Error, timeout_secs: u64) -> ProviderError {
    if e.is_timeout() {
        ProviderError::Timeout(timeout_secs)
    } else {
        ProviderError::NetworkError(e.to_string())
    }
}

/// Seconds from a `retry-after` header, in milliseconds; 5s when absent.
pub(crate) fn retry_after_ms(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get("retry-after")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(5)
        * 1000
}

pub(crate) fn decode_error(e: reqwest::Error) -> ProviderError {
    ProviderError::ApiError {
        status: 0,
        message: format!("failed to parse response: {e}"),
    }
}
