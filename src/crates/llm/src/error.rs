//! Error types for reasoning service clients.

use agentgraph_core::ModelError;
use std::time::Duration;
use thiserror::Error;

/// Result type for LLM operations.
pub type Result<T> = std::result::Result<T, LlmError>;

/// Errors that can occur when talking to a reasoning service.
#[derive(Debug, Error)]
pub enum LlmError {
    /// HTTP request failed before a response arrived.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Failed to serialize/deserialize data.
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// API authentication failed.
    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    /// API key not found in environment.
    #[error("API key not found: {0}")]
    ApiKeyNotFound(String),

    /// The service asked us to back off.
    #[error("Rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Delay from the `Retry-After` header, if present.
        retry_after: Option<Duration>,
        /// Error text returned by the service.
        message: String,
    },

    /// Provider returned a 5xx status.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// Invalid response from provider.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// General provider error.
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl LlmError {
    /// Check if this error is a transport failure worth retrying in the client.
    ///
    /// Rate limits are excluded: they are surfaced to the caller's retry policy.
    pub fn is_retryable(&self) -> bool {
        matches!(self, LlmError::HttpError(_) | LlmError::ServiceUnavailable(_))
    }

    /// Check if this error is due to authentication.
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            LlmError::AuthenticationError(_) | LlmError::ApiKeyNotFound(_)
        )
    }
}

impl From<serde_json::Error> for LlmError {
    fn from(err: serde_json::Error) -> Self {
        LlmError::SerializationError(err.to_string())
    }
}

/// Rate limits keep their delay; everything else is an upstream failure.
impl From<LlmError> for ModelError {
    fn from(err: LlmError) -> Self {
        match err {
            LlmError::RateLimitExceeded { retry_after, message } => {
                ModelError::rate_limited(retry_after, message)
            }
            other => ModelError::Upstream(other.to_string()),
        }
    }
}
