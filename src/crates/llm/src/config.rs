//! Configuration for remote reasoning services.

use crate::error::{LlmError, Result};
use agentgraph_core::llm::ChatConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Groq's OpenAI-compatible endpoint.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Environment variable holding the Groq API key.
pub const GROQ_API_KEY_ENV: &str = "GROQ_API_KEY";

/// Configuration for OpenAI-compatible remote providers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RemoteLlmConfig {
    /// API key for authentication.
    pub api_key: String,

    /// Base URL for the API.
    ///
    /// Examples:
    /// - Groq: "https://api.groq.com/openai/v1"
    /// - OpenAI: "https://api.openai.com/v1"
    pub base_url: String,

    /// Model name/identifier.
    pub model: String,

    /// Sampling temperature.
    #[serde(default)]
    pub temperature: f32,

    /// Optional cap on generated tokens.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// Request timeout duration.
    #[serde(default = "default_timeout")]
    pub timeout: Duration,

    /// Retries for connection failures and 5xx responses.
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
}

impl RemoteLlmConfig {
    /// Create a new remote configuration with default generation settings.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        let defaults = ChatConfig::default();
        Self {
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            timeout: default_timeout(),
            max_retries: defaults.max_retries,
        }
    }

    /// Groq endpoint with the default model.
    pub fn groq(api_key: impl Into<String>) -> Self {
        Self::new(api_key, GROQ_BASE_URL, ChatConfig::default().model)
    }

    /// Create configuration reading the API key from an environment variable.
    pub fn from_env(
        env_var: &str,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let api_key = std::env::var(env_var)
            .map_err(|_| LlmError::ApiKeyNotFound(format!("Environment variable: {}", env_var)))?;

        if api_key.trim().is_empty() {
            return Err(LlmError::ApiKeyNotFound(format!(
                "Environment variable {} is empty",
                env_var
            )));
        }

        Ok(Self::new(api_key, base_url, model))
    }

    /// Apply model, temperature, token cap and retry count from a [`ChatConfig`].
    pub fn with_chat_config(mut self, chat: &ChatConfig) -> Self {
        self.model = chat.model.clone();
        self.temperature = chat.temperature;
        self.max_tokens = chat.max_tokens;
        self.max_retries = chat.max_retries;
        self
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of transport retries.
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

fn default_timeout() -> Duration {
    Duration::from_secs(60)
}

fn default_max_retries() -> u32 {
    ChatConfig::default().max_retries
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_groq_defaults() {
        let config = RemoteLlmConfig::groq("test-key");

        assert_eq!(config.base_url, GROQ_BASE_URL);
        assert_eq!(config.model, "openai/gpt-oss-120b");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_remote_config_builder() {
        let chat = ChatConfig::new("llama-3.3-70b-versatile")
            .with_temperature(0.3)
            .with_max_retries(4);
        let config = RemoteLlmConfig::groq("test-key")
            .with_chat_config(&chat)
            .with_timeout(Duration::from_secs(120));

        assert_eq!(config.model, "llama-3.3-70b-versatile");
        assert_eq!(config.temperature, 0.3);
        assert_eq!(config.max_retries, 4);
        assert_eq!(config.timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_from_env_missing() {
        let err = RemoteLlmConfig::from_env("AGENTGRAPH_TEST_UNSET_KEY", GROQ_BASE_URL, "m").unwrap_err();
        assert!(err.is_auth_error());
    }
}
