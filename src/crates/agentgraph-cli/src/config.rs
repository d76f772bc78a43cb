//! Configuration for the `agentgraph` binary
//!
//! Loaded from a TOML file (default `./agentgraph.toml`). A missing file means
//! defaults; command line flags are applied on top afterwards.
//!
//! ```toml
//! [llm]
//! model = "openai/gpt-oss-120b"
//! temperature = 0.0
//! max_retries = 2
//!
//! [agent]
//! thread_id = "1"
//! sentinel = "bye"
//! recursion_limit = 25
//! checkpoint_history = 10
//!
//! [logging]
//! level = "info"
//!
//! [search]
//! api_key_env = "TAVILY_API_KEY"
//! max_results = 5
//! ```

use agentgraph_core::llm::config::DEFAULT_MODEL;
use agentgraph_core::llm::ChatConfig;
use anyhow::{Context, Result};
use llm::{GROQ_API_KEY_ENV, GROQ_BASE_URL};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Reasoning service configuration
    #[serde(default)]
    pub llm: LlmSettings,

    /// Agent and conversation loop configuration
    #[serde(default)]
    pub agent: AgentSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingSettings,

    /// Web search tool configuration
    #[serde(default)]
    pub search: SearchSettings,
}

impl AppConfig {
    /// Load configuration from `path`, falling back to defaults when it does not exist
    pub async fn load(path: &Path) -> Result<Self> {
        if !tokio::fs::try_exists(path).await.unwrap_or(false) {
            debug!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// Reasoning service settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Transport retries inside the client
    pub max_retries: u32,

    /// Optional cap on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,

    /// OpenAI-compatible endpoint
    pub base_url: String,

    /// Environment variable holding the API key
    pub api_key_env: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_retries: 2,
            max_tokens: None,
            base_url: GROQ_BASE_URL.to_string(),
            api_key_env: GROQ_API_KEY_ENV.to_string(),
        }
    }
}

impl LlmSettings {
    /// Generation settings handed to the client
    pub fn chat_config(&self) -> ChatConfig {
        ChatConfig {
            model: self.model.clone(),
            temperature: self.temperature,
            max_retries: self.max_retries,
            max_tokens: self.max_tokens,
        }
    }
}

/// Agent settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentSettings {
    /// Conversation thread every turn is recorded under
    pub thread_id: String,

    /// Input that ends the session
    pub sentinel: String,

    /// Optional system prompt sent ahead of the conversation
    pub system_prompt: Option<String>,

    /// Maximum node executions per turn
    pub recursion_limit: usize,

    /// Wait before retrying a rate-limited call when the service gives no delay
    pub rate_limit_default_secs: u64,

    /// Report tool failures to the model instead of failing the turn
    pub handle_tool_errors: bool,

    /// Checkpoints kept per thread; older snapshots are dropped
    pub checkpoint_history: usize,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            thread_id: "1".to_string(),
            sentinel: "bye".to_string(),
            system_prompt: None,
            recursion_limit: 25,
            rate_limit_default_secs: 30,
            handle_tool_errors: false,
            checkpoint_history: 10,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Maximum level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Search tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    /// Environment variable holding the Tavily API key; the tool is disabled when unset
    pub api_key_env: String,

    /// Tavily API endpoint
    pub base_url: String,

    /// Results returned per query
    pub max_results: u32,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            api_key_env: "TAVILY_API_KEY".to_string(),
            base_url: "https://api.tavily.com".to_string(),
            max_results: 5,
        }
    }
}
