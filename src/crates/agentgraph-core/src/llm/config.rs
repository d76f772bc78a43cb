//! Chat client configuration and request types

use super::tools::ToolDefinition;
use crate::messages::Message;
use serde::{Deserialize, Serialize};

/// Default model identifier
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";

/// Generation settings a chat client is built with
///
/// Defaults: `openai/gpt-oss-120b` on Groq, fully
/// deterministic sampling and two transport retries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    /// Model identifier sent with every request
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Retries for transport failures (connection errors, 5xx)
    ///
    /// Rate-limit handling is separate; see
    /// [`RetryPolicy`](crate::retry::RetryPolicy).
    pub max_retries: u32,

    /// Optional cap on generated tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_retries: 2,
            max_tokens: None,
        }
    }
}

impl ChatConfig {
    /// Create a configuration for `model` with default settings
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Self::default()
        }
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the transport retry count
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    /// Cap generated tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }
}

/// One call to a reasoning service
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatRequest {
    /// Conversation so far, oldest first
    pub messages: Vec<Message>,

    /// Tools the model may request
    pub tools: Vec<ToolDefinition>,
}

impl ChatRequest {
    /// Create a request without tools
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            tools: Vec::new(),
        }
    }

    /// Advertise tools to the model
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }
}
