//! OpenAI-compatible chat completions client.
//!
//! Works against any provider exposing `POST {base_url}/chat/completions` in the
//! OpenAI wire format. The default configuration targets Groq.
//!
//! # Error mapping
//!
//! | Response | Result |
//! |----------|--------|
//! | 429 | [`ModelError::RateLimited`] with the `Retry-After` delay |
//! | 401 / 403 | upstream error, not retried |
//! | 5xx, connection failure | retried up to `max_retries` with backoff, then upstream error |
//! | other 4xx, malformed body | upstream error, not retried |
//!
//! # Example
//!
//! ```rust,no_run
//! use agentgraph_core::llm::{ChatModel, ChatRequest};
//! use agentgraph_core::Message;
//! use llm::config::{RemoteLlmConfig, GROQ_API_KEY_ENV, GROQ_BASE_URL};
//! use llm::remote::OpenAiCompatibleClient;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RemoteLlmConfig::from_env(GROQ_API_KEY_ENV, GROQ_BASE_URL, "openai/gpt-oss-120b")?;
//! let client = OpenAiCompatibleClient::new(config)?;
//!
//! let reply = client.chat(ChatRequest::new(vec![Message::user("Hello!")])).await?;
//! println!("{}", reply.content);
//! # Ok(())
//! # }
//! ```

use crate::backoff;
use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use agentgraph_core::llm::{ChatModel, ChatRequest, ToolDefinition};
use agentgraph_core::{Message, ModelError, Role, ToolCall};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

/// Client for OpenAI-compatible chat completion APIs.
#[derive(Clone)]
pub struct OpenAiCompatibleClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl OpenAiCompatibleClient {
    /// Create a new client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// The client configuration.
    pub fn config(&self) -> &RemoteLlmConfig {
        &self.config
    }

    /// Send `request`, retrying transport failures.
    pub async fn complete(&self, request: &ChatRequest) -> Result<Message> {
        let body = self.build_request(request);
        let mut attempt = 0;

        loop {
            match self.send_once(&body).await {
                Err(err) if err.is_retryable() && attempt < self.config.max_retries => {
                    let delay = backoff::delay(attempt);
                    attempt += 1;
                    warn!(
                        attempt,
                        max_retries = self.config.max_retries,
                        delay_ms = delay.as_millis() as u64,
                        "Transport failure, retrying: {}",
                        err
                    );
                    tokio::time::sleep(delay).await;
                }
                result => return result,
            }
        }
    }

    fn build_request(&self, request: &ChatRequest) -> WireRequest {
        WireRequest {
            model: self.config.model.clone(),
            messages: request.messages.iter().map(to_wire_message).collect(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            tools: request.tools.iter().map(to_wire_tool).collect(),
            stream: false,
        }
    }

    async fn send_once(&self, body: &WireRequest) -> Result<Message> {
        let url = format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'));
        debug!(%url, model = %body.model, messages = body.messages.len(), "Sending chat completion");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let retry_after = parse_retry_after(response.headers());
        let text = response.text().await?;

        if !status.is_success() {
            return Err(status_error(status, retry_after, &text));
        }

        let parsed: WireResponse = serde_json::from_str(&text)
            .map_err(|e| LlmError::InvalidResponse(format!("{}: {}", e, text)))?;
        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("response has no choices".into()))?;

        debug!(finish_reason = ?choice.finish_reason, "Received chat completion");
        from_wire_message(choice.message)
    }
}

#[async_trait]
impl ChatModel for OpenAiCompatibleClient {
    async fn chat(&self, request: ChatRequest) -> std::result::Result<Message, ModelError> {
        self.complete(&request).await.map_err(ModelError::from)
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

impl std::fmt::Debug for OpenAiCompatibleClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiCompatibleClient")
            .field("base_url", &self.config.base_url)
            .field("model", &self.config.model)
            .finish()
    }
}

/// `Retry-After` in seconds; fractional values are accepted.
///
/// Values that do not fit a [`Duration`] are ignored, leaving the caller's
/// default wait in place.
fn parse_retry_after(headers: &HeaderMap) -> Option<Duration> {
    let value = headers.get(RETRY_AFTER)?.to_str().ok()?;
    let secs: f64 = value.trim().parse().ok()?;
    Duration::try_from_secs_f64(secs).ok()
}

fn status_error(status: StatusCode, retry_after: Option<Duration>, body: &str) -> LlmError {
    let message = error_message(body);
    match status.as_u16() {
        401 | 403 => LlmError::AuthenticationError(message),
        429 => LlmError::RateLimitExceeded { retry_after, message },
        500..=599 => LlmError::ServiceUnavailable(format!("{}: {}", status, message)),
        _ => LlmError::ProviderError(format!("API error {}: {}", status, message)),
    }
}

/// `error.message` from an OpenAI-style error body, or the raw body
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message").and_then(Value::as_str).map(str::to_string))
        .unwrap_or_else(|| body.to_string())
}

fn to_wire_message(message: &Message) -> WireMessage {
    let has_calls = message.has_tool_calls();
    WireMessage {
        role: message.role.to_string(),
        // assistant turns that only call tools carry no content
        content: if has_calls && message.content.is_empty() {
            None
        } else {
            Some(message.content.clone())
        },
        tool_calls: message
            .tool_calls
            .iter()
            .map(|call| WireToolCall {
                id: call.id.clone(),
                kind: "function".to_string(),
                function: WireFunctionCall {
                    name: call.name.clone(),
                    arguments: call.args.to_string(),
                },
            })
            .collect(),
        tool_call_id: message.tool_call_id.clone(),
        name: message.name.clone(),
    }
}

fn from_wire_message(message: WireMessage) -> Result<Message> {
    let tool_calls = message
        .tool_calls
        .into_iter()
        .map(|call| {
            let args = if call.function.arguments.trim().is_empty() {
                Value::Object(Default::default())
            } else {
                serde_json::from_str(&call.function.arguments).map_err(|e| {
                    LlmError::InvalidResponse(format!(
                        "tool call {} has invalid arguments: {}",
                        call.id, e
                    ))
                })?
            };
            Ok(ToolCall::new(call.id, call.function.name, args))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Message::new(Role::Assistant, message.content.unwrap_or_default()).with_tool_calls(tool_calls))
}

fn to_wire_tool(tool: &ToolDefinition) -> WireTool {
    WireTool {
        kind: "function".to_string(),
        function: WireFunction {
            name: tool.name.clone(),
            description: tool.description.clone(),
            parameters: tool.parameters.clone(),
        },
    }
}

// OpenAI API types
#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<WireTool>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(default)]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    arguments: String,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: String,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    choices: Vec<WireChoice>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

fn function_kind() -> String {
    "function".to_string()
}
