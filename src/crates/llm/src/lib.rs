//! Reasoning service clients for agentgraph.
//!
//! This crate provides a concrete implementation of the
//! [`ChatModel`](agentgraph_core::llm::ChatModel) trait from `agentgraph-core`
//! for OpenAI-compatible chat completion APIs, with Groq as the default
//! provider.
//!
//! # Retries
//!
//! The client retries connection failures and 5xx responses itself, with
//! exponential backoff. Rate limits (HTTP 429) are not retried here: they are
//! returned as [`ModelError::RateLimited`](agentgraph_core::ModelError::RateLimited)
//! so the agent node's retry policy can honour the server's `Retry-After`.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use agentgraph_core::llm::{ChatModel, ChatRequest};
//! use agentgraph_core::Message;
//! use llm::config::RemoteLlmConfig;
//! use llm::remote::OpenAiCompatibleClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = RemoteLlmConfig::groq(std::env::var("GROQ_API_KEY")?);
//!     let client = OpenAiCompatibleClient::new(config)?;
//!
//!     let request = ChatRequest::new(vec![Message::user("What is Rust?")]);
//!     let response = client.chat(request).await?;
//!     println!("Response: {}", response.content);
//!
//!     Ok(())
//! }
//! ```

mod backoff;
pub mod config;
pub mod error;
pub mod remote;

pub use config::{RemoteLlmConfig, GROQ_API_KEY_ENV, GROQ_BASE_URL};
pub use error::{LlmError, Result};
pub use remote::OpenAiCompatibleClient;
