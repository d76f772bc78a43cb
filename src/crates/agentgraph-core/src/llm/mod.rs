//! Reasoning service integration traits and types
//!
//! The core crate is provider-agnostic. It defines the [`ChatModel`] trait that
//! agent nodes call, the [`ChatRequest`] they send and the [`ChatConfig`] a
//! client is built from. Concrete clients live in the `llm` crate; tests use
//! scripted implementations.
//!
//! # Quick Start
//!
//! ```rust
//! use agentgraph_core::llm::{ChatModel, ChatRequest};
//! use agentgraph_core::{Message, ModelError};
//! use async_trait::async_trait;
//!
//! struct Parrot;
//!
//! #[async_trait]
//! impl ChatModel for Parrot {
//!     async fn chat(&self, request: ChatRequest) -> Result<Message, ModelError> {
//!         let last = request.messages.last().map(|m| m.content.clone()).unwrap_or_default();
//!         Ok(Message::assistant(last))
//!     }
//! }
//! ```

pub mod config;
pub mod tools;
pub mod traits;

pub use config::{ChatConfig, ChatRequest};
pub use tools::ToolDefinition;
pub use traits::ChatModel;
