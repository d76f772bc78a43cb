//! # agentgraph-prebuilt - Ready-Made Agent Nodes
//!
//! The building blocks of a conversational agent on top of `agentgraph-core`:
//!
//! - [`AgentNode`] - calls a [`ChatModel`](agentgraph_core::llm::ChatModel) under a rate-limit retry policy
//! - [`ToolNode`] - runs every pending tool call through a [`ToolService`]
//! - [`should_continue`] - routes to `tools` while the model keeps requesting them
//! - [`create_chat_agent`] / [`create_tool_agent`] - wire the above into a compiled graph
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agentgraph_core::llm::ChatModel;
//! use agentgraph_core::{ConversationState, Message};
//! use agentgraph_prebuilt::create_chat_agent;
//! use std::sync::Arc;
//!
//! # async fn example(model: Arc<dyn ChatModel>) -> Result<(), Box<dyn std::error::Error>> {
//! let agent = create_chat_agent(model).build()?;
//! let result = agent
//!     .invoke(ConversationState::new().with_message(Message::user("Hello")))
//!     .await?;
//! println!("AI: {}", result.last_message().map(|m| m.content.as_str()).unwrap_or(""));
//! # Ok(())
//! # }
//! ```

pub mod agents;
pub mod error;
pub mod tool_node;
pub mod tools;

pub use agents::{
    create_chat_agent, create_tool_agent, should_continue, AgentConfig, AgentNode, AGENT, TOOLS,
};
pub use error::{PrebuiltError, Result};
pub use tool_node::ToolNode;
pub use tools::{Tool, ToolInput, ToolOutput, ToolRegistry, ToolService};
