//! Agent Patterns - the conversational agent loop
//!
//! Two ready-made graphs share the same `agent` node:
//!
//! 1. **Chat agent** ([`create_chat_agent`]) - one model call per run
//!
//!    ```text
//!    START ──► agent ──► END
//!    ```
//!
//! 2. **Tool agent** ([`create_tool_agent`]) - the model may request tools;
//!    [`should_continue`] loops through `tools` until it answers directly
//!
//!    ```text
//!    START ──► agent ──(should_continue)──► END
//!                ▲            │
//!                │            ▼
//!                └──────── tools
//!    ```
//!
//! Both return an [`AgentConfig`] to attach a checkpointer, system prompt,
//! retry policy or recursion limit before [`build`](AgentConfig::build).

mod agent_node;
mod react;

pub use agent_node::AgentNode;
pub use react::{create_chat_agent, create_tool_agent, should_continue, AgentConfig};

/// Name of the node that calls the reasoning service
pub const AGENT: &str = "agent";

/// Name of the node that executes tool calls
pub const TOOLS: &str = "tools";
