//! # agentgraph-core - Conversational Agent Graphs
//!
//! A small orchestration engine for conversational agents: nodes that transform
//! a shared message history, wired together as a directed graph and executed
//! one step at a time.
//!
//! ## Overview
//!
//! - **Sequential execution** - exactly one node runs at a time, in routing order
//! - **Append-only state** - nodes return messages to append, never replacements
//! - **Conditional routing** - pure router functions pick the next node from state
//! - **Thread persistence** - a checkpointer carries history across runs per thread id
//! - **Bounded rate-limit retry** - agents wait out a service's back-off request once
//!
//! ## Core Concepts
//!
//! ### 1. StateGraph - Primary API
//!
//! [`StateGraph`] collects nodes and edges. [`StateGraph::compile`] validates the
//! structure and returns a [`CompiledGraph`], which is immutable and can be
//! shared across tasks.
//!
//! ### 2. Conversation State
//!
//! [`ConversationState`] is an ordered list of [`Message`]s. A node reads the
//! whole state and returns a [`StateUpdate`]; the executor appends its messages
//! before routing.
//!
//! ### 3. Pseudo-Nodes
//!
//! [`START`] and [`END`] mark entry and exit. `START` must have exactly one
//! unconditional edge, and a run finishes when routing reaches `END`.
//!
//! ### 4. Checkpointing
//!
//! With a [`CheckpointSaver`](agentgraph_checkpoint::CheckpointSaver) attached,
//! `run(input, Some(thread_id))` loads the thread's history, appends `input`,
//! runs, and saves the final state. Failed runs save nothing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agentgraph_checkpoint::InMemoryCheckpointSaver;
//! use agentgraph_core::{ConversationState, Message, StateGraph, StateUpdate, END, START};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut graph = StateGraph::new();
//!     graph.add_node("agent", |state| {
//!         Box::pin(async move {
//!             let reply = format!("I have seen {} messages", state.len());
//!             Ok(StateUpdate::message(Message::assistant(reply)))
//!         })
//!     });
//!     graph.add_edge(START, "agent");
//!     graph.add_edge("agent", END);
//!
//!     let app = graph
//!         .compile()?
//!         .with_checkpointer(Arc::new(InMemoryCheckpointSaver::new()));
//!
//!     let input = ConversationState::new().with_message(Message::user("Hello"));
//!     let result = app.run(input, Some("thread-1")).await?;
//!     println!("{}", result.last_message().map(|m| m.content.as_str()).unwrap_or(""));
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`builder`] - [`StateGraph`] builder
//! - [`graph`] - graph structure, edges and validation rules
//! - [`compiled`] - [`CompiledGraph`] executor
//! - [`node`] - [`Node`] trait, [`FnNode`] adapter and [`NodeRegistry`]
//! - [`state`] / [`messages`] - conversation data model
//! - [`retry`] - rate-limit [`RetryPolicy`]
//! - [`llm`] - [`ChatModel`](llm::ChatModel) trait and request types
//! - [`error`] - [`GraphError`] and [`ModelError`]

pub mod builder;
pub mod compiled;
pub mod error;
pub mod graph;
pub mod llm;
pub mod messages;
pub mod node;
pub mod retry;
pub mod state;

pub use builder::StateGraph;
pub use compiled::CompiledGraph;
pub use error::{GraphError, ModelError, Result};
pub use graph::{Edge, Graph, NodeId, RouterFn, END, START};
pub use messages::{Message, Role, ToolCall};
pub use node::{FnNode, Node, NodeFn, NodeRegistry};
pub use retry::RetryPolicy;
pub use state::{ConversationState, StateUpdate};
