//! StateGraph builder API for constructing conversational agent graphs
//!
//! [`StateGraph`] is a fluent builder: declare nodes, wire them with direct and
//! conditional edges, then [`compile`](StateGraph::compile) into an immutable
//! [`CompiledGraph`] that can be run any number of times.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  StateGraph (Builder)                        │
//! │                                              │
//! │   START ──► agent ──(should_continue)──► END │
//! │               ▲             │                │
//! │               └── tools ◄───┘                │
//! └──────────────────────────────────────────────┘
//!                     │ compile()
//!                     ▼
//! ┌──────────────────────────────────────────────┐
//! │  CompiledGraph (Executable)                  │
//! │                                              │
//! │  • one node at a time, in routing order      │
//! │  • append-only message state                 │
//! │  • checkpoint per thread on completion       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use agentgraph_core::{ConversationState, Message, StateGraph, StateUpdate, END, START};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let mut graph = StateGraph::new();
//!
//! graph.add_node("agent", |state| {
//!     Box::pin(async move {
//!         let question = state.last_message().map(|m| m.content.clone()).unwrap_or_default();
//!         Ok(StateUpdate::message(Message::assistant(format!("You said: {}", question))))
//!     })
//! });
//!
//! graph.add_edge(START, "agent");
//! graph.add_edge("agent", END);
//!
//! let compiled = graph.compile()?;
//! let result = compiled
//!     .run(ConversationState::new().with_message(Message::user("Hello")), None)
//!     .await?;
//! assert_eq!(result.len(), 2);
//! # Ok(())
//! # }
//! ```
//!
//! # Conditional Routing
//!
//! A router inspects the state after its source node ran and names the next node.
//! The `branches` list declares every name it may return:
//!
//! ```rust,no_run
//! use agentgraph_core::{StateGraph, END};
//!
//! let mut graph = StateGraph::new();
//! // ... add "agent" and "tools" nodes ...
//! graph.add_conditional_edge(
//!     "agent",
//!     |state| {
//!         if state.pending_tool_calls().is_empty() {
//!             END.to_string()
//!         } else {
//!             "tools".to_string()
//!         }
//!     },
//!     ["tools", END],
//! );
//! graph.add_edge("tools", "agent");
//! ```

use crate::compiled::CompiledGraph;
use crate::error::{GraphError, Result};
use crate::graph::{Graph, NodeId};
use crate::node::{FnNode, Node};
use crate::state::{ConversationState, StateUpdate};
use futures::future::BoxFuture;
use std::sync::Arc;

/// Builder for conversational agent graphs
#[derive(Debug, Default)]
pub struct StateGraph {
    graph: Graph,
}

impl StateGraph {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node backed by an async closure
    ///
    /// The closure receives an owned copy of the current state and returns the
    /// messages to append.
    pub fn add_node<F>(&mut self, id: impl Into<NodeId>, executor: F) -> &mut Self
    where
        F: Fn(ConversationState) -> BoxFuture<'static, Result<StateUpdate>> + Send + Sync + 'static,
    {
        self.graph.add_node(id.into(), Arc::new(FnNode::new(executor)));
        self
    }

    /// Add a node backed by a [`Node`] implementation
    ///
    /// Use this for nodes that carry their own dependencies, such as a model
    /// client or a tool registry.
    pub fn add_node_with_executor(&mut self, id: impl Into<NodeId>, node: Arc<dyn Node>) -> &mut Self {
        self.graph.add_node(id.into(), node);
        self
    }

    /// Add an unconditional edge
    pub fn add_edge(&mut self, from: impl Into<NodeId>, to: impl Into<NodeId>) -> &mut Self {
        self.graph.add_edge(from.into(), to.into());
        self
    }

    /// Add a conditional edge that routes based on state
    ///
    /// # Arguments
    ///
    /// * `from` - Source node ID
    /// * `router` - Pure function of the state returning the next node or [`END`](crate::END)
    /// * `branches` - Every destination `router` may return
    pub fn add_conditional_edge<F, I, S>(&mut self, from: impl Into<NodeId>, router: F, branches: I) -> &mut Self
    where
        F: Fn(&ConversationState) -> NodeId + Send + Sync + 'static,
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        let branches = branches.into_iter().map(Into::into).collect();
        self.graph
            .add_conditional_edge(from.into(), Arc::new(router), branches);
        self
    }

    /// Borrow the graph under construction
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Validate the graph and produce an executable [`CompiledGraph`]
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Validation`] naming the first violated rule. See
    /// [`Graph::validate`] for the full list.
    pub fn compile(self) -> Result<CompiledGraph> {
        self.graph.validate().map_err(GraphError::Validation)?;
        Ok(CompiledGraph::new(self.graph))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{END, START};
    use crate::messages::Message;

    fn reply(text: &'static str) -> impl Fn(ConversationState) -> BoxFuture<'static, Result<StateUpdate>> {
        move |_| Box::pin(async move { Ok(StateUpdate::message(Message::assistant(text))) })
    }

    #[test]
    fn test_compile_linear_graph() {
        let mut graph = StateGraph::new();
        graph.add_node("agent", reply("hi"));
        graph.add_edge(START, "agent");
        graph.add_edge("agent", END);

        let compiled = graph.compile().unwrap();
        assert_eq!(compiled.graph().nodes.names(), vec!["agent".to_string()]);
    }

    #[test]
    fn test_compile_rejects_unknown_target() {
        let mut graph = StateGraph::new();
        graph.add_node("agent", reply("hi"));
        graph.add_edge(START, "agent");
        graph.add_edge("agent", "missing");

        let err = graph.compile().unwrap_err();
        assert!(matches!(err, GraphError::Validation(ref msg) if msg.contains("missing")));
    }

    #[test]
    fn test_compile_rejects_undeclared_branch() {
        let mut graph = StateGraph::new();
        graph.add_node("agent", reply("hi"));
        graph.add_edge(START, "agent");
        graph.add_conditional_edge("agent", |_| END.to_string(), ["tools", END]);

        assert!(matches!(graph.compile(), Err(GraphError::Validation(_))));
    }

    #[test]
    fn test_chaining() {
        let mut graph = StateGraph::new();
        graph
            .add_node("a", reply("a"))
            .add_node("b", reply("b"))
            .add_edge(START, "a")
            .add_edge("a", "b")
            .add_edge("b", END);

        assert!(graph.compile().is_ok());
    }
}
