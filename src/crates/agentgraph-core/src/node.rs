//! Nodes and the node registry
//!
//! A [`Node`] is a named unit of work: it reads the current
//! [`ConversationState`] and returns a [`StateUpdate`] holding the messages to
//! append. Nodes are dispatched by name through a [`NodeRegistry`]; the executor
//! never needs to know which concrete type sits behind a name.
//!
//! Implement [`Node`] for structs that carry dependencies, or wrap an async
//! closure with [`FnNode`]:
//!
//! ```rust
//! use agentgraph_core::{FnNode, Message, StateUpdate};
//!
//! let echo = FnNode::new(|state| {
//!     Box::pin(async move {
//!         let last = state.last_message().map(|m| m.content.clone()).unwrap_or_default();
//!         Ok(StateUpdate::message(Message::assistant(last)))
//!     })
//! });
//! # let _ = echo;
//! ```

use crate::error::Result;
use crate::graph::NodeId;
use crate::state::{ConversationState, StateUpdate};
use async_trait::async_trait;
use futures::future::BoxFuture;
use std::collections::HashMap;
use std::sync::Arc;

/// A state-transforming step in the graph
#[async_trait]
pub trait Node: Send + Sync {
    /// Run the node against the current state and return the messages to append
    async fn execute(&self, state: &ConversationState) -> Result<StateUpdate>;
}

/// Boxed async function usable as a node body
pub type NodeFn =
    Arc<dyn Fn(ConversationState) -> BoxFuture<'static, Result<StateUpdate>> + Send + Sync>;

/// Adapter turning an async closure into a [`Node`]
///
/// The closure receives an owned copy of the state.
#[derive(Clone)]
pub struct FnNode {
    func: NodeFn,
}

impl FnNode {
    /// Wrap a closure
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(ConversationState) -> BoxFuture<'static, Result<StateUpdate>> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }
}

#[async_trait]
impl Node for FnNode {
    async fn execute(&self, state: &ConversationState) -> Result<StateUpdate> {
        (self.func)(state.clone()).await
    }
}

impl std::fmt::Debug for FnNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnNode").field("func", &"<function>").finish()
    }
}

/// Name-to-node lookup table
#[derive(Clone, Default)]
pub struct NodeRegistry {
    nodes: HashMap<NodeId, Arc<dyn Node>>,
}

impl NodeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `node` under `name`
    ///
    /// Returns the node previously registered under the same name, if any.
    pub fn register(&mut self, name: impl Into<NodeId>, node: Arc<dyn Node>) -> Option<Arc<dyn Node>> {
        self.nodes.insert(name.into(), node)
    }

    /// Look up a node by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Node>> {
        self.nodes.get(name)
    }

    /// Check whether a node with this name exists
    pub fn contains(&self, name: &str) -> bool {
        self.nodes.contains_key(name)
    }

    /// Names of all registered nodes, sorted
    pub fn names(&self) -> Vec<NodeId> {
        let mut names: Vec<NodeId> = self.nodes.keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered nodes
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl std::fmt::Debug for NodeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeRegistry")
            .field("nodes", &self.names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::Message;

    fn echo() -> FnNode {
        FnNode::new(|state| {
            Box::pin(async move {
                let content = state.last_message().map(|m| m.content.clone()).unwrap_or_default();
                Ok(StateUpdate::message(Message::assistant(content)))
            })
        })
    }

    #[tokio::test]
    async fn test_fn_node_execution() {
        let state = ConversationState::new().with_message(Message::user("ping"));
        let update = echo().execute(&state).await.unwrap();

        assert_eq!(update.messages, vec![Message::assistant("ping")]);
        // input state is untouched
        assert_eq!(state.len(), 1);
    }

    #[tokio::test]
    async fn test_registry_dispatch_by_name() {
        let mut registry = NodeRegistry::new();
        assert!(registry.register("echo", Arc::new(echo())).is_none());
        assert!(registry.register("echo", Arc::new(echo())).is_some());

        assert!(registry.contains("echo"));
        assert!(!registry.contains("missing"));
        assert_eq!(registry.names(), vec!["echo".to_string()]);

        let node = registry.get("echo").unwrap();
        let state = ConversationState::new().with_message(Message::user("hi"));
        let update = node.execute(&state).await.unwrap();
        assert_eq!(update.messages[0].content, "hi");
    }
}
