//! CompiledGraph struct and builder methods

use crate::graph::Graph;
use agentgraph_checkpoint::CheckpointSaver;
use std::sync::Arc;

/// Compiled graph ready for execution
#[derive(Clone)]
pub struct CompiledGraph {
    pub(crate) graph: Arc<Graph>,
    pub(crate) checkpoint_saver: Option<Arc<dyn CheckpointSaver>>,
    pub(crate) recursion_limit: Option<usize>,
}

impl CompiledGraph {
    /// Wrap an already validated graph
    pub(crate) fn new(graph: Graph) -> Self {
        Self {
            graph: Arc::new(graph),
            checkpoint_saver: None,
            recursion_limit: None,
        }
    }

    /// Set the checkpoint saver used for threaded runs
    pub fn with_checkpointer(mut self, saver: Arc<dyn CheckpointSaver>) -> Self {
        self.checkpoint_saver = Some(saver);
        self
    }

    /// Cap the number of node executions per run
    ///
    /// Unset by default: a graph whose router never returns
    /// [`END`](crate::END) runs until a node fails.
    pub fn with_recursion_limit(mut self, limit: usize) -> Self {
        self.recursion_limit = Some(limit);
        self
    }

    /// Get a reference to the underlying graph
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Configured recursion limit, if any
    pub fn recursion_limit(&self) -> Option<usize> {
        self.recursion_limit
    }

    /// Get the checkpoint saver
    pub fn checkpoint_saver(&self) -> Option<&Arc<dyn CheckpointSaver>> {
        self.checkpoint_saver.as_ref()
    }
}

impl std::fmt::Debug for CompiledGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompiledGraph")
            .field("graph", &self.graph)
            .field("checkpointer", &self.checkpoint_saver.is_some())
            .field("recursion_limit", &self.recursion_limit)
            .finish()
    }
}
