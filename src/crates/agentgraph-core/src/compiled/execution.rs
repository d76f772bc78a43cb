//! Graph execution methods (run, invoke, get_state)

use super::CompiledGraph;
use crate::error::{GraphError, Result};
use crate::graph::{Edge, NodeId, END, START};
use crate::state::ConversationState;
use agentgraph_checkpoint::{Checkpoint, CheckpointMetadata, CheckpointSaver};
use std::sync::Arc;
use tracing::{debug, info};

impl CompiledGraph {
    /// Run the graph once without persistence
    ///
    /// Equivalent to `run(input, None)`.
    pub async fn invoke(&self, input: ConversationState) -> Result<ConversationState> {
        self.run(input, None).await
    }

    /// Run the graph to completion
    ///
    /// When `thread_id` is given and a checkpointer is attached, the thread's
    /// saved state is loaded first and `input` is appended to it. On reaching
    /// [`END`] the final state is saved under the same thread. Without a
    /// checkpointer, `thread_id` is ignored.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvalidThread`] if a checkpointer is attached and
    ///   `thread_id` is blank; no node runs
    /// - [`GraphError::EmptyState`] if the combined state has no messages
    /// - [`GraphError::Routing`] if a router names a node outside its branches
    /// - [`GraphError::RecursionLimit`] if a configured cap is exceeded
    /// - whatever a node returns, typically [`GraphError::Upstream`]
    ///
    /// No checkpoint is written when the run fails.
    ///
    /// # Example: Multi-Turn Conversation
    ///
    /// ```rust,no_run
    /// use agentgraph_checkpoint::InMemoryCheckpointSaver;
    /// use agentgraph_core::{ConversationState, Message, StateGraph};
    /// use std::sync::Arc;
    ///
    /// # async fn example(graph: StateGraph) -> Result<(), Box<dyn std::error::Error>> {
    /// let compiled = graph
    ///     .compile()?
    ///     .with_checkpointer(Arc::new(InMemoryCheckpointSaver::new()));
    ///
    /// let turn = |text: &str| ConversationState::new().with_message(Message::user(text));
    ///
    /// compiled.run(turn("Hi, I'm Bob"), Some("1")).await?;
    /// let result = compiled.run(turn("What's my name?"), Some("1")).await?;
    ///
    /// // Both turns and both replies are in the history
    /// assert_eq!(result.len(), 4);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn run(&self, input: ConversationState, thread_id: Option<&str>) -> Result<ConversationState> {
        let persistence = match (thread_id, &self.checkpoint_saver) {
            (Some(thread_id), Some(_)) if thread_id.trim().is_empty() => {
                return Err(GraphError::InvalidThread(thread_id.to_string()));
            }
            (Some(thread_id), Some(saver)) => Some((thread_id, saver)),
            (Some(thread_id), None) => {
                debug!(thread_id, "No checkpointer attached, running without persistence");
                None
            }
            _ => None,
        };

        let mut state = match persistence {
            Some((thread_id, saver)) => load_state(saver, thread_id)
                .await?
                .unwrap_or_default(),
            None => ConversationState::new(),
        };
        state.extend(input);

        let mut current = self.entry_node()?;
        if state.is_empty() {
            return Err(GraphError::EmptyState { node: current });
        }

        let mut steps = 0usize;
        while current != END {
            if let Some(limit) = self.recursion_limit {
                if steps >= limit {
                    return Err(GraphError::RecursionLimit { limit });
                }
            }

            let node = self
                .graph
                .nodes
                .get(&current)
                .cloned()
                .ok_or_else(|| GraphError::Routing {
                    node: START.to_string(),
                    destination: current.clone(),
                })?;

            debug!(node = %current, step = steps, messages = state.len(), "Executing node");
            let update = node.execute(&state).await?;
            debug!(node = %current, appended = update.messages.len(), "Node completed");
            state.apply(update);
            steps += 1;

            current = self.next_node(&current, &state)?;
        }

        if let Some((thread_id, saver)) = persistence {
            let checkpoint = Checkpoint::new(thread_id, serde_json::to_value(&state)?)
                .with_metadata(CheckpointMetadata::new().with_step(steps));
            let checkpoint_id = saver.put(checkpoint).await?;
            debug!(thread_id, %checkpoint_id, "Saved checkpoint");
        }

        info!(steps, messages = state.len(), "Run completed");
        Ok(state)
    }

    /// Latest saved state for `thread_id`
    ///
    /// `None` when no checkpointer is attached or the thread has never
    /// completed a run.
    pub async fn get_state(&self, thread_id: &str) -> Result<Option<ConversationState>> {
        match &self.checkpoint_saver {
            Some(saver) => load_state(saver, thread_id).await,
            None => Ok(None),
        }
    }

    /// First node to execute: the sole successor of [`START`]
    fn entry_node(&self) -> Result<NodeId> {
        match self.graph.edges_from(START) {
            [Edge::Direct(to)] => Ok(to.clone()),
            _ => Err(GraphError::Validation(format!(
                "{} must have exactly one unconditional edge",
                START
            ))),
        }
    }

    /// Resolve the destination after `current` completed
    fn next_node(&self, current: &str, state: &ConversationState) -> Result<NodeId> {
        match self.graph.edges_from(current) {
            [Edge::Direct(to)] => Ok(to.clone()),
            [Edge::Conditional { router, branches }] => {
                let destination = router(state);
                let known = destination == END || self.graph.nodes.contains(&destination);

                if !known || !branches.contains(&destination) {
                    return Err(GraphError::Routing {
                        node: current.to_string(),
                        destination,
                    });
                }

                debug!(from = current, to = %destination, "Routed");
                Ok(destination)
            }
            _ => Err(GraphError::Validation(format!(
                "Node {} has no single outgoing edge",
                current
            ))),
        }
    }
}

async fn load_state(saver: &Arc<dyn CheckpointSaver>, thread_id: &str) -> Result<Option<ConversationState>> {
    match saver.get(thread_id).await? {
        Some(checkpoint) => {
            debug!(thread_id, checkpoint_id = %checkpoint.id, "Loaded checkpoint");
            Ok(Some(serde_json::from_value(checkpoint.values)?))
        }
        None => Ok(None),
    }
}
