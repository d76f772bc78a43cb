//! Checkpoint data structures
//!
//! A [`Checkpoint`] is the persisted snapshot of one conversation thread at the
//! end of its last completed run. The saved state is stored as an opaque
//! [`serde_json::Value`] so this crate stays independent of the message types
//! defined by `agentgraph-core`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

/// Unique identifier of a saved checkpoint
pub type CheckpointId = String;

/// Metadata recorded alongside a checkpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CheckpointMetadata {
    /// Number of node executions in the run that produced this checkpoint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,

    /// Free-form metadata supplied by the writer
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub extra: HashMap<String, serde_json::Value>,
}

impl CheckpointMetadata {
    /// Create empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the step count
    pub fn with_step(mut self, step: usize) -> Self {
        self.step = Some(step);
        self
    }

    /// Attach an extra metadata entry
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// Snapshot of a thread's state at a point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// The version of the checkpoint format (currently 1)
    pub v: i32,

    /// The ID of the checkpoint
    pub id: CheckpointId,

    /// The thread this checkpoint belongs to
    pub thread_id: String,

    /// The timestamp of the checkpoint
    pub ts: DateTime<Utc>,

    /// Serialized thread state
    pub values: serde_json::Value,

    /// Checkpoint metadata
    #[serde(default)]
    pub metadata: CheckpointMetadata,
}

impl Checkpoint {
    /// Current checkpoint format version
    pub const CURRENT_VERSION: i32 = 1;

    /// Create a new checkpoint for `thread_id` holding `values`
    pub fn new(thread_id: impl Into<String>, values: serde_json::Value) -> Self {
        Self {
            v: Self::CURRENT_VERSION,
            id: Uuid::new_v4().to_string(),
            thread_id: thread_id.into(),
            ts: Utc::now(),
            values,
            metadata: CheckpointMetadata::default(),
        }
    }

    /// Replace the checkpoint metadata
    pub fn with_metadata(mut self, metadata: CheckpointMetadata) -> Self {
        self.metadata = metadata;
        self
    }
}
