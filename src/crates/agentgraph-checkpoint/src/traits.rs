//! Checkpoint storage trait for pluggable backends
//!
//! [`CheckpointSaver`] is the seam between the executor and whatever keeps
//! thread state between runs. The executor only ever calls [`get`](CheckpointSaver::get)
//! before a run and [`put`](CheckpointSaver::put) after a run completes; the
//! remaining methods exist for callers that inspect or evict history.
//!
//! # Concurrency
//!
//! Backends are not required to coordinate concurrent writers on the same
//! thread. Two runs racing on one thread id may interleave their `put` calls in
//! any order; callers that need ordering must serialize runs per thread.
//!
//! # Implementing a Backend
//!
//! ```rust,ignore
//! use agentgraph_checkpoint::{Checkpoint, CheckpointSaver, CheckpointStream, Result};
//! use async_trait::async_trait;
//!
//! struct SqliteSaver { /* pool */ }
//!
//! #[async_trait]
//! impl CheckpointSaver for SqliteSaver {
//!     async fn get(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
//!         // SELECT ... WHERE thread_id = ? ORDER BY ts DESC LIMIT 1
//!         todo!()
//!     }
//!
//!     async fn put(&self, checkpoint: Checkpoint) -> Result<String> {
//!         // INSERT INTO checkpoints ...
//!         todo!()
//!     }
//!
//!     async fn list(&self, thread_id: &str, limit: Option<usize>) -> Result<CheckpointStream> {
//!         todo!()
//!     }
//!
//!     async fn delete_thread(&self, thread_id: &str) -> Result<()> {
//!         todo!()
//!     }
//! }
//! ```

use crate::checkpoint::{Checkpoint, CheckpointId};
use crate::error::Result;
use async_trait::async_trait;
use futures::Stream;
use std::pin::Pin;

/// Stream of checkpoints returned by [`CheckpointSaver::list`]
pub type CheckpointStream = Pin<Box<dyn Stream<Item = Result<Checkpoint>> + Send + 'static>>;

/// Core trait for checkpoint storage backends
#[async_trait]
pub trait CheckpointSaver: Send + Sync {
    /// Fetch the latest checkpoint for a thread, or `None` if the thread is unseen
    async fn get(&self, thread_id: &str) -> Result<Option<Checkpoint>>;

    /// Store a checkpoint as the newest snapshot of its thread
    ///
    /// Returns the ID of the stored checkpoint.
    async fn put(&self, checkpoint: Checkpoint) -> Result<CheckpointId>;

    /// List the checkpoints of a thread, newest first
    async fn list(&self, thread_id: &str, limit: Option<usize>) -> Result<CheckpointStream>;

    /// Delete every checkpoint of a thread
    ///
    /// The executor never calls this; eviction is the caller's decision.
    async fn delete_thread(&self, thread_id: &str) -> Result<()>;
}
