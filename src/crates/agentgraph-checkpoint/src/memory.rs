//! In-memory checkpoint storage
//!
//! [`InMemoryCheckpointSaver`] keeps every checkpoint in process memory behind a
//! `tokio` read/write lock. Each thread id maps to its checkpoint history in
//! insertion order, so the newest snapshot is always the last entry.
//!
//! ```text
//! Arc<RwLock<HashMap>>
//!   "session-1" -> [cp0, cp1, cp2]   (cp2 is what `get` returns)
//!   "session-2" -> [cp0]
//! ```
//!
//! History is unbounded unless [`InMemoryCheckpointSaver::with_history_limit`]
//! is set; otherwise `delete_thread` is the only eviction. Data is lost when
//! the process exits. Cloning the saver shares the same underlying storage.

use crate::{
    checkpoint::{Checkpoint, CheckpointId},
    error::{CheckpointError, Result},
    traits::{CheckpointSaver, CheckpointStream},
};
use async_trait::async_trait;
use futures::stream;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// Thread-safe in-memory checkpoint storage
type CheckpointStorage = Arc<RwLock<HashMap<String, Vec<Checkpoint>>>>;

/// In-memory checkpoint saver implementation
///
/// # Example
///
/// ```rust
/// use agentgraph_checkpoint::{Checkpoint, CheckpointSaver, InMemoryCheckpointSaver};
/// use serde_json::json;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let saver = InMemoryCheckpointSaver::new();
///     saver.put(Checkpoint::new("thread-1", json!({"messages": []}))).await?;
///
///     let latest = saver.get("thread-1").await?;
///     assert!(latest.is_some());
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCheckpointSaver {
    storage: CheckpointStorage,
    history_limit: Option<usize>,
}

impl InMemoryCheckpointSaver {
    /// Create a new in-memory checkpoint saver
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
            history_limit: None,
        }
    }

    /// Keep at most `limit` checkpoints per thread, dropping the oldest
    ///
    /// The latest checkpoint is always kept, so a limit of 0 behaves like 1.
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = Some(limit.max(1));
        self
    }

    /// Get the number of threads being tracked
    pub async fn thread_count(&self) -> usize {
        self.storage.read().await.len()
    }

    /// Get the total number of checkpoints across all threads
    pub async fn checkpoint_count(&self) -> usize {
        self.storage
            .read()
            .await
            .values()
            .map(|entries| entries.len())
            .sum()
    }

    /// Clear all checkpoints (useful for testing)
    pub async fn clear(&self) {
        self.storage.write().await.clear();
    }
}

#[async_trait]
impl CheckpointSaver for InMemoryCheckpointSaver {
    async fn get(&self, thread_id: &str) -> Result<Option<Checkpoint>> {
        let storage = self.storage.read().await;
        Ok(storage
            .get(thread_id)
            .and_then(|entries| entries.last())
            .cloned())
    }

    async fn put(&self, checkpoint: Checkpoint) -> Result<CheckpointId> {
        if checkpoint.thread_id.is_empty() {
            return Err(CheckpointError::Invalid("thread_id is required".to_string()));
        }

        let id = checkpoint.id.clone();
        let mut storage = self.storage.write().await;
        let entries = storage
            .entry(checkpoint.thread_id.clone())
            .or_insert_with(Vec::new);

        debug!(
            thread_id = %checkpoint.thread_id,
            checkpoint_id = %id,
            history = entries.len() + 1,
            "Stored checkpoint"
        );
        entries.push(checkpoint);

        if let Some(limit) = self.history_limit {
            let excess = entries.len().saturating_sub(limit);
            entries.drain(..excess);
        }

        Ok(id)
    }

    async fn list(&self, thread_id: &str, limit: Option<usize>) -> Result<CheckpointStream> {
        let storage = self.storage.read().await;
        let results: Vec<Result<Checkpoint>> = storage
            .get(thread_id)
            .map(|entries| {
                entries
                    .iter()
                    .rev()
                    .take(limit.unwrap_or(usize::MAX))
                    .cloned()
                    .map(Ok)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Box::pin(stream::iter(results)))
    }

    async fn delete_thread(&self, thread_id: &str) -> Result<()> {
        let mut storage = self.storage.write().await;
        storage.remove(thread_id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::StreamExt;
    use serde_json::json;

    #[tokio::test]
    async fn test_get_unseen_thread_returns_none() {
        let saver = InMemoryCheckpointSaver::new();
        assert!(saver.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_save_and_load_checkpoint() {
        let saver = InMemoryCheckpointSaver::new();
        let checkpoint = Checkpoint::new("thread-1", json!({"messages": ["hi"]}));

        let id = saver.put(checkpoint.clone()).await.unwrap();
        assert_eq!(id, checkpoint.id);

        let loaded = saver.get("thread-1").await.unwrap().unwrap();
        assert_eq!(loaded, checkpoint);
    }

    #[tokio::test]
    async fn test_latest_checkpoint_wins() {
        let saver = InMemoryCheckpointSaver::new();
        saver.put(Checkpoint::new("thread-1", json!(1))).await.unwrap();
        saver.put(Checkpoint::new("thread-1", json!(2))).await.unwrap();

        let loaded = saver.get("thread-1").await.unwrap().unwrap();
        assert_eq!(loaded.values, json!(2));
        assert_eq!(saver.checkpoint_count().await, 2);
    }

    #[tokio::test]
    async fn test_threads_are_isolated() {
        let saver = InMemoryCheckpointSaver::new();
        saver.put(Checkpoint::new("thread-1", json!("a"))).await.unwrap();
        saver.put(Checkpoint::new("thread-2", json!("b"))).await.unwrap();

        assert_eq!(saver.thread_count().await, 2);
        assert_eq!(saver.get("thread-1").await.unwrap().unwrap().values, json!("a"));
        assert_eq!(saver.get("thread-2").await.unwrap().unwrap().values, json!("b"));

        saver.clear().await;
        assert_eq!(saver.checkpoint_count().await, 0);
    }

    #[tokio::test]
    async fn test_list_checkpoints_newest_first() {
        let saver = InMemoryCheckpointSaver::new();
        for i in 0..3 {
            saver.put(Checkpoint::new("thread-1", json!(i))).await.unwrap();
        }

        let all: Vec<_> = saver.list("thread-1", None).await.unwrap().collect().await;
        let values: Vec<_> = all.into_iter().map(|c| c.unwrap().values).collect();
        assert_eq!(values, vec![json!(2), json!(1), json!(0)]);

        let limited: Vec<_> = saver.list("thread-1", Some(1)).await.unwrap().collect().await;
        assert_eq!(limited.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_thread() {
        let saver = InMemoryCheckpointSaver::new();
        saver.put(Checkpoint::new("thread-1", json!({}))).await.unwrap();

        saver.delete_thread("thread-1").await.unwrap();

        assert!(saver.get("thread-1").await.unwrap().is_none());
        assert_eq!(saver.thread_count().await, 0);
    }

    #[tokio::test]
    async fn test_history_limit_drops_oldest() {
        let saver = InMemoryCheckpointSaver::new().with_history_limit(2);
        for i in 0..5 {
            saver.put(Checkpoint::new("thread-1", json!(i))).await.unwrap();
        }
        saver.put(Checkpoint::new("thread-2", json!("x"))).await.unwrap();

        let kept: Vec<_> = saver.list("thread-1", None).await.unwrap().collect().await;
        let values: Vec<_> = kept.into_iter().map(|c| c.unwrap().values).collect();
        assert_eq!(values, vec![json!(4), json!(3)]);
        assert_eq!(saver.checkpoint_count().await, 3);

        let latest_only = InMemoryCheckpointSaver::new().with_history_limit(0);
        latest_only.put(Checkpoint::new("t", json!(1))).await.unwrap();
        latest_only.put(Checkpoint::new("t", json!(2))).await.unwrap();
        assert_eq!(latest_only.get("t").await.unwrap().unwrap().values, json!(2));
        assert_eq!(latest_only.checkpoint_count().await, 1);
    }

    #[tokio::test]
    async fn test_rejects_empty_thread_id() {
        let saver = InMemoryCheckpointSaver::new();
        let result = saver.put(Checkpoint::new("", json!({}))).await;
        assert!(matches!(result, Err(CheckpointError::Invalid(_))));
    }
}
