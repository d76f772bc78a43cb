//! # agentgraph-checkpoint - Thread State Persistence
//!
//! Trait-based checkpoint abstractions for persisting conversation state between
//! graph runs.
//!
//! ## Overview
//!
//! A **thread** is a caller-supplied identifier that scopes persisted state.
//! After every completed run on a thread, the executor stores the final state as
//! a [`Checkpoint`]. The next run on the same thread loads the latest checkpoint
//! and appends its new input to it, so messages accumulate across calls. Runs on
//! different thread ids never see each other's state.
//!
//! ## Core Types
//!
//! - [`CheckpointSaver`] - storage backend trait (`get`, `put`, `list`, `delete_thread`)
//! - [`InMemoryCheckpointSaver`] - volatile reference implementation
//! - [`Checkpoint`] - snapshot of one thread, state stored as JSON
//! - [`CheckpointMetadata`] - step count and free-form extras
//!
//! ## Lifecycle
//!
//! ```text
//! run #1 (thread "t")  ->  put(cp0)          history: [cp0]
//! run #2 (thread "t")  ->  get() == cp0
//!                      ->  put(cp1)          history: [cp0, cp1]
//! caller               ->  delete_thread("t") history: []
//! ```
//!
//! Checkpoints are created lazily on a thread's first completed run and are
//! never deleted by the engine itself.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use agentgraph_checkpoint::{Checkpoint, CheckpointMetadata, CheckpointSaver, InMemoryCheckpointSaver};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let saver = InMemoryCheckpointSaver::new();
//!
//!     let checkpoint = Checkpoint::new("thread-123", json!({"messages": []}))
//!         .with_metadata(CheckpointMetadata::new().with_step(2));
//!     let id = saver.put(checkpoint).await?;
//!     println!("Checkpoint saved with ID: {}", id);
//!
//!     if let Some(latest) = saver.get("thread-123").await? {
//!         println!("Latest values: {}", latest.values);
//!     }
//!     Ok(())
//! }
//! ```

pub mod checkpoint;
pub mod error;
pub mod memory;
pub mod traits;

pub use checkpoint::{Checkpoint, CheckpointId, CheckpointMetadata};
pub use error::{CheckpointError, Result};
pub use memory::InMemoryCheckpointSaver;
pub use traits::{CheckpointSaver, CheckpointStream};
