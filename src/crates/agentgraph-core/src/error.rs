//! Error types for graph construction and execution
//!
//! All errors implement `std::error::Error` via `thiserror`.
//!
//! # Error Hierarchy
//!
//! ```text
//! GraphError
//! ├── Validation       - structural violation found by `compile()`
//! ├── Routing          - router returned a destination the graph does not know
//! ├── Upstream         - reasoning/tool service failure (incl. exhausted rate-limit retry)
//! ├── EmptyState       - a node would have received zero messages
//! ├── RecursionLimit   - optional per-run step cap exceeded
//! ├── InvalidThread    - empty thread id given to a persistent run
//! ├── Checkpoint       - checkpoint store failure
//! └── Serialization    - state could not be (de)serialized for a checkpoint
//!
//! ModelError           - failure signalled by a reasoning service
//! ├── RateLimited      - transient, carries an optional retry-after
//! └── Upstream         - anything else
//! ```
//!
//! `Validation` is only ever produced before a run starts. Every other variant
//! aborts the run in progress, and no checkpoint is written for the partial
//! state.
//!
//! # Matching Specific Errors
//!
//! ```rust
//! use agentgraph_core::GraphError;
//!
//! fn describe(err: &GraphError) -> &'static str {
//!     match err {
//!         GraphError::Validation(_) => "fix the graph definition",
//!         GraphError::Routing { .. } => "router returned an unknown node",
//!         GraphError::Upstream { .. } => "service call failed, try again",
//!         _ => "other failure",
//!     }
//! }
//! ```

use std::time::Duration;
use thiserror::Error;

/// Convenience result type using [`GraphError`]
pub type Result<T> = std::result::Result<T, GraphError>;

/// Errors raised while compiling or running a graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// Graph structure is invalid
    #[error("Graph validation failed: {0}")]
    Validation(String),

    /// Router returned a destination that is not part of the compiled graph
    #[error("Node '{node}' routed to unknown destination '{destination}'")]
    Routing {
        /// Node whose router produced the destination
        node: String,
        /// The offending destination
        destination: String,
    },

    /// Failure from the reasoning or tool service
    #[error("Node '{node}' failed: {message}")]
    Upstream {
        /// Node that was executing
        node: String,
        /// Failure description
        message: String,
    },

    /// A node would have been executed against a state with no messages
    #[error("Node '{node}' cannot run on an empty conversation")]
    EmptyState {
        /// Node that was about to execute
        node: String,
    },

    /// Per-run step cap exceeded
    #[error("Run exceeded the recursion limit of {limit} steps")]
    RecursionLimit {
        /// Configured limit
        limit: usize,
    },

    /// Thread id cannot address a checkpoint
    #[error("Invalid thread id '{0}': must not be empty")]
    InvalidThread(String),

    /// Checkpoint store error
    #[error("Checkpoint error: {0}")]
    Checkpoint(#[from] agentgraph_checkpoint::CheckpointError),

    /// State serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GraphError {
    /// Build an [`GraphError::Upstream`] for `node`
    pub fn upstream(node: impl Into<String>, message: impl std::fmt::Display) -> Self {
        GraphError::Upstream {
            node: node.into(),
            message: message.to_string(),
        }
    }
}

/// Errors signalled by a reasoning service
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The service asked the caller to back off
    #[error("Rate limited{}: {message}", .retry_after.map(|d| format!(" (retry after {:?})", d)).unwrap_or_default())]
    RateLimited {
        /// How long the service asked us to wait, if it said
        retry_after: Option<Duration>,
        /// Service-provided description
        message: String,
    },

    /// Any other failure
    #[error("{0}")]
    Upstream(String),
}

impl ModelError {
    /// Create a rate-limit error
    pub fn rate_limited(retry_after: Option<Duration>, message: impl Into<String>) -> Self {
        ModelError::RateLimited {
            retry_after,
            message: message.into(),
        }
    }

    /// Check if this error is a rate-limit signal
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, ModelError::RateLimited { .. })
    }
}
