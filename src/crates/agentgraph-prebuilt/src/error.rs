//! Error Types - Prebuilt Component Errors
//!
//! - **Tool errors** - unknown tool, invalid arguments, failed execution
//! - **Graph errors** - failures while building the agent graph
//!
//! Inside a running graph, tool failures surface as
//! [`GraphError::Upstream`](agentgraph_core::GraphError::Upstream) naming the
//! `tools` node; `PrebuiltError` is what [`Tool`](crate::Tool) implementations
//! and the agent factories return.

use thiserror::Error;

/// Result type for prebuilt operations
pub type Result<T> = std::result::Result<T, PrebuiltError>;

/// Errors that can occur in prebuilt components
#[derive(Error, Debug)]
pub enum PrebuiltError {
    /// No tool registered under the requested name
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool execution error
    #[error("Tool execution failed: {0}")]
    ToolExecution(String),

    /// Invalid tool input
    #[error("Invalid tool input: {0}")]
    InvalidInput(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Graph error
    #[error("Graph error: {0}")]
    Graph(#[from] agentgraph_core::GraphError),
}
