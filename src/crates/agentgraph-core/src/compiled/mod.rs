//! CompiledGraph execution engine for conversational workflows
//!
//! Once a graph is built with [`StateGraph`](crate::StateGraph) and compiled it
//! becomes a [`CompiledGraph`]: an immutable, validated graph that can be run many
//! times, concurrently, against different threads.
//!
//! # Execution Model
//!
//! Execution is strictly sequential. Exactly one node runs at a time and its
//! update is appended to the state before routing is decided:
//!
//! ```text
//! load checkpoint(thread) ─► append input ─► current = successor(START)
//!                                                │
//!             ┌──────────────────────────────────┘
//!             ▼
//!      execute(current) ─► append update ─► route ─► END? ─► save checkpoint
//!             ▲                                │
//!             └────────────────────────────────┘
//! ```
//!
//! A failing node aborts the run. Nothing is written to the checkpoint store
//! for a failed run, so the thread's history still ends at its last completed
//! turn.

mod execution;
mod graph;
#[cfg(test)]
mod tests;

pub use graph::CompiledGraph;
