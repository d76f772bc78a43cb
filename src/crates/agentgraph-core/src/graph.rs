//! Graph definition: nodes, edges and the structural rules a graph must obey
//!
//! A [`Graph`] is the raw, unvalidated description that [`StateGraph`](crate::StateGraph)
//! builds up. It holds:
//!
//! - **nodes**: a [`NodeRegistry`] mapping names to [`Node`](crate::Node) implementations
//! - **edges**: per source, the outgoing [`Edge`]s in declaration order
//! - two pseudo-nodes, [`START`] and [`END`], which never execute
//!
//! ```text
//!   START ──► agent ──(router)──► END
//!               ▲          │
//!               │          ▼
//!               └───────  tools
//! ```
//!
//! # Validation Rules
//!
//! [`Graph::validate`] enforces, in this order:
//!
//! 1. node names are unique and never collide with a pseudo-node
//! 2. every edge source is a declared node or `START`, every destination a
//!    declared node or `END`
//! 3. `START` has exactly one outgoing edge and it is unconditional
//! 4. each node has at most one conditional edge, and a node with a conditional
//!    edge has no unconditional edge besides it
//! 5. each node without a conditional edge has exactly one unconditional edge
//!
//! Rule 5 means every declared node has a successor, reachable or not, so a
//! run can never stall on a node with nowhere to go. Nodes that cannot be
//! reached from `START` are allowed but logged.

use crate::node::{Node, NodeRegistry};
use crate::state::ConversationState;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use tracing::warn;

/// Node identifier - unique name for each node in the graph
pub type NodeId = String;

/// Pseudo-node marking where execution begins
pub const START: &str = "__start__";

/// Pseudo-node marking termination
pub const END: &str = "__end__";

/// Routing function attached to a conditional edge
///
/// Maps the current state to the name of the next node, or [`END`]. Routers must
/// be pure functions of the state so a run can be replayed.
pub type RouterFn = Arc<dyn Fn(&ConversationState) -> NodeId + Send + Sync>;

/// Edge type defining transitions between nodes
#[derive(Clone)]
pub enum Edge {
    /// Unconditional edge to a specific node
    Direct(NodeId),

    /// Edge whose destination is chosen at run time by `router`
    Conditional {
        /// Router evaluated after the source node completes
        router: RouterFn,

        /// Every destination the router may return
        ///
        /// Used for validation; returning anything else fails the run with
        /// [`GraphError::Routing`](crate::GraphError::Routing).
        branches: Vec<NodeId>,
    },
}

impl Edge {
    /// Check if this edge is conditional
    pub fn is_conditional(&self) -> bool {
        matches!(self, Edge::Conditional { .. })
    }

    /// Destinations this edge can lead to
    pub fn destinations(&self) -> Vec<&str> {
        match self {
            Edge::Direct(to) => vec![to.as_str()],
            Edge::Conditional { branches, .. } => branches.iter().map(String::as_str).collect(),
        }
    }
}

impl std::fmt::Debug for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Edge::Direct(node_id) => f.debug_tuple("Direct").field(node_id).finish(),
            Edge::Conditional { branches, .. } => f
                .debug_struct("Conditional")
                .field("router", &"<function>")
                .field("branches", branches)
                .finish(),
        }
    }
}

/// Core graph structure containing nodes and edges
#[derive(Debug, Clone, Default)]
pub struct Graph {
    /// All nodes in the graph mapped by their unique IDs
    pub nodes: NodeRegistry,

    /// Node names in declaration order, including duplicates
    pub declared: Vec<NodeId>,

    /// Outgoing edges per source node, in declaration order
    pub edges: HashMap<NodeId, Vec<Edge>>,
}

impl Graph {
    /// Create a new empty graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the graph
    pub fn add_node(&mut self, id: NodeId, node: Arc<dyn Node>) {
        self.declared.push(id.clone());
        self.nodes.register(id, node);
    }

    /// Add an unconditional edge
    pub fn add_edge(&mut self, from: NodeId, to: NodeId) {
        self.edges.entry(from).or_default().push(Edge::Direct(to));
    }

    /// Add a conditional edge
    pub fn add_conditional_edge(&mut self, from: NodeId, router: RouterFn, branches: Vec<NodeId>) {
        self.edges
            .entry(from)
            .or_default()
            .push(Edge::Conditional { router, branches });
    }

    /// Outgoing edges of `node`
    pub fn edges_from(&self, node: &str) -> &[Edge] {
        self.edges.get(node).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Validate the graph structure
    ///
    /// See the [module documentation](self) for the rules enforced.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = HashSet::new();
        for id in &self.declared {
            if id == START || id == END {
                return Err(format!("Node name {} is reserved", id));
            }
            if !seen.insert(id.as_str()) {
                return Err(format!("Node {} is declared more than once", id));
            }
        }

        // Sorted so the reported violation does not depend on hash order
        let mut sources: Vec<&NodeId> = self.edges.keys().collect();
        sources.sort();

        for from in &sources {
            if from.as_str() == END {
                return Err(format!("{} cannot have outgoing edges", END));
            }
            if from.as_str() != START && !self.nodes.contains(from) {
                return Err(format!("Edge source {} does not exist", from));
            }

            for edge in self.edges_from(from) {
                if let Edge::Conditional { branches, .. } = edge {
                    if branches.is_empty() {
                        return Err(format!("Conditional edge from {} declares no branches", from));
                    }
                }
                for to in edge.destinations() {
                    if to == START {
                        return Err(format!("Edge from {} cannot target {}", from, START));
                    }
                    if to != END && !self.nodes.contains(to) {
                        return Err(format!("Edge target {} does not exist", to));
                    }
                }
            }
        }

        match self.edges_from(START) {
            [] => return Err(format!("{} has no outgoing edge", START)),
            [Edge::Direct(_)] => {}
            [Edge::Conditional { .. }] => {
                return Err(format!("{} must have an unconditional edge", START))
            }
            _ => return Err(format!("{} has more than one outgoing edge", START)),
        }

        for id in &self.declared {
            let edges = self.edges_from(id);
            let conditional = edges.iter().filter(|e| e.is_conditional()).count();
            let direct = edges.len() - conditional;

            match (conditional, direct) {
                (0, 0) => return Err(format!("Node {} has no outgoing edge", id)),
                (0, 1) | (1, 0) => {}
                (0, _) => {
                    return Err(format!("Node {} has more than one unconditional edge", id))
                }
                (1, _) => {
                    return Err(format!(
                        "Node {} mixes a conditional edge with unconditional edges",
                        id
                    ))
                }
                _ => return Err(format!("Node {} has more than one conditional edge", id)),
            }
        }

        let reachable = self.reachable_from_start();
        for id in &self.declared {
            if !reachable.contains(id.as_str()) {
                warn!(node = %id, "Node is not reachable from {}", START);
            }
        }

        Ok(())
    }

    /// Names of nodes reachable from [`START`] following any edge
    pub fn reachable_from_start(&self) -> HashSet<&str> {
        let mut reachable = HashSet::new();
        let mut queue = VecDeque::from([START]);

        while let Some(current) = queue.pop_front() {
            for edge in self.edges_from(current) {
                for to in edge.destinations() {
                    if to != END && reachable.insert(to) {
                        queue.push_back(to);
                    }
                }
            }
        }

        reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::FnNode;
    use crate::state::StateUpdate;

    fn noop() -> Arc<dyn Node> {
        Arc::new(FnNode::new(|_| Box::pin(async { Ok(StateUpdate::empty()) })))
    }

    fn router(to: &'static str) -> RouterFn {
        Arc::new(move |_: &ConversationState| to.to_string())
    }

    fn linear() -> Graph {
        let mut graph = Graph::new();
        graph.add_node("a".into(), noop());
        graph.add_edge(START.into(), "a".into());
        graph.add_edge("a".into(), END.into());
        graph
    }

    #[test]
    fn test_linear_graph_is_valid() {
        assert!(linear().validate().is_ok());
    }

    #[test]
    fn test_missing_start_edge() {
        let mut graph = Graph::new();
        graph.add_node("a".into(), noop());
        graph.add_edge("a".into(), END.into());

        let err = graph.validate().unwrap_err();
        assert!(err.contains("no outgoing edge"), "{}", err);
    }

    #[test]
    fn test_edge_to_undeclared_node() {
        let mut graph = linear();
        graph.edges.clear();
        graph.add_edge(START.into(), "a".into());
        graph.add_edge("a".into(), "ghost".into());

        let err = graph.validate().unwrap_err();
        assert_eq!(err, "Edge target ghost does not exist");
    }

    #[test]
    fn test_node_without_successor() {
        let mut graph = linear();
        graph.add_node("orphan".into(), noop());

        let err = graph.validate().unwrap_err();
        assert_eq!(err, "Node orphan has no outgoing edge");
    }

    #[test]
    fn test_two_conditional_edges_rejected() {
        let mut graph = linear();
        graph.edges.remove("a");
        graph.add_conditional_edge("a".into(), router(END), vec![END.into()]);
        graph.add_conditional_edge("a".into(), router(END), vec![END.into()]);

        let err = graph.validate().unwrap_err();
        assert!(err.contains("more than one conditional"), "{}", err);
    }

    #[test]
    fn test_conditional_start_rejected() {
        let mut graph = Graph::new();
        graph.add_node("a".into(), noop());
        graph.add_conditional_edge(START.into(), router("a"), vec!["a".into()]);
        graph.add_edge("a".into(), END.into());

        assert!(graph.validate().is_err());
    }

    #[test]
    fn test_duplicate_and_reserved_names() {
        let mut graph = linear();
        graph.add_node("a".into(), noop());
        assert_eq!(graph.validate().unwrap_err(), "Node a is declared more than once");

        let mut graph = linear();
        graph.add_node(END.into(), noop());
        assert!(graph.validate().unwrap_err().contains("reserved"));
    }

    #[test]
    fn test_reachability() {
        let mut graph = linear();
        graph.add_node("island".into(), noop());
        graph.add_edge("island".into(), END.into());

        assert!(graph.validate().is_ok());
        let reachable = graph.reachable_from_start();
        assert!(reachable.contains("a"));
        assert!(!reachable.contains("island"));
    }
}
