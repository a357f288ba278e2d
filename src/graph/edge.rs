use super::node::NodeId;

use serde::Serialize;
use std::collections::HashSet;

/// An undirected edge between two nodes
/// Invariant: always stored in canonical form with from <= to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
}

impl Edge {
    /// Create a new edge, automatically ordering nodes
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Edge { from: a, to: b }
        } else {
            Edge { from: b, to: a }
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// A set of edges with efficient lookup
/// Keeps insertion order alongside the set so iteration never depends on hashing
#[derive(Debug, Clone, Default)]
pub struct EdgeSet {
    /// Set for O(1) edge existence checks
    edges: HashSet<Edge>,
    /// Edges in the order they were inserted
    order: Vec<Edge>,
}

impl EdgeSet {
    pub fn new() -> Self {
        EdgeSet::default()
    }

    /// Add an edge to the set
    /// Returns true if the edge was newly inserted, false if it already existed
    pub fn add(&mut self, edge: Edge) -> bool {
        if self.edges.insert(edge) {
            self.order.push(edge);
            true
        } else {
            false
        }
    }

    /// Remove an edge, returning whether it was present
    pub fn remove(&mut self, edge: &Edge) -> bool {
        if self.edges.remove(edge) {
            self.order.retain(|e| e != edge);
            true
        } else {
            false
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Get edges in insertion order
    pub fn edges_in_order(&self) -> &[Edge] {
        &self.order
    }

    /// Edges sorted by (from, to), independent of insertion history
    pub fn sorted(&self) -> Vec<Edge> {
        let mut edges = self.order.clone();
        edges.sort_unstable();
        edges
    }
}

/// Two edge sets are equal when they hold the same edges, in any order
impl PartialEq for EdgeSet {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges
    }
}
