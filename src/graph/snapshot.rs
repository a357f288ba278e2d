use super::edge::Edge;
use super::node::NodeId;

use serde::Serialize;

/// Read-only node and edge lists handed to renderers
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeId>,
    /// Sorted by (from, to)
    pub edges: Vec<Edge>,
}

impl GraphSnapshot {
    pub fn new(nodes: Vec<NodeId>, edges: Vec<Edge>) -> Self {
        GraphSnapshot { nodes, edges }
    }

    /// Format: {"nodes":[0,1,...],"edges":[{"from":0,"to":1},...]}
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
