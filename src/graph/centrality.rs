//! Closeness centrality: how quickly a node reaches everyone else.
//!
//! ```text
//! C(x) = 1 / Σ_{y reachable, y ≠ x} d(x, y)
//! ```
//!
//! On a disconnected graph the sum only runs over the node's own component.
//! A node with no neighbours scores `0.0`.

use super::node::NodeId;
use super::small_world::SmallWorldGraph;

/// Closeness score for every node, indexed by `NodeId`
#[derive(Debug, Clone, PartialEq)]
pub struct CentralityScores(Vec<f64>);

impl CentralityScores {
    /// Compute closeness for all nodes with one BFS per node
    pub fn closeness(graph: &SmallWorldGraph) -> Self {
        let scores = graph
            .nodes()
            .map(|node| {
                let total: usize = graph.distances_from(node).into_iter().flatten().sum();
                if total == 0 { 0.0 } else { 1.0 / total as f64 }
            })
            .collect();

        CentralityScores(scores)
    }

    pub fn get(&self, node: NodeId) -> f64 {
        self.0[node.index()]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest score, if there are any nodes
    pub fn max(&self) -> Option<f64> {
        self.0.iter().copied().reduce(f64::max)
    }

    /// Node with the highest score; ties go to the lowest node id
    pub fn argmax(&self) -> Option<NodeId> {
        let mut best: Option<(NodeId, f64)> = None;

        for (i, &score) in self.0.iter().enumerate() {
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((NodeId(i), score)),
            }
        }

        best.map(|(node, _)| node)
    }

    /// Every node sharing the maximum score, in ascending id order
    pub fn tied_with_max(&self) -> Vec<NodeId> {
        let Some(max) = self.max() else {
            return Vec::new();
        };

        self.iter()
            .filter(|&(_, score)| score == max)
            .map(|(node, _)| node)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, f64)> + '_ {
        self.0.iter().enumerate().map(|(i, &s)| (NodeId(i), s))
    }
}
