use super::edge::{Edge, EdgeSet};
use super::node::NodeId;
use super::params::{ConfigurationError, SmallWorldParams};
use super::snapshot::GraphSnapshot;

use log::debug;
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use std::collections::{BTreeSet, VecDeque};

/// Undirected simple graph over nodes `0..node_count`
/// Adjacency is kept sorted so every traversal visits neighbours in id order
#[derive(Debug, Clone, PartialEq)]
pub struct SmallWorldGraph {
    adjacency: Vec<BTreeSet<NodeId>>,
    edges: EdgeSet,
}

impl SmallWorldGraph {
    /// Graph with nodes and no edges
    pub fn empty(node_count: usize) -> Self {
        SmallWorldGraph {
            adjacency: vec![BTreeSet::new(); node_count],
            edges: EdgeSet::new(),
        }
    }

    /// Ring where every node links to its `neighbors / 2` nearest nodes on each side
    pub fn ring_lattice(node_count: usize, neighbors: usize) -> Self {
        let mut graph = Self::empty(node_count);

        for offset in 1..=neighbors / 2 {
            for i in 0..node_count {
                let u = NodeId(i);
                graph.add_edge(u, u.ring_offset(offset, node_count));
            }
        }

        graph
    }

    /// Watts-Strogatz construction: a ring lattice whose edges are each
    /// rewired with `rewire_probability`, driven by a seeded ChaCha8 stream.
    ///
    /// Edges are visited offset by offset, and within an offset by their
    /// near endpoint `u`. A rewired edge keeps `u` and moves its far endpoint
    /// to a uniformly chosen node that is neither `u` nor already adjacent to
    /// `u`. When `u` is already linked to everything the edge stays put.
    pub fn watts_strogatz(params: &SmallWorldParams) -> Result<Self, ConfigurationError> {
        params.validate()?;

        let n = params.node_count;
        let mut graph = Self::ring_lattice(n, params.neighbors);
        let mut rng = ChaCha8Rng::seed_from_u64(params.seed);
        let mut rewired = 0;

        for offset in 1..=params.neighbors / 2 {
            for i in 0..n {
                let u = NodeId(i);
                let v = u.ring_offset(offset, n);

                if !rng.random_bool(params.rewire_probability) {
                    continue;
                }

                let candidates: Vec<NodeId> = graph
                    .nodes()
                    .filter(|&w| w != u && !graph.are_adjacent(u, w))
                    .collect();

                let Some(&w) = candidates.choose(&mut rng) else {
                    debug!("Node {} is saturated, keeping edge {}-{}", u, u, v);
                    continue;
                };

                graph.remove_edge(u, v);
                graph.add_edge(u, w);
                rewired += 1;
                debug!("Rewired {}-{} to {}-{}", u, v, u, w);
            }
        }

        debug!(
            "Built small-world graph: {} nodes, {} edges, {} rewired",
            n,
            graph.edge_count(),
            rewired
        );

        Ok(graph)
    }

    /// Insert an undirected edge; self-loops and duplicates are ignored
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        let edge = Edge::new(a, b);
        if edge.is_self_loop() || !self.edges.add(edge) {
            return false;
        }

        self.adjacency[a.index()].insert(b);
        self.adjacency[b.index()].insert(a);
        true
    }

    pub fn remove_edge(&mut self, a: NodeId, b: NodeId) -> bool {
        if !self.edges.remove(&Edge::new(a, b)) {
            return false;
        }

        self.adjacency[a.index()].remove(&b);
        self.adjacency[b.index()].remove(&a);
        true
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + use<> {
        (0..self.node_count()).map(NodeId)
    }

    pub fn edges(&self) -> &EdgeSet {
        &self.edges
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        node.index() < self.node_count()
    }

    /// Check if two nodes are adjacent
    pub fn are_adjacent(&self, a: NodeId, b: NodeId) -> bool {
        self.contains_node(a) && self.contains_node(b) && self.adjacency[a.index()].contains(&b)
    }

    /// Neighbours of a node in ascending id order
    pub fn neighbors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency[node.index()].iter().copied()
    }

    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node.index()].len()
    }

    /// Hop distance from `source` to every node; `None` where unreachable
    pub fn distances_from(&self, source: NodeId) -> Vec<Option<usize>> {
        let mut distances = vec![None; self.node_count()];
        let mut queue = VecDeque::new();

        distances[source.index()] = Some(0);
        queue.push_back(source);

        while let Some(current) = queue.pop_front() {
            let next = distances[current.index()].map_or(0, |d| d + 1);
            for neighbor in self.neighbors(current) {
                if distances[neighbor.index()].is_none() {
                    distances[neighbor.index()] = Some(next);
                    queue.push_back(neighbor);
                }
            }
        }

        distances
    }

    pub fn is_connected(&self) -> bool {
        match self.nodes().next() {
            Some(first) => self.distances_from(first).iter().all(Option::is_some),
            None => true,
        }
    }

    /// Node and edge lists for renderers
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot::new(self.nodes().collect(), self.edges.sorted())
    }
}
