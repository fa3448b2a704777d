//! A single vertex and its weighted adjacency.

use std::collections::HashMap;

use crate::types::NodeKey;

/// A vertex of a [`WeightedGraph`](super::WeightedGraph).
///
/// The adjacency map is one half of every undirected edge; the graph keeps
/// the mirror entry on the neighbor in sync. Nodes carry no traversal state.
#[derive(Debug, Clone)]
pub struct Node {
    key: NodeKey,
    /// Insertion stamp, used to iterate the graph in insertion order.
    seq: u64,
    neighbors: HashMap<NodeKey, f64>,
}

impl Node {
    pub(crate) fn new(key: NodeKey, seq: u64) -> Self {
        Self {
            key,
            seq,
            neighbors: HashMap::new(),
        }
    }

    /// The node's key.
    pub fn key(&self) -> NodeKey {
        self.key
    }

    /// Number of incident edges.
    pub fn degree(&self) -> usize {
        self.neighbors.len()
    }

    /// Keys of adjacent nodes, in no particular order.
    pub fn neighbors(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.neighbors.keys().copied()
    }

    /// `(neighbor, weight)` pairs, in no particular order.
    pub fn weighted_neighbors(&self) -> impl Iterator<Item = (NodeKey, f64)> + '_ {
        self.neighbors.iter().map(|(&k, &w)| (k, w))
    }

    /// `(neighbor, weight)` pairs sorted by neighbor key.
    pub fn sorted_neighbors(&self) -> Vec<(NodeKey, f64)> {
        let mut out: Vec<(NodeKey, f64)> = self.weighted_neighbors().collect();
        out.sort_unstable_by_key(|&(k, _)| k);
        out
    }

    /// Whether `other` is adjacent to this node.
    pub fn has_neighbor(&self, other: NodeKey) -> bool {
        self.neighbors.contains_key(&other)
    }

    /// Weight of the edge to `other`, if any.
    pub fn weight_to(&self, other: NodeKey) -> Option<f64> {
        self.neighbors.get(&other).copied()
    }

    pub(crate) fn seq(&self) -> u64 {
        self.seq
    }

    pub(crate) fn set_neighbor(&mut self, other: NodeKey, weight: f64) {
        if other != self.key {
            self.neighbors.insert(other, weight);
        }
    }

    pub(crate) fn remove_neighbor(&mut self, other: NodeKey) -> Option<f64> {
        self.neighbors.remove(&other)
    }
}

/// Key and adjacency; the insertion stamp is bookkeeping and is ignored.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key && self.neighbors == other.neighbors
    }
}
