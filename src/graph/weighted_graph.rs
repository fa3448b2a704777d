//! Core graph structure: nodes keyed by integer with symmetric weighted edges.

use std::collections::HashMap;
use std::fmt;

use log::{debug, trace};

use crate::types::{validate_weight, GraphError, GraphResult, NodeKey, NO_EDGE};

use super::Node;

/// An undirected weighted graph.
///
/// Node and edge lookups are O(1). Every edge is stored twice, once on each
/// endpoint, with the same weight. `Clone` is a deep copy: the clone shares
/// no storage with the source.
#[derive(Debug, Clone, Default)]
pub struct WeightedGraph {
    /// All nodes, indexed by key.
    nodes: HashMap<NodeKey, Node>,
    /// Number of undirected edges (each counted once).
    edge_count: usize,
    /// Bumped by every structural or weight change.
    modification_count: u64,
    /// Next insertion stamp.
    next_seq: u64,
}

impl WeightedGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of undirected edges.
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Number of structural or weight changes made so far.
    pub fn modification_count(&self) -> u64 {
        self.modification_count
    }

    /// Whether the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `key` is in the graph.
    pub fn contains_node(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Get a node by key.
    pub fn get_node(&self, key: NodeKey) -> Option<&Node> {
        self.nodes.get(&key)
    }

    /// The smallest key in the graph, if any. O(n).
    pub fn lowest_key(&self) -> Option<NodeKey> {
        self.nodes.keys().min().copied()
    }

    /// All nodes, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        let mut ordered: Vec<&Node> = self.nodes.values().collect();
        ordered.sort_unstable_by_key(|n| n.seq());
        ordered.into_iter()
    }

    /// All node keys, in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.nodes().map(Node::key)
    }

    /// Keys adjacent to `key`, or `None` if `key` is absent.
    pub fn neighbors(&self, key: NodeKey) -> Option<impl Iterator<Item = NodeKey> + '_> {
        self.nodes.get(&key).map(Node::neighbors)
    }

    /// `(neighbor, weight)` pairs around `key`, or `None` if `key` is absent.
    pub fn neighbor_weights(
        &self,
        key: NodeKey,
    ) -> Option<impl Iterator<Item = (NodeKey, f64)> + '_> {
        self.nodes.get(&key).map(Node::weighted_neighbors)
    }

    /// Whether `a` and `b` both exist and are adjacent.
    pub fn has_edge(&self, a: NodeKey, b: NodeKey) -> bool {
        self.nodes.get(&a).is_some_and(|node| node.has_neighbor(b))
    }

    /// Weight of the edge between `a` and `b`, if both exist and are adjacent.
    pub fn edge_weight(&self, a: NodeKey, b: NodeKey) -> Option<f64> {
        if !self.nodes.contains_key(&b) {
            return None;
        }
        self.nodes.get(&a)?.weight_to(b)
    }

    /// Weight of the edge between `a` and `b`, or [`NO_EDGE`] if they are
    /// not adjacent.
    ///
    /// Fails with [`GraphError::KeyNotFound`] if either key is absent.
    pub fn get_edge(&self, a: NodeKey, b: NodeKey) -> GraphResult<f64> {
        let node = self.require(a)?;
        self.require(b)?;
        Ok(node.weight_to(b).unwrap_or(NO_EDGE))
    }

    /// Add a node with no neighbors. No-op if `key` is already present.
    pub fn add_node(&mut self, key: NodeKey) {
        if self.nodes.contains_key(&key) {
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.nodes.insert(key, Node::new(key, seq));
        self.modification_count += 1;
        trace!("added node {}", key);
    }

    /// Remove a node and every edge touching it.
    ///
    /// Returns the removed node, or `None` if `key` was absent.
    pub fn remove_node(&mut self, key: NodeKey) -> Option<Node> {
        let removed = self.nodes.remove(&key)?;

        for other in removed.neighbors() {
            if let Some(node) = self.nodes.get_mut(&other) {
                node.remove_neighbor(key);
            }
            self.edge_count -= 1;
            self.modification_count += 1;
        }
        self.modification_count += 1;

        debug!("removed node {} with {} edges", key, removed.degree());
        Some(removed)
    }

    /// Connect `a` and `b` with an edge of the given weight, or change the
    /// weight of the existing edge.
    ///
    /// Connecting a node to itself is a no-op, as is re-connecting with the
    /// current weight. Nothing changes when an error is returned.
    pub fn connect(&mut self, a: NodeKey, b: NodeKey, weight: f64) -> GraphResult<()> {
        validate_weight(weight)?;
        let existing = self.require(a)?.weight_to(b);
        self.require(b)?;
        if a == b {
            return Ok(());
        }

        match existing {
            Some(current) if current == weight => return Ok(()),
            Some(current) => trace!("reweighted edge {}-{}: {} -> {}", a, b, current, weight),
            None => {
                self.edge_count += 1;
                trace!("connected {}-{} ({})", a, b, weight);
            }
        }

        self.node_mut(a).set_neighbor(b, weight);
        self.node_mut(b).set_neighbor(a, weight);
        self.modification_count += 1;
        Ok(())
    }

    /// Remove the edge between `a` and `b`.
    ///
    /// Returns the removed weight, or `None` if there was no such edge
    /// (including when either key is absent).
    pub fn remove_edge(&mut self, a: NodeKey, b: NodeKey) -> Option<f64> {
        if a == b || !self.has_edge(a, b) {
            return None;
        }
        let weight = self.node_mut(a).remove_neighbor(b);
        self.node_mut(b).remove_neighbor(a);
        self.edge_count -= 1;
        self.modification_count += 1;
        trace!("removed edge {}-{}", a, b);
        weight
    }

    /// Each undirected edge once, as `(low, high, weight)`, sorted.
    pub fn edges(&self) -> Vec<(NodeKey, NodeKey, f64)> {
        let mut out: Vec<(NodeKey, NodeKey, f64)> = self
            .nodes
            .values()
            .flat_map(|n| {
                n.weighted_neighbors()
                    .filter(move |&(other, _)| n.key() < other)
                    .map(move |(other, w)| (n.key(), other, w))
            })
            .collect();
        out.sort_unstable_by_key(|&(a, b, _)| (a, b));
        out
    }

    /// Overwrite the modification counter (snapshot restore).
    pub(crate) fn set_modification_count(&mut self, count: u64) {
        self.modification_count = count;
    }

    fn require(&self, key: NodeKey) -> GraphResult<&Node> {
        self.nodes.get(&key).ok_or(GraphError::KeyNotFound(key))
    }

    /// Only called after `require` has succeeded for `key`.
    fn node_mut(&mut self, key: NodeKey) -> &mut Node {
        self.nodes
            .get_mut(&key)
            .unwrap_or_else(|| unreachable!("node {key} checked before mutation"))
    }
}

/// Structural equality: same nodes, same edges and weights, same counts.
/// Modification counters and insertion order are not compared.
impl PartialEq for WeightedGraph {
    fn eq(&self, other: &Self) -> bool {
        self.edge_count == other.edge_count
            && self.nodes.len() == other.nodes.len()
            && self.nodes == other.nodes
    }
}

/// Renders the text export, see [`crate::format::text`].
impl fmt::Display for WeightedGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::format::text::write_graph(f, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_lists_each_edge_once() {
        let mut g = WeightedGraph::new();
        for k in [3, 1, 2] {
            g.add_node(k);
        }
        g.connect(3, 1, 0.5).unwrap();
        g.connect(2, 3, 1.5).unwrap();
        assert_eq!(g.edges(), vec![(1, 3, 0.5), (2, 3, 1.5)]);
    }

    #[test]
    fn nodes_iterate_in_insertion_order() {
        let mut g = WeightedGraph::new();
        for k in [5, -2, 9, 0] {
            g.add_node(k);
        }
        g.remove_node(9);
        g.add_node(9);
        assert_eq!(g.keys().collect::<Vec<_>>(), vec![5, -2, 0, 9]);
    }
}
