//! Breadth-first traversal and the connectivity check.

use std::collections::{HashSet, VecDeque};

use crate::graph::WeightedGraph;
use crate::types::{GraphError, GraphResult, NodeKey};

/// BFS from `start`, returning keys in visit order.
///
/// Neighbors are enqueued in ascending key order so the order is stable.
pub fn bfs_order(graph: &WeightedGraph, start: NodeKey) -> GraphResult<Vec<NodeKey>> {
    if !graph.contains_node(start) {
        return Err(GraphError::KeyNotFound(start));
    }

    let mut visited: HashSet<NodeKey> = HashSet::with_capacity(graph.node_count());
    let mut order: Vec<NodeKey> = Vec::new();
    let mut queue: VecDeque<NodeKey> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        order.push(current);
        let Some(node) = graph.get_node(current) else {
            continue;
        };
        for (next, _) in node.sorted_neighbors() {
            if visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    Ok(order)
}

/// Whether every node is reachable from every other.
///
/// An empty graph counts as connected. The traversal starts at the lowest key.
pub fn is_connected(graph: &WeightedGraph) -> bool {
    match graph.lowest_key() {
        Some(start) => reachable_count(graph, start) == graph.node_count(),
        None => true,
    }
}

fn reachable_count(graph: &WeightedGraph, start: NodeKey) -> usize {
    let mut visited: HashSet<NodeKey> = HashSet::with_capacity(graph.node_count());
    let mut queue: VecDeque<NodeKey> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if let Some(neighbors) = graph.neighbors(current) {
            for next in neighbors {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }
    }
    visited.len()
}
