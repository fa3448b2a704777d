//! Dijkstra shortest paths over non-negative weights.
//!
//! All per-node search state (visited mark, tentative distance, predecessor)
//! lives in a scratch map owned by a single call. The graph is only read, so
//! a query can never leave traces on it.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use log::debug;
use serde::Serialize;

use crate::graph::WeightedGraph;
use crate::types::{GraphError, GraphResult, NodeKey};

/// Length and node sequence of a shortest path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShortestPath {
    /// Sum of edge weights along `path`.
    pub distance: f64,
    /// Keys from source to destination, both inclusive.
    pub path: Vec<NodeKey>,
}

/// Transient search state for one node. `distance` is `None` until the node
/// is first reached; a reached node may still sit at `+inf` once a path sum
/// overflows.
#[derive(Debug, Clone, Copy, Default)]
struct SearchState {
    visited: bool,
    distance: Option<f64>,
    predecessor: Option<NodeKey>,
}

/// Priority queue entry. `BinaryHeap` is a max-heap, so the ordering is
/// reversed: smaller distance first, then smaller key.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    distance: f64,
    key: NodeKey,
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .distance
            .total_cmp(&self.distance)
            .then_with(|| other.key.cmp(&self.key))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

/// Shortest path from `src` to `dest`.
///
/// Returns `Ok(None)` when `dest` is unreachable. Fails with
/// [`GraphError::KeyNotFound`] if either key is absent. The search stops as
/// soon as `dest` is settled. Among equal-length paths, the one found by
/// settling lower keys first wins.
pub fn dijkstra(
    graph: &WeightedGraph,
    src: NodeKey,
    dest: NodeKey,
) -> GraphResult<Option<ShortestPath>> {
    for key in [src, dest] {
        if !graph.contains_node(key) {
            return Err(GraphError::KeyNotFound(key));
        }
    }
    if src == dest {
        return Ok(Some(ShortestPath {
            distance: 0.0,
            path: vec![src],
        }));
    }

    let mut states: HashMap<NodeKey, SearchState> = HashMap::new();
    let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();

    states.entry(src).or_default().distance = Some(0.0);
    queue.push(QueueEntry {
        distance: 0.0,
        key: src,
    });

    while let Some(QueueEntry { distance, key }) = queue.pop() {
        let state = states.entry(key).or_default();
        if state.visited {
            continue;
        }
        state.visited = true;

        if key == dest {
            let path = trace_back(&states, src, dest);
            debug!(
                "shortest path {} -> {}: distance {}, {} hops, {} nodes settled",
                src,
                dest,
                distance,
                path.len() - 1,
                states.values().filter(|s| s.visited).count()
            );
            return Ok(Some(ShortestPath { distance, path }));
        }

        let Some(node) = graph.get_node(key) else {
            continue;
        };
        for (next, weight) in node.weighted_neighbors() {
            let candidate = distance + weight;
            let next_state = states.entry(next).or_default();
            if next_state.visited {
                continue;
            }
            if matches!(next_state.distance, Some(best) if candidate >= best) {
                continue;
            }
            next_state.distance = Some(candidate);
            next_state.predecessor = Some(key);
            queue.push(QueueEntry {
                distance: candidate,
                key: next,
            });
        }
    }

    debug!("no path {} -> {}", src, dest);
    Ok(None)
}

/// Follow predecessor keys from `dest` back to `src`, then reverse.
fn trace_back(states: &HashMap<NodeKey, SearchState>, src: NodeKey, dest: NodeKey) -> Vec<NodeKey> {
    let mut path = vec![dest];
    let mut current = dest;
    while current != src {
        match states.get(&current).and_then(|s| s.predecessor) {
            Some(prev) if path.len() <= states.len() => {
                path.push(prev);
                current = prev;
            }
            // Predecessor links only ever point at settled nodes, so the
            // chain reaches `src` before running out.
            _ => break,
        }
    }
    path.reverse();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_pops_smallest_distance_then_lowest_key() {
        let mut heap = BinaryHeap::new();
        for (distance, key) in [(2.0, 1), (1.0, 9), (1.0, 3), (0.5, 7)] {
            heap.push(QueueEntry { distance, key });
        }
        let order: Vec<NodeKey> = std::iter::from_fn(|| heap.pop().map(|e| e.key)).collect();
        assert_eq!(order, vec![7, 3, 9, 1]);
    }

    #[test]
    fn trace_back_reverses_predecessor_chain() {
        let mut states = HashMap::new();
        for (key, predecessor) in [(1, None), (2, Some(1)), (3, Some(2))] {
            states.insert(
                key,
                SearchState {
                    visited: true,
                    distance: Some(0.0),
                    predecessor,
                },
            );
        }
        assert_eq!(trace_back(&states, 1, 3), vec![1, 2, 3]);
    }
}
