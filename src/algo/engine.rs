//! Path engine: query surface over a borrowed graph.

use crate::graph::WeightedGraph;
use crate::types::{GraphResult, NodeKey, NO_PATH};

use super::connectivity::is_connected;
use super::path::{dijkstra, ShortestPath};

/// Connectivity and shortest-path queries against a borrowed graph.
///
/// The engine holds a shared borrow for its lifetime, so the graph cannot be
/// mutated while a query runs. Queries allocate their own scratch state and
/// leave the graph untouched.
#[derive(Debug, Clone, Copy)]
pub struct PathEngine<'g> {
    graph: &'g WeightedGraph,
}

impl<'g> PathEngine<'g> {
    /// Create an engine over `graph`.
    pub fn new(graph: &'g WeightedGraph) -> Self {
        Self { graph }
    }

    /// The graph this engine reads.
    pub fn graph(&self) -> &'g WeightedGraph {
        self.graph
    }

    /// Whether there is a path between every pair of nodes.
    /// An empty graph is connected.
    pub fn is_connected(&self) -> bool {
        is_connected(self.graph)
    }

    /// Length of the shortest path, or [`NO_PATH`] if `dest` is unreachable.
    pub fn shortest_path_distance(&self, src: NodeKey, dest: NodeKey) -> GraphResult<f64> {
        Ok(self.distance(src, dest)?.unwrap_or(NO_PATH))
    }

    /// Length of the shortest path, or `None` if `dest` is unreachable.
    pub fn distance(&self, src: NodeKey, dest: NodeKey) -> GraphResult<Option<f64>> {
        Ok(self.dijkstra(src, dest)?.map(|p| p.distance))
    }

    /// Keys along a shortest path from `src` to `dest` inclusive, or `None`
    /// if `dest` is unreachable.
    pub fn shortest_path(&self, src: NodeKey, dest: NodeKey) -> GraphResult<Option<Vec<NodeKey>>> {
        Ok(self.dijkstra(src, dest)?.map(|p| p.path))
    }

    /// Distance and path from a single search.
    pub fn dijkstra(&self, src: NodeKey, dest: NodeKey) -> GraphResult<Option<ShortestPath>> {
        dijkstra(self.graph, src, dest)
    }
}
