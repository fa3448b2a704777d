//! Fluent API for building WeightedGraph instances.

use crate::types::{GraphResult, NodeKey};

use super::WeightedGraph;

/// Fluent builder for constructing a WeightedGraph.
///
/// Nodes are inserted first, then edges, so an edge may name a node that is
/// declared later in the chain.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<NodeKey>,
    edges: Vec<(NodeKey, NodeKey, f64)>,
}

impl GraphBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node.
    pub fn node(&mut self, key: NodeKey) -> &mut Self {
        self.nodes.push(key);
        self
    }

    /// Add several nodes.
    pub fn nodes(&mut self, keys: impl IntoIterator<Item = NodeKey>) -> &mut Self {
        self.nodes.extend(keys);
        self
    }

    /// Add an undirected edge.
    pub fn edge(&mut self, a: NodeKey, b: NodeKey, weight: f64) -> &mut Self {
        self.edges.push((a, b, weight));
        self
    }

    /// Build the final WeightedGraph.
    pub fn build(&self) -> GraphResult<WeightedGraph> {
        let mut graph = WeightedGraph::new();
        for &key in &self.nodes {
            graph.add_node(key);
        }
        for &(a, b, weight) in &self.edges {
            graph.connect(a, b, weight)?;
        }
        Ok(graph)
    }
}
