//! Algorithm set bound to one graph instance, with load/save.

use std::path::Path;

use log::warn;

use crate::format::text;
#[cfg(feature = "format")]
use crate::format::{SnapshotReader, SnapshotWriter};
use crate::graph::WeightedGraph;
use crate::types::{GraphResult, NodeKey};

use super::PathEngine;

/// Holds a graph and runs algorithms and persistence against it.
///
/// Loading replaces the held graph only on success; a failed load leaves
/// it as it was.
#[derive(Debug, Clone, Default)]
pub struct GraphAlgo {
    graph: WeightedGraph,
}

impl GraphAlgo {
    /// Start with an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the graph this set operates on.
    pub fn init(&mut self, graph: WeightedGraph) {
        self.graph = graph;
    }

    /// The graph this set operates on.
    pub fn graph(&self) -> &WeightedGraph {
        &self.graph
    }

    /// Mutable access to the held graph.
    pub fn graph_mut(&mut self) -> &mut WeightedGraph {
        &mut self.graph
    }

    /// Give up the held graph.
    pub fn into_graph(self) -> WeightedGraph {
        self.graph
    }

    /// Deep copy of the held graph.
    pub fn copy(&self) -> WeightedGraph {
        self.graph.clone()
    }

    /// A path engine borrowing the held graph.
    pub fn engine(&self) -> PathEngine<'_> {
        PathEngine::new(&self.graph)
    }

    /// See [`PathEngine::is_connected`].
    pub fn is_connected(&self) -> bool {
        self.engine().is_connected()
    }

    /// See [`PathEngine::shortest_path_distance`].
    pub fn shortest_path_distance(&self, src: NodeKey, dest: NodeKey) -> GraphResult<f64> {
        self.engine().shortest_path_distance(src, dest)
    }

    /// See [`PathEngine::shortest_path`].
    pub fn shortest_path(&self, src: NodeKey, dest: NodeKey) -> GraphResult<Option<Vec<NodeKey>>> {
        self.engine().shortest_path(src, dest)
    }

    /// Save the held graph as a text export.
    pub fn save(&self, path: &Path) -> GraphResult<()> {
        text::write_to_file(&self.graph, path)
    }

    /// Replace the held graph with a text export read from `path`.
    pub fn load(&mut self, path: &Path) -> GraphResult<()> {
        let loaded = text::read_from_file(path);
        self.replace_with(loaded, path)
    }

    /// Save the held graph as a binary snapshot.
    #[cfg(feature = "format")]
    pub fn save_binary(&self, path: &Path, compress: bool) -> GraphResult<()> {
        SnapshotWriter::new()
            .with_compression(compress)
            .write_to_file(&self.graph, path)
    }

    /// Replace the held graph with a binary snapshot read from `path`.
    #[cfg(feature = "format")]
    pub fn load_binary(&mut self, path: &Path) -> GraphResult<()> {
        let loaded = SnapshotReader::read_from_file(path);
        self.replace_with(loaded, path)
    }

    fn replace_with(&mut self, loaded: GraphResult<WeightedGraph>, path: &Path) -> GraphResult<()> {
        match loaded {
            Ok(graph) => {
                self.graph = graph;
                Ok(())
            }
            Err(e) => {
                warn!("failed to load {}: {}; graph left unchanged", path.display(), e);
                Err(e)
            }
        }
    }
}

impl From<WeightedGraph> for GraphAlgo {
    fn from(graph: WeightedGraph) -> Self {
        Self { graph }
    }
}
