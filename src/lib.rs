//! wgraph: in-memory undirected weighted graph.
//!
//! A vertex/edge store with O(1) lookups, a breadth-first connectivity check,
//! and Dijkstra shortest paths, plus text and binary persistence.

pub mod algo;
#[cfg(feature = "cli")]
pub mod cli;
pub mod format;
pub mod graph;
pub mod types;

// Re-export commonly used types at the crate root
pub use algo::{GraphAlgo, PathEngine, ShortestPath};
#[cfg(feature = "format")]
pub use format::{SnapshotReader, SnapshotWriter};
pub use format::{parse_graph, to_text};
pub use graph::{GraphBuilder, Node, WeightedGraph};
pub use types::{
    FileHeader, GraphError, GraphResult, NodeKey, FORMAT_VERSION, NO_EDGE, NO_PATH, WGRAPH_MAGIC,
};
