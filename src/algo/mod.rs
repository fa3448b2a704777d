//! Graph algorithms: connectivity and shortest paths.

pub mod connectivity;
pub mod engine;
pub mod graph_algo;
pub mod path;

pub use connectivity::{bfs_order, is_connected};
pub use engine::PathEngine;
pub use graph_algo::GraphAlgo;
pub use path::{dijkstra, ShortestPath};
