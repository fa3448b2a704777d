//! In-memory graph store: the core data structure.

pub mod builder;
pub mod node;
pub mod weighted_graph;

pub use builder::GraphBuilder;
pub use node::Node;
pub use weighted_graph::WeightedGraph;
