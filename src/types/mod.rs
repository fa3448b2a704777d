//! Shared types for the wgraph library.

pub mod error;
pub mod header;

pub use error::{GraphError, GraphResult};
pub use header::{FileHeader, HEADER_SIZE};

/// Externally visible identity of a vertex.
pub type NodeKey = i32;

/// Returned by [`get_edge`](crate::graph::WeightedGraph::get_edge) when two
/// existing nodes are not adjacent. No valid weight is negative.
pub const NO_EDGE: f64 = -1.0;

/// Returned by [`shortest_path_distance`](crate::algo::PathEngine::shortest_path_distance)
/// when the destination is unreachable.
pub const NO_PATH: f64 = -1.0;

/// Magic bytes at the start of every .wgr file.
pub const WGRAPH_MAGIC: [u8; 4] = [0x57, 0x47, 0x52, 0x46]; // "WGRF"

/// Current binary format version.
pub const FORMAT_VERSION: u32 = 1;

/// Header flag: the body is LZ4-compressed.
pub const FLAG_COMPRESSED: u32 = 0x1;

/// Returns the current time as Unix epoch microseconds.
pub fn now_micros() -> u64 {
    chrono::Utc::now().timestamp_micros() as u64
}

/// Check that `weight` is usable as an edge weight.
pub fn validate_weight(weight: f64) -> GraphResult<()> {
    if weight.is_finite() && weight >= 0.0 {
        Ok(())
    } else {
        Err(GraphError::InvalidWeight(weight))
    }
}
