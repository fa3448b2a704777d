//! Error types for the wgraph library.

use thiserror::Error;

use super::NodeKey;

/// All errors that can occur in the wgraph library.
#[derive(Error, Debug)]
pub enum GraphError {
    /// Edge weight is negative or not finite.
    #[error("Edge weight must be finite and non-negative, got {0}")]
    InvalidWeight(f64),

    /// Operation references a key that is not in the graph.
    #[error("Node key {0} not found")]
    KeyNotFound(NodeKey),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid magic bytes in file header.
    #[error("Invalid magic bytes in file header")]
    InvalidMagic,

    /// Unsupported format version.
    #[error("Unsupported format version: {0}")]
    UnsupportedVersion(u32),

    /// File is empty or truncated.
    #[error("File is empty or truncated")]
    Truncated,

    /// Corrupt data at a given offset.
    #[error("Corrupt data at offset {0}")]
    Corrupt(u64),

    /// Compression error.
    #[error("Compression error: {0}")]
    Compression(String),

    /// Malformed text export.
    #[error("Cannot parse `{fragment}`: {reason}")]
    Parse { fragment: String, reason: String },
}

impl GraphError {
    pub(crate) fn parse(fragment: &str, reason: impl Into<String>) -> Self {
        Self::Parse {
            fragment: fragment.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience result type for wgraph operations.
pub type GraphResult<T> = Result<T, GraphError>;
