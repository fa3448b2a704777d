//! Persistence: the human-readable text export and binary .wgr snapshots.

#[cfg(feature = "format")]
pub mod compression;
#[cfg(feature = "format")]
pub mod reader;
pub mod text;
#[cfg(feature = "format")]
pub mod writer;

#[cfg(feature = "format")]
pub use reader::SnapshotReader;
pub use text::{parse_graph, to_text};
#[cfg(feature = "format")]
pub use writer::SnapshotWriter;

use std::path::Path;

/// File extension that selects the binary format.
pub const SNAPSHOT_EXTENSION: &str = "wgr";

/// Whether `path` names a binary snapshot rather than a text export.
pub fn is_snapshot_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(SNAPSHOT_EXTENSION))
}
