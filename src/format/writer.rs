//! Writes .wgr snapshots from an in-memory graph.

use std::io::Write;
use std::path::Path;

use log::info;

use crate::graph::WeightedGraph;
use crate::types::error::GraphResult;
use crate::types::header::FileHeader;
use crate::types::{now_micros, FLAG_COMPRESSED};

use super::compression::compress_body;

/// Size of a single node record: 4 bytes.
pub(crate) const NODE_RECORD_SIZE: usize = 4;

/// Size of a single edge record: 16 bytes.
pub(crate) const EDGE_RECORD_SIZE: usize = 16;

/// Writer for .wgr binary snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapshotWriter {
    compress: bool,
}

impl SnapshotWriter {
    /// Create a writer that stores the body uncompressed.
    pub fn new() -> Self {
        Self { compress: false }
    }

    /// Choose whether the body is LZ4-compressed.
    pub fn with_compression(mut self, compress: bool) -> Self {
        self.compress = compress;
        self
    }

    /// Write a complete graph to a .wgr file.
    pub fn write_to_file(&self, graph: &WeightedGraph, path: &Path) -> GraphResult<()> {
        let file = std::fs::File::create(path)?;
        let mut writer = std::io::BufWriter::new(file);
        self.write_to(graph, &mut writer)?;
        info!(
            "saved snapshot of {} nodes, {} edges to {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
        Ok(())
    }

    /// Write a complete graph to any writer.
    pub fn write_to(&self, graph: &WeightedGraph, writer: &mut impl Write) -> GraphResult<()> {
        let edges = graph.edges();

        // Step 1: Encode the body
        let mut body: Vec<u8> = Vec::with_capacity(
            graph.node_count() * NODE_RECORD_SIZE + edges.len() * EDGE_RECORD_SIZE,
        );
        for key in graph.keys() {
            body.extend_from_slice(&key.to_le_bytes()); // 4 bytes
        }
        for &(a, b, weight) in &edges {
            body.extend_from_slice(&a.to_le_bytes()); // 4 bytes
            body.extend_from_slice(&b.to_le_bytes()); // 4 bytes
            body.extend_from_slice(&weight.to_le_bytes()); // 8 bytes
                                                           // Total: 16
        }

        // Step 2: Compress if asked
        let (flags, body) = if self.compress {
            (FLAG_COMPRESSED, compress_body(&body))
        } else {
            (0, body)
        };

        // Step 3: Write header
        let header = FileHeader {
            flags,
            node_count: graph.node_count() as u64,
            edge_count: edges.len() as u64,
            modification_count: graph.modification_count(),
            saved_at: now_micros(),
            body_length: body.len() as u64,
            ..FileHeader::new()
        };
        header.write_to(writer)?;

        // Step 4: Write body
        writer.write_all(&body)?;
        writer.flush()?;
        Ok(())
    }
}
