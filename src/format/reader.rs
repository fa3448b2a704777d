//! Reads .wgr snapshots into an in-memory graph.

use std::io::Read;
use std::path::Path;

use log::info;

use crate::graph::WeightedGraph;
use crate::types::error::{GraphError, GraphResult};
use crate::types::header::{FileHeader, HEADER_SIZE};
use crate::types::NodeKey;

use super::compression::decompress_body;
use super::writer::{EDGE_RECORD_SIZE, NODE_RECORD_SIZE};

/// Reader for .wgr binary snapshots.
pub struct SnapshotReader;

impl SnapshotReader {
    /// Read a .wgr file into a WeightedGraph.
    pub fn read_from_file(path: &Path) -> GraphResult<WeightedGraph> {
        let data = std::fs::read(path)?;
        let graph = Self::read_from(&mut data.as_slice())?;
        info!(
            "loaded snapshot of {} nodes, {} edges from {}",
            graph.node_count(),
            graph.edge_count(),
            path.display()
        );
        Ok(graph)
    }

    /// Read from any reader into a WeightedGraph.
    pub fn read_from(reader: &mut impl Read) -> GraphResult<WeightedGraph> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;

        let header_len = HEADER_SIZE as usize;
        if data.len() < header_len {
            return Err(GraphError::Truncated);
        }
        let header = FileHeader::read_from(&mut &data[..header_len])?;

        // Body, as stored
        let stored_len = usize::try_from(header.body_length).map_err(|_| GraphError::Corrupt(48))?;
        let stored_end = header_len
            .checked_add(stored_len)
            .ok_or(GraphError::Corrupt(48))?;
        if stored_end > data.len() {
            return Err(GraphError::Truncated);
        }
        let stored = &data[header_len..stored_end];
        let decompressed;
        let body: &[u8] = if header.is_compressed() {
            decompressed = decompress_body(stored)?;
            &decompressed
        } else {
            stored
        };

        let node_count = usize::try_from(header.node_count).map_err(|_| GraphError::Corrupt(16))?;
        let edge_count = usize::try_from(header.edge_count).map_err(|_| GraphError::Corrupt(24))?;
        let node_table_len = node_count
            .checked_mul(NODE_RECORD_SIZE)
            .ok_or(GraphError::Corrupt(16))?;
        let expected_len = edge_count
            .checked_mul(EDGE_RECORD_SIZE)
            .and_then(|n| n.checked_add(node_table_len))
            .ok_or(GraphError::Corrupt(24))?;
        if body.len() < expected_len {
            return Err(GraphError::Truncated);
        }
        if body.len() > expected_len {
            return Err(GraphError::Corrupt(HEADER_SIZE + expected_len as u64));
        }

        let mut graph = WeightedGraph::new();

        // Node table
        for (i, record) in body[..node_table_len]
            .chunks_exact(NODE_RECORD_SIZE)
            .enumerate()
        {
            let key = read_key(record, 0);
            if graph.contains_node(key) {
                return Err(GraphError::Corrupt(body_offset(i * NODE_RECORD_SIZE)));
            }
            graph.add_node(key);
        }

        // Edge table
        for (i, record) in body[node_table_len..]
            .chunks_exact(EDGE_RECORD_SIZE)
            .enumerate()
        {
            let offset = body_offset(node_table_len + i * EDGE_RECORD_SIZE);
            let a = read_key(record, 0);
            let b = read_key(record, 4);
            let weight = f64::from_le_bytes(read_array(record, 8));
            if a == b || graph.has_edge(a, b) {
                return Err(GraphError::Corrupt(offset));
            }
            graph
                .connect(a, b, weight)
                .map_err(|_| GraphError::Corrupt(offset))?;
        }

        graph.set_modification_count(header.modification_count);
        Ok(graph)
    }
}

fn body_offset(at: usize) -> u64 {
    HEADER_SIZE + at as u64
}

fn read_key(record: &[u8], at: usize) -> NodeKey {
    NodeKey::from_le_bytes(read_array(record, at))
}

fn read_array<const N: usize>(record: &[u8], at: usize) -> [u8; N] {
    let mut bytes = [0u8; N];
    bytes.copy_from_slice(&record[at..at + N]);
    bytes
}
