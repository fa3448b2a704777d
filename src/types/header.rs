//! File header for .wgr binary snapshots.

use std::io::{Read, Write};

use crate::types::error::{GraphError, GraphResult};
use crate::types::{FLAG_COMPRESSED, FORMAT_VERSION, WGRAPH_MAGIC};

/// Header of a .wgr file. Fixed size: 64 bytes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FileHeader {
    /// Magic bytes: [0x57, 0x47, 0x52, 0x46] ("WGRF").
    pub magic: [u8; 4],
    /// Format version (currently 1).
    pub version: u32,
    /// Bit flags, see [`FLAG_COMPRESSED`].
    pub flags: u32,
    /// Number of nodes in the snapshot.
    pub node_count: u64,
    /// Number of undirected edges in the snapshot.
    pub edge_count: u64,
    /// Modification counter of the graph when it was saved.
    pub modification_count: u64,
    /// When the snapshot was written (Unix epoch microseconds).
    pub saved_at: u64,
    /// Length in bytes of the body as stored (after compression, if any).
    pub body_length: u64,
}

/// The fixed size of a FileHeader on disk: 64 bytes.
pub const HEADER_SIZE: u64 = 64;

impl FileHeader {
    /// Create a new header with default magic and version.
    pub fn new() -> Self {
        Self {
            magic: WGRAPH_MAGIC,
            version: FORMAT_VERSION,
            flags: 0,
            node_count: 0,
            edge_count: 0,
            modification_count: 0,
            saved_at: 0,
            body_length: 0,
        }
    }

    /// Whether the body following this header is LZ4-compressed.
    pub fn is_compressed(&self) -> bool {
        self.flags & FLAG_COMPRESSED != 0
    }

    /// Write this header to the given writer. Writes exactly 64 bytes.
    ///
    /// Layout (all little-endian):
    /// - 0x00..0x04: magic (4 bytes)
    /// - 0x04..0x08: version (u32, 4 bytes)
    /// - 0x08..0x0C: flags (u32, 4 bytes)
    /// - 0x0C..0x10: _reserved (u32, 4 bytes, written as 0)
    /// - 0x10..0x18: node_count (u64, 8 bytes)
    /// - 0x18..0x20: edge_count (u64, 8 bytes)
    /// - 0x20..0x28: modification_count (u64, 8 bytes)
    /// - 0x28..0x30: saved_at (u64, 8 bytes)
    /// - 0x30..0x38: body_length (u64, 8 bytes)
    /// - 0x38..0x40: _reserved (u64, 8 bytes, written as 0)
    ///   Total: 64 bytes
    pub fn write_to(&self, writer: &mut impl Write) -> GraphResult<()> {
        writer.write_all(&self.magic)?;
        writer.write_all(&self.version.to_le_bytes())?;
        writer.write_all(&self.flags.to_le_bytes())?;
        writer.write_all(&0u32.to_le_bytes())?; // _reserved
        writer.write_all(&self.node_count.to_le_bytes())?;
        writer.write_all(&self.edge_count.to_le_bytes())?;
        writer.write_all(&self.modification_count.to_le_bytes())?;
        writer.write_all(&self.saved_at.to_le_bytes())?;
        writer.write_all(&self.body_length.to_le_bytes())?;
        writer.write_all(&0u64.to_le_bytes())?; // _reserved
        Ok(())
    }

    /// Read a header from the given reader. Reads exactly 64 bytes.
    pub fn read_from(reader: &mut impl Read) -> GraphResult<Self> {
        let mut buf = [0u8; HEADER_SIZE as usize];
        reader.read_exact(&mut buf).map_err(|e| {
            if e.kind() == std::io::ErrorKind::UnexpectedEof {
                GraphError::Truncated
            } else {
                GraphError::Io(e)
            }
        })?;

        let magic = [buf[0], buf[1], buf[2], buf[3]];
        if magic != WGRAPH_MAGIC {
            return Err(GraphError::InvalidMagic);
        }

        let version = read_u32(&buf, 4);
        if version != FORMAT_VERSION {
            return Err(GraphError::UnsupportedVersion(version));
        }

        let flags = read_u32(&buf, 8);
        if flags & !FLAG_COMPRESSED != 0 {
            return Err(GraphError::Corrupt(8));
        }
        // bytes 12..16 are reserved

        Ok(Self {
            magic,
            version,
            flags,
            node_count: read_u64(&buf, 16),
            edge_count: read_u64(&buf, 24),
            modification_count: read_u64(&buf, 32),
            saved_at: read_u64(&buf, 40),
            body_length: read_u64(&buf, 48),
        })
    }
}

impl Default for FileHeader {
    fn default() -> Self {
        Self::new()
    }
}

fn read_u32(buf: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([buf[at], buf[at + 1], buf[at + 2], buf[at + 3]])
}

fn read_u64(buf: &[u8], at: usize) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&buf[at..at + 8]);
    u64::from_le_bytes(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_is_64_bytes() {
        let mut buf = Vec::new();
        FileHeader::new().write_to(&mut buf).unwrap();
        assert_eq!(buf.len() as u64, HEADER_SIZE);
    }

    #[test]
    fn unknown_flags_are_rejected() {
        let mut header = FileHeader::new();
        header.flags = 0x4;
        let mut buf = Vec::new();
        header.write_to(&mut buf).unwrap();
        let err = FileHeader::read_from(&mut buf.as_slice()).unwrap_err();
        assert!(matches!(err, GraphError::Corrupt(8)));
    }
}
