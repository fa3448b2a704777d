//! LZ4 body compression/decompression.

use crate::types::error::{GraphError, GraphResult};

/// Compress a snapshot body with LZ4 (prepend size for decompression).
pub fn compress_body(body: &[u8]) -> Vec<u8> {
    lz4_flex::compress_prepend_size(body)
}

/// Decompress an LZ4-compressed snapshot body.
pub fn decompress_body(data: &[u8]) -> GraphResult<Vec<u8>> {
    lz4_flex::decompress_size_prepended(data).map_err(|e| GraphError::Compression(e.to_string()))
}
