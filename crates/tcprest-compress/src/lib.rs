//! GZIP wrap/unwrap for the transport-level compression prefix: `1|` marks
//! a GZIP-compressed payload, `0|` marks an uncompressed one, and frames
//! with neither prefix (legacy, or peers that predate compression support)
//! pass straight through.
//!
//! This prefix is orthogonal to, and sits outside of, the version tag parsed
//! by [`tcprest_proto::version`]: it is stripped at the transport boundary
//! before the version-tagged frame body is ever looked at, the way a
//! content-encoding prefix is peeled off before the document body
//! underneath it is touched.

use std::io::{self, Read, Write};

use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use thiserror::Error;

const COMPRESSED_PREFIX: &[u8] = b"1|";
const UNCOMPRESSED_PREFIX: &[u8] = b"0|";

/// How eagerly to GZIP outbound payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionConfig {
    /// Minimum byte length before compression is applied at all. A payload
    /// shorter than this is sent with the `0|` prefix even if compression is
    /// otherwise enabled.
    pub threshold: usize,
    /// GZIP level, 1 (fastest) through 9 (smallest).
    pub level: u32,
}

impl Default for CompressionConfig {
    fn default() -> Self {
        Self {
            threshold: 0,
            level: 6,
        }
    }
}

impl CompressionConfig {
    /// Compression is disabled outright: every payload is sent with the
    /// `0|` prefix.
    pub const fn disabled() -> Self {
        Self {
            threshold: usize::MAX,
            level: 6,
        }
    }
}

/// A compressed payload failed to decode.
#[derive(Debug, Error)]
#[error("failed to decompress payload: {0}")]
pub struct DecompressError(#[from] io::Error);

/// Apply the compression prefix to `payload` per `config`.
///
/// Payloads at or above `config.threshold` bytes are GZIP-compressed and
/// tagged `1|`; shorter payloads are tagged `0|` and left as-is.
pub fn wrap(payload: &[u8], config: &CompressionConfig) -> Vec<u8> {
    if payload.len() < config.threshold {
        let mut out = Vec::with_capacity(UNCOMPRESSED_PREFIX.len() + payload.len());
        out.extend_from_slice(UNCOMPRESSED_PREFIX);
        out.extend_from_slice(payload);
        return out;
    }

    let mut encoder = GzEncoder::new(Vec::new(), Compression::new(config.level));
    encoder
        .write_all(payload)
        .expect("writing to an in-memory GzEncoder cannot fail");
    let compressed = encoder
        .finish()
        .expect("finishing an in-memory GzEncoder cannot fail");

    let mut out = Vec::with_capacity(COMPRESSED_PREFIX.len() + compressed.len());
    out.extend_from_slice(COMPRESSED_PREFIX);
    out.extend_from_slice(&compressed);
    out
}

/// Strip and, if needed, reverse the compression prefix on `framed`.
///
/// A payload with neither prefix (a legacy frame, or a peer that never
/// compresses) is returned unchanged.
pub fn unwrap(framed: &[u8]) -> Result<Vec<u8>, DecompressError> {
    if let Some(rest) = framed.strip_prefix(COMPRESSED_PREFIX) {
        let mut decoder = GzDecoder::new(rest);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        Ok(out)
    } else if let Some(rest) = framed.strip_prefix(UNCOMPRESSED_PREFIX) {
        Ok(rest.to_vec())
    } else {
        Ok(framed.to_vec())
    }
}
