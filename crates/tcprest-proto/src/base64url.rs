//! URL-safe, unpadded Base64, used to render frame components (metadata,
//! params, individual tokens) opaque to the `|`, `/`, `(`, `)`, `{{`, `}}`
//! delimiters that structure a frame.
//!
//! Leans on `base64ct` to turn an internal byte representation into a
//! delimiter-safe string, the same technique an opaque-identifier encoder
//! would use to round-trip arbitrary bytes through a restricted alphabet.

use base64ct::{Base64UrlUnpadded, Encoding};
use thiserror::Error;

/// Encode `bytes` as URL-safe, unpadded Base64.
pub fn encode(bytes: &[u8]) -> String {
    Base64UrlUnpadded::encode_string(bytes)
}

/// Encode a UTF-8 string as URL-safe, unpadded Base64.
pub fn encode_str(s: &str) -> String {
    encode(s.as_bytes())
}

/// Error decoding a URL-safe Base64 component.
#[derive(Debug, Clone, Error)]
#[error("invalid base64 component")]
pub struct DecodeError;

/// Decode a URL-safe, unpadded Base64 string back to bytes.
pub fn decode(s: &str) -> Result<Vec<u8>, DecodeError> {
    Base64UrlUnpadded::decode_vec(s).map_err(|_| DecodeError)
}

/// Decode a URL-safe Base64 string and interpret the result as UTF-8.
pub fn decode_str(s: &str) -> Result<String, DecodeError> {
    let bytes = decode(s)?;
    String::from_utf8(bytes).map_err(|_| DecodeError)
}
