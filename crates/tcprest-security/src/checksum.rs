//! `CHK:` suffix computation and verification.
//!
//! A checksum is computed over the byte sequence of the frame prefix
//! preceding the `|CHK:` marker, and rendered as hex. CRC32 catches
//! accidental corruption; HMAC-SHA256 with a shared secret gives
//! cryptographic integrity against a tampering peer.

use hmac::{Hmac, Mac as _};
use sha2::Sha256;
use thiserror::Error;

/// Which checksum algorithm a connection is configured to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    /// No checksum is applied.
    None,
    /// CRC32, for detecting accidental corruption.
    Crc32,
    /// HMAC-SHA256 over a shared secret, for detecting tampering.
    HmacSha256 {
        /// The shared secret used to key the HMAC.
        secret: Vec<u8>,
    },
}

/// A checksum could not be verified.
#[derive(Debug, Clone, Error)]
#[error("checksum mismatch")]
pub struct ChecksumMismatch;

impl ChecksumAlgorithm {
    /// Compute the hex-encoded checksum of `prefix` under this algorithm.
    ///
    /// Returns `None` for [`ChecksumAlgorithm::None`]: callers should skip
    /// appending a `CHK:` segment entirely in that case.
    pub fn compute(&self, prefix: &[u8]) -> Option<String> {
        match self {
            ChecksumAlgorithm::None => None,
            ChecksumAlgorithm::Crc32 => {
                let mut hasher = crc32fast::Hasher::new();
                hasher.update(prefix);
                Some(hex::encode(hasher.finalize().to_be_bytes()))
            }
            ChecksumAlgorithm::HmacSha256 { secret } => {
                let mut mac = HmacSha256::new_from_slice(secret)
                    .expect("HMAC accepts keys of any length");
                mac.update(prefix);
                Some(hex::encode(mac.finalize().into_bytes()))
            }
        }
    }

    /// Verify that `prefix` produces `expected_hex` under this algorithm.
    ///
    /// Always succeeds for [`ChecksumAlgorithm::None`], even if
    /// `expected_hex` is `Some`: a peer that sent a checksum this side isn't
    /// configured to check is not itself a protocol violation here. If
    /// checksums are enabled on either peer, both must verify, but that is
    /// enforced by refusing to negotiate mismatched configs up front rather
    /// than by this method.
    pub fn verify(&self, prefix: &[u8], expected_hex: &str) -> Result<(), ChecksumMismatch> {
        match self.compute(prefix) {
            None => Ok(()),
            Some(actual) if constant_time_eq(actual.as_bytes(), expected_hex.as_bytes()) => Ok(()),
            Some(_) => Err(ChecksumMismatch),
        }
    }
}

type HmacSha256 = Hmac<Sha256>;

/// Compare two byte strings in time independent of where they first differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn crc32_is_deterministic_and_detects_tampering() {
        let algo = ChecksumAlgorithm::Crc32;
        let chk = algo.compute(b"0|metadata|params").unwrap();
        assert!(algo.verify(b"0|metadata|params", &chk).is_ok());
        assert!(algo.verify(b"0|metadata|TAMPERED", &chk).is_err());
    }

    #[test]
    fn hmac_is_deterministic_and_detects_tampering() {
        let algo = ChecksumAlgorithm::HmacSha256 {
            secret: b"my-secret-key".to_vec(),
        };
        let chk = algo.compute(b"0|metadata|params").unwrap();
        assert!(algo.verify(b"0|metadata|params", &chk).is_ok());
        assert!(algo.verify(b"0|metadata|TAMPERED", &chk).is_err());
    }

    #[test]
    fn hmac_with_wrong_secret_fails() {
        let signer = ChecksumAlgorithm::HmacSha256 {
            secret: b"my-secret-key".to_vec(),
        };
        let verifier = ChecksumAlgorithm::HmacSha256 {
            secret: b"wrong-key".to_vec(),
        };
        let chk = signer.compute(b"0|metadata|params").unwrap();
        assert!(verifier.verify(b"0|metadata|params", &chk).is_err());
    }

    #[test]
    fn none_never_appends_or_rejects() {
        let algo = ChecksumAlgorithm::None;
        assert_eq!(algo.compute(b"anything"), None);
        assert!(algo.verify(b"anything", "ignored").is_ok());
    }

    #[test]
    fn single_byte_mutation_is_caught() {
        let algo = ChecksumAlgorithm::Crc32;
        let original = b"0|com.example.Hello/helloWorld|".to_vec();
        let chk = algo.compute(&original).unwrap();
        let mut mutated = original.clone();
        mutated[2] ^= 0x01;
        assert!(algo.verify(&mutated, &chk).is_err());
    }
}
