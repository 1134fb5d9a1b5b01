//! Aggregate security configuration for one client or server endpoint,
//! collecting the `security.*` settings into a single value the codec and
//! dispatch crates can share.

use crate::checksum::ChecksumAlgorithm;
use crate::whitelist::ClassWhitelist;

/// Security settings for one endpoint.
#[derive(Debug, Clone, Default)]
pub struct SecurityConfig {
    /// Which checksum algorithm, if any, frames on this endpoint carry.
    pub checksum: ChecksumAlgorithmConfig,
    /// Signature settings, if this endpoint signs outbound frames and/or
    /// requires a signature on inbound ones.
    pub signature: Option<SignatureConfig>,
    /// Class names this endpoint will dispatch to.
    pub class_whitelist: ClassWhitelist,
}

/// `security.signature`: an algorithm name plus the key material needed to
/// sign outbound frames and verify inbound ones.
#[derive(Debug, Clone)]
pub struct SignatureConfig {
    /// Name the [`crate::signature::SignatureHandler`] is registered under,
    /// e.g. `"RSA"` or `"GPG"`.
    pub algorithm: String,
    /// This endpoint's private key, used to sign outbound frames.
    pub private_key: Vec<u8>,
    /// The peer's public key, used to verify inbound frames.
    pub peer_public_key: Vec<u8>,
}

/// Checksum configuration as read from config, before any HMAC secret has
/// been validated as non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ChecksumAlgorithmConfig {
    /// `security.checksum = none`
    #[default]
    None,
    /// `security.checksum = CRC32`
    Crc32,
    /// `security.checksum = HMAC-SHA256`, with `security.hmacSecret`.
    HmacSha256 {
        /// The shared secret.
        secret: Vec<u8>,
    },
}

impl From<ChecksumAlgorithmConfig> for ChecksumAlgorithm {
    fn from(cfg: ChecksumAlgorithmConfig) -> Self {
        match cfg {
            ChecksumAlgorithmConfig::None => ChecksumAlgorithm::None,
            ChecksumAlgorithmConfig::Crc32 => ChecksumAlgorithm::Crc32,
            ChecksumAlgorithmConfig::HmacSha256 { secret } => {
                ChecksumAlgorithm::HmacSha256 { secret }
            }
        }
    }
}

impl SecurityConfig {
    /// No checksum, no signature, no class restriction.
    pub fn none() -> Self {
        Self::default()
    }

    /// Build the runtime [`ChecksumAlgorithm`] this config describes.
    pub fn checksum_algorithm(&self) -> ChecksumAlgorithm {
        self.checksum.clone().into()
    }
}
