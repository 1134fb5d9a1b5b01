//! The `SIG:<algo>:<base64>` capability: a pluggable registry of signing
//! algorithms, keyed by name, that the codec consults without needing to
//! know which concrete algorithms exist.
//!
//! Concrete signing algorithms (RSA, GPG) live outside this crate; it only
//! needs the capability contract and a process-wide registry keyed by
//! algorithm name. Concrete handlers are left to whoever embeds this crate;
//! none are shipped here.

use std::collections::HashMap;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use thiserror::Error;

/// A pluggable signing/verification algorithm, registered by name (e.g.
/// `"RSA"`, `"GPG"`).
pub trait SignatureHandler: Send + Sync {
    /// Sign `message` with `private_key`, returning raw signature bytes.
    fn sign(&self, message: &[u8], private_key: &[u8]) -> Result<Vec<u8>, SignatureError>;

    /// Verify `signature` over `message` under `public_key`.
    fn verify(
        &self,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), SignatureError>;
}

/// A signing or verification operation failed.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// No handler is registered under the requested algorithm name.
    #[error("no signature handler registered for algorithm {0:?}")]
    UnknownAlgorithm(String),
    /// The handler rejected the key material it was given.
    #[error("invalid key material: {0}")]
    InvalidKey(String),
    /// Verification determined the signature does not match.
    #[error("signature does not verify")]
    Mismatch,
}

/// Process-wide registry of [`SignatureHandler`]s, keyed by algorithm name.
///
/// Mirrors the shape of [`crate::mapper`]-style type registries elsewhere in
/// this workspace: register once at startup, then look up by name on every
/// request.
pub struct SignatureRegistry {
    handlers: RwLock<HashMap<String, Box<dyn SignatureHandler>>>,
}

impl SignatureRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            handlers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler under `algorithm`, replacing any prior handler of
    /// the same name.
    pub fn register(&self, algorithm: impl Into<String>, handler: Box<dyn SignatureHandler>) {
        self.handlers
            .write()
            .expect("signature registry lock poisoned")
            .insert(algorithm.into(), handler);
    }

    /// Sign `message` using the handler registered under `algorithm`.
    pub fn sign(
        &self,
        algorithm: &str,
        message: &[u8],
        private_key: &[u8],
    ) -> Result<Vec<u8>, SignatureError> {
        let handlers = self.handlers.read().expect("signature registry lock poisoned");
        let handler = handlers
            .get(algorithm)
            .ok_or_else(|| SignatureError::UnknownAlgorithm(algorithm.to_string()))?;
        handler.sign(message, private_key)
    }

    /// Verify `signature` over `message` using the handler registered under
    /// `algorithm`.
    pub fn verify(
        &self,
        algorithm: &str,
        message: &[u8],
        signature: &[u8],
        public_key: &[u8],
    ) -> Result<(), SignatureError> {
        let handlers = self.handlers.read().expect("signature registry lock poisoned");
        let handler = handlers
            .get(algorithm)
            .ok_or_else(|| SignatureError::UnknownAlgorithm(algorithm.to_string()))?;
        handler.verify(message, signature, public_key)
    }
}

impl Default for SignatureRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide default registry, for embedders who don't need more than
/// one set of handlers per process.
pub static GLOBAL_SIGNATURE_REGISTRY: Lazy<SignatureRegistry> = Lazy::new(SignatureRegistry::new);
