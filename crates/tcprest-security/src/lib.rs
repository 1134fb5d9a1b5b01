//! Checksums, pluggable signature handlers, and identifier/whitelist
//! validation for TCPREST frames.
//!
//! This crate has no notion of sockets or frame *shape*; it only answers
//! yes/no and produces/verifies the small suffixes (`CHK:…`, `SIG:…`) that
//! [`tcprest-codec`](https://docs.rs/tcprest-codec) splices in and out.

pub mod checksum;
pub mod config;
pub mod identifier;
pub mod signature;
pub mod whitelist;

pub use checksum::{ChecksumAlgorithm, ChecksumMismatch};
pub use config::{ChecksumAlgorithmConfig, SecurityConfig, SignatureConfig};
pub use identifier::{is_valid_class_name, is_valid_method_name};
pub use signature::{SignatureError, SignatureHandler, SignatureRegistry, GLOBAL_SIGNATURE_REGISTRY};
pub use whitelist::ClassWhitelist;
