//! Shared checksum/signature verification, used by both the request parser
//! (server side) and the response parser (client side) since both frame
//! shapes carry the same optional `CHK`/`SIG` suffixes.

use tcprest_error::RpcError;
use tcprest_security::SecurityConfig;

use crate::suffix::SplitSuffixes;

/// Verify the `SIG:` segment of `split` against `security`, if configured.
pub fn verify_signature(security: &SecurityConfig, split: &SplitSuffixes) -> Result<(), RpcError> {
    let Some(required) = &security.signature else {
        return Ok(());
    };
    let Some((algo, b64_sig)) = &split.signature else {
        return Err(RpcError::protocol("missing required signature"));
    };
    let sig_bytes = tcprest_proto::base64url::decode(b64_sig)
        .map_err(|_| RpcError::protocol("malformed signature encoding"))?;
    let prefix = split
        .signature_prefix
        .as_deref()
        .expect("signature_prefix is set whenever signature is");
    tcprest_security::GLOBAL_SIGNATURE_REGISTRY
        .verify(algo, prefix.as_bytes(), &sig_bytes, &required.peer_public_key)
        .map_err(|e| RpcError::protocol(format!("signature verification failed: {e}")))
}

/// Verify the `CHK:` segment of `split` against `security`, if configured.
pub fn verify_checksum(security: &SecurityConfig, split: &SplitSuffixes) -> Result<(), RpcError> {
    let algo = security.checksum_algorithm();
    if matches!(algo, tcprest_security::ChecksumAlgorithm::None) {
        return Ok(());
    }
    let Some(hex) = &split.checksum_hex else {
        return Err(RpcError::protocol("missing required checksum"));
    };
    algo.verify(split.checksum_prefix.as_bytes(), hex)
        .map_err(|_| RpcError::protocol("checksum mismatch"))
}
