//! Frame assembly shared by request encoding (client) and response
//! encoding (server): join the version-tagged core, append `CHK` then
//! `SIG` if configured, then apply the compression prefix.

use tcprest_compress::CompressionConfig;
use tcprest_error::RpcError;
use tcprest_proto::{base64url, Version};
use tcprest_security::SecurityConfig;

use crate::suffix::{append_checksum, append_signature};

/// Assemble `tag|field2|field3`, append `CHK`/`SIG` per `security`, and
/// apply `compression`'s prefix, returning the bytes ready to write to the
/// wire (the caller appends the newline terminator).
pub fn assemble(
    version: Version,
    field2: &str,
    field3: &str,
    security: &SecurityConfig,
    compression: &CompressionConfig,
) -> Result<Vec<u8>, RpcError> {
    let mut core = format!("{version}|{field2}|{field3}");

    let algo = security.checksum_algorithm();
    if let Some(hex) = algo.compute(core.as_bytes()) {
        core = append_checksum(&core, Some(&hex));
    }

    if let Some(sig_cfg) = &security.signature {
        let sig_bytes = tcprest_security::GLOBAL_SIGNATURE_REGISTRY
            .sign(&sig_cfg.algorithm, core.as_bytes(), &sig_cfg.private_key)
            .map_err(|e| RpcError::server("tcprest.SignatureError", e.to_string()))?;
        let b64 = base64url::encode(&sig_bytes);
        core = append_signature(&core, Some((&sig_cfg.algorithm, &b64)));
    }

    Ok(tcprest_compress::wrap(core.as_bytes(), compression))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn assembles_plain_frame_uncompressed_by_default() {
        let bytes = assemble(
            Version::V1,
            "meta",
            "params",
            &SecurityConfig::none(),
            &CompressionConfig::disabled(),
        )
        .unwrap();
        assert_eq!(bytes, b"0|1|meta|params");
    }
}
