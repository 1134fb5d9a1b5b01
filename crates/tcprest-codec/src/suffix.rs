//! Splits the optional `|CHK:...` and `|SIG:algo:...` trailing segments off
//! a pipe-framed body. Signature is peeled first, since it covers
//! everything including any checksum segment, then checksum.

/// The result of peeling `SIG` and `CHK` segments off a frame.
pub struct SplitSuffixes {
    /// `V|META|PARAMS` (or `V|STATUS|BODY`), with both suffixes removed.
    pub core: String,
    /// The bytes the checksum was computed over: `core`, i.e. everything
    /// before `|CHK:`.
    pub checksum_prefix: String,
    /// `(algorithm, base64 signature)`, if a `SIG:` segment was present.
    pub signature: Option<(String, String)>,
    /// Hex checksum digits, if a `CHK:` segment was present.
    pub checksum_hex: Option<String>,
    /// The bytes the signature was computed over: everything before
    /// `|SIG:`, which still includes the `CHK:` segment if both are
    /// present.
    pub signature_prefix: Option<String>,
}

/// Split `inner` (a pipe-framed body with its compression prefix already
/// stripped) into its core and optional `CHK`/`SIG` suffixes.
pub fn split_suffixes(inner: &str) -> SplitSuffixes {
    let mut parts: Vec<&str> = inner.split('|').collect();

    let mut signature = None;
    let mut signature_prefix = None;
    if parts.last().is_some_and(|p| p.starts_with("SIG:")) {
        let sig_part = parts.pop().expect("checked by last()");
        signature_prefix = Some(parts.join("|"));
        let rest = &sig_part[4..]; // strip "SIG:"
        if let Some((algo, b64)) = rest.split_once(':') {
            signature = Some((algo.to_string(), b64.to_string()));
        }
    }

    let mut checksum_hex = None;
    if parts.last().is_some_and(|p| p.starts_with("CHK:")) {
        let chk_part = parts.pop().expect("checked by last()");
        checksum_hex = Some(chk_part[4..].to_string());
    }

    let core = parts.join("|");
    SplitSuffixes {
        checksum_prefix: core.clone(),
        core,
        signature,
        checksum_hex,
        signature_prefix,
    }
}

/// Append `|CHK:<hex>` to `core` if `checksum_hex` is `Some`.
pub fn append_checksum(core: &str, checksum_hex: Option<&str>) -> String {
    match checksum_hex {
        Some(hex) => format!("{core}|CHK:{hex}"),
        None => core.to_string(),
    }
}

/// Append `|SIG:<algo>:<base64>` to `core` if `signature` is `Some`.
pub fn append_signature(core: &str, signature: Option<(&str, &str)>) -> String {
    match signature {
        Some((algo, b64)) => format!("{core}|SIG:{algo}:{b64}"),
        None => core.to_string(),
    }
}
