//! Certificate fingerprints

use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of DER bytes, formatted as upper-case colon hex
#[must_use]
pub fn sha256_fingerprint(der: &[u8]) -> String {
    colon_hex(&Sha256::digest(der)).to_uppercase()
}

/// Format bytes as lower-case hex pairs joined by `:`
#[must_use]
pub fn colon_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| hex::encode([*b]))
        .collect::<Vec<_>>()
        .join(":")
}
