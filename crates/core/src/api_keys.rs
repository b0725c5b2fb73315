//! API key checks for write requests.
//!
//! The configured key is hashed once at startup; incoming keys are hashed
//! and compared digest to digest so the plaintext key is never held in
//! shared state.

use sha2::{Digest, Sha256};

/// Header carrying the client's API key.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Compute the SHA-256 hex digest of an API key.
pub fn hash_api_key(key: &str) -> String {
    format!("{:x}", Sha256::digest(key.as_bytes()))
}

/// Check a presented key against the stored digest.
///
/// Digests are compared byte by byte without early exit.
pub fn verify_api_key(presented: &str, expected_hash: &str) -> bool {
    let presented_hash = hash_api_key(presented);
    if presented_hash.len() != expected_hash.len() {
        return false;
    }
    presented_hash
        .bytes()
        .zip(expected_hash.bytes())
        .fold(0u8, |acc, (a, b)| acc | (a ^ b))
        == 0
}
