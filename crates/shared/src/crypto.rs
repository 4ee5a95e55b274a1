//! Hashing helpers for signed upstream requests.

use sha2::{Digest, Sha256};

/// Computes SHA-256 of the input and returns it as lowercase hex.
pub fn sha256_hex(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}

/// Signs request parameters the way media hosts expect: parameters sorted by
/// key, joined as `k=v&k=v`, the secret appended, then hashed.
///
/// Empty values are skipped.
pub fn sign_params(params: &[(&str, String)], secret: &str) -> String {
    let mut sorted: Vec<&(&str, String)> = params.iter().filter(|(_, v)| !v.is_empty()).collect();
    sorted.sort_by(|a, b| a.0.cmp(b.0));

    let canonical = sorted
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&");

    sha256_hex(&format!("{}{}", canonical, secret))
}
