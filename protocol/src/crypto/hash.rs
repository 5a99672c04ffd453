//! # Hashing Utilities
//!
//! SHA-256 is the only digest chainlet uses. Block hashes travel as
//! lowercase hex strings (they are part of the JSON wire format and are
//! compared as strings during validation), so most callers want
//! [`sha256_hex`] rather than the raw bytes.

use sha2::{Digest, Sha256};

/// Compute the SHA-256 hash of the input data as a fixed-size array.
pub fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Compute the SHA-256 hash and return it as 64 lowercase hex characters.
///
/// # Example
///
/// ```
/// use chainlet_protocol::crypto::sha256_hex;
///
/// let digest = sha256_hex(b"chainlet");
/// assert_eq!(digest.len(), 64);
/// ```
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// Hash multiple byte slices in sequence without building a joined buffer.
///
/// Equivalent to hashing the concatenation of `parts`.
pub fn sha256_hex_multi(parts: &[&[u8]]) -> String {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        // SHA-256 of the empty string.
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn sha256_deterministic() {
        let a = sha256(b"chainlet");
        let b = sha256(b"chainlet");
        assert_eq!(a, b);
    }

    #[test]
    fn test_sha256_different_inputs() {
        assert_ne!(sha256_hex(b"ledger"), sha256_hex(b"Ledger"));
    }

    #[test]
    fn test_hex_is_lowercase_and_fixed_length() {
        let digest = sha256_hex(b"block");
        assert_eq!(digest.len(), 64);
        assert!(digest
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_multi_matches_concatenation() {
        let multi = sha256_hex_multi(&[b"hello", b" world"]);
        let single = sha256_hex(b"hello world");
        assert_eq!(multi, single);
    }
}
