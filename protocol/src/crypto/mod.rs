//! # Cryptographic Primitives
//!
//! Content hashing for blocks. chainlet does not sign or verify anything:
//! transaction signatures are carried as opaque strings and never checked.

pub mod hash;

pub use hash::{sha256, sha256_hex, sha256_hex_multi};
