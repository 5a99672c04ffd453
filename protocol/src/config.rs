//! # Protocol Configuration & Constants
//!
//! Every magic value in chainlet lives here. The genesis sentinels in
//! particular are part of the wire contract: peers that ingest our chain
//! compare against them byte for byte.

// ---------------------------------------------------------------------------
// Protocol Version
// ---------------------------------------------------------------------------

/// The full protocol version string reported by the node.
pub const PROTOCOL_VERSION: &str = "0.1.0";

// ---------------------------------------------------------------------------
// Genesis
// ---------------------------------------------------------------------------

/// `previous_hash` carried by the genesis block. There is no block zero to
/// point at, so the first block links to this fixed marker instead.
pub const GENESIS_PREVIOUS_HASH: &str = "1";

/// `block_hash` carried by the genesis block.
///
/// This is a literal, not a digest of the genesis contents. Every other
/// block's hash is derived from content; genesis is the one exception, and
/// [`crate::ledger::Ledger::verify_chain`] skips it accordingly.
pub const GENESIS_BLOCK_HASH: &str = "genesis_hash";

/// Index assigned to the genesis block. Chains are 1-indexed.
pub const GENESIS_INDEX: u64 = 1;

// ---------------------------------------------------------------------------
// Hashing
// ---------------------------------------------------------------------------

/// Length of a hex-encoded block hash (32 bytes -> 64 hex chars).
pub const BLOCK_HASH_HEX_LENGTH: usize = 64;

// ---------------------------------------------------------------------------
// Network Parameters
// ---------------------------------------------------------------------------

/// Default bind address for the HTTP API.
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default HTTP API port.
pub const DEFAULT_RPC_PORT: u16 = 8000;

/// Default metrics (Prometheus) port.
pub const DEFAULT_METRICS_PORT: u16 = 9742;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_genesis_sentinels_are_not_hex_digests() {
        // A sentinel that happened to look like a real digest could collide
        // with a content hash. Keep them obviously distinct.
        assert_ne!(GENESIS_BLOCK_HASH.len(), BLOCK_HASH_HEX_LENGTH);
        assert_ne!(GENESIS_PREVIOUS_HASH.len(), BLOCK_HASH_HEX_LENGTH);
    }

    #[test]
    fn test_ports_are_distinct() {
        assert_ne!(DEFAULT_RPC_PORT, DEFAULT_METRICS_PORT);
    }

    #[test]
    fn test_genesis_index_is_one() {
        assert_eq!(GENESIS_INDEX, 1);
    }
}
