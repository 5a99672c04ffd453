//! Error types for ledger operations.
//!
//! Lookups that can miss return `Option`; only mutations and validation
//! have failure modes worth naming.

use thiserror::Error;

use super::block::Block;

/// Errors from ledger lifecycle operations.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    /// `initialize` was called on a ledger that already has a genesis block.
    #[error("ledger already initialized with {height} block(s)")]
    AlreadyInitialized {
        /// Chain length at the time of the call.
        height: usize,
    },
}

/// Why a candidate block was rejected.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The candidate does not point at the block it is meant to extend.
    #[error("linkage broken: expected previous_hash {expected}, got {found}")]
    LinkageBroken {
        /// `block_hash` of the block being extended.
        expected: String,
        /// `previous_hash` carried by the candidate.
        found: String,
    },

    /// The candidate's stored hash does not match its content.
    #[error("content hash mismatch: computed {computed}, block carries {stored}")]
    HashMismatch {
        /// Hash recomputed from the candidate's fields.
        computed: String,
        /// `block_hash` carried by the candidate.
        stored: String,
    },
}

/// A block refused by [`crate::ledger::Ledger::ingest_external_block`].
///
/// Hands the payload back to the caller untouched so it can be echoed or
/// inspected.
#[derive(Debug, Clone, Error, PartialEq)]
#[error("block {} rejected: {reason}", .block.index)]
pub struct RejectedBlock {
    /// The candidate exactly as submitted.
    pub block: Box<Block>,
    /// The check that failed.
    pub reason: ValidationError,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_both_sides() {
        let err = ValidationError::LinkageBroken {
            expected: "aaa".into(),
            found: "bbb".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("aaa"));
        assert!(msg.contains("bbb"));
    }

    #[test]
    fn rejected_block_message_includes_index() {
        let rejected = RejectedBlock {
            block: Box::new(Block::new(5, "p", "t", vec![], "h")),
            reason: ValidationError::HashMismatch {
                computed: "c".into(),
                stored: "h".into(),
            },
        };
        assert!(rejected.to_string().starts_with("block 5 rejected"));
    }
}
