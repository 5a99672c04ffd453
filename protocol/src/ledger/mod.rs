//! # Ledger Module
//!
//! The chain, the pending pool, and the rules that connect them.
//!
//! ## Architecture
//!
//! ```text
//! transaction.rs  Transaction record (opaque payload, strict JSON shape)
//! block.rs        Block structure and content-hash computation
//! chain.rs        Ledger: pending pool, mining, validation, ingestion
//! error.rs        LedgerError, ValidationError, RejectedBlock
//! ```
//!
//! ## Data Flow
//!
//! ```text
//! add_pending_transaction → pending pool ─┐
//!                                         ├→ mine_block → chain
//! ingest_external_block → validate_block ─┘
//! ```
//!
//! Every block after genesis links to its predecessor through
//! `previous_hash`. Mined blocks are hashed by the ledger; ingested blocks
//! bring their own hash and are only accepted if it matches their content.

pub mod block;
pub mod chain;
pub mod error;
pub mod transaction;

pub use block::{compute_block_hash, Block};
pub use chain::{ChainFault, HashBinding, Ledger, LedgerConfig};
pub use error::{LedgerError, RejectedBlock, ValidationError};
pub use transaction::Transaction;
