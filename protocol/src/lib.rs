// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # chainlet Core Library
//!
//! A single-node, in-memory ledger: an append-only chain of blocks, each
//! pointing at its predecessor's hash, fed by a pool of pending
//! transactions.
//!
//! There is no proof-of-work, no consensus and no persistence. What is here
//! is the linkage model: how a block's hash is derived from its content,
//! how a candidate block is checked against the chain tip, and how pending
//! transactions are drained into a new block in one step.
//!
//! ## Architecture
//!
//! - **config**: Genesis sentinels, default ports, version.
//! - **crypto**: SHA-256 content hashing.
//! - **ledger**: Transactions, blocks, and the [`ledger::Ledger`] that owns them.
//!
//! ## Quick tour
//!
//! ```
//! use chainlet_protocol::ledger::{Ledger, LedgerConfig, Transaction};
//!
//! let mut ledger = Ledger::new(LedgerConfig::default());
//! ledger.add_pending_transaction(Transaction::new("A", "B", 10.0));
//! let block = ledger.mine_block();
//! assert_eq!(block.index, 2);
//! assert!(ledger.pending_transactions().is_empty());
//! ```

pub mod config;
pub mod crypto;
pub mod ledger;
