//! In-memory chain management: the pending pool, mining, and validation of
//! externally supplied blocks.
//!
//! [`Ledger`] is the sole owner and mutator of the chain and the pending
//! pool. Every mutating operation takes `&mut self`, so a caller that wraps
//! the ledger in a lock gets whole-operation atomicity for free: nothing can
//! slip into the pool between the snapshot taken by [`Ledger::mine_block`]
//! and the clear that follows it.

use serde::{Deserialize, Serialize};

use super::block::{compute_block_hash, current_timestamp, Block};
use super::error::{LedgerError, RejectedBlock, ValidationError};
use super::transaction::Transaction;
use crate::config::{GENESIS_BLOCK_HASH, GENESIS_INDEX, GENESIS_PREVIOUS_HASH};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Which fields feed the `block_hash` of a freshly mined block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashBinding {
    /// Hash the new block's own index, previous hash, timestamp and
    /// transactions. Mined blocks then pass [`Ledger::validate_block`].
    #[default]
    OwnContent,
    /// Hash the *previous* block's fields instead. Two different
    /// transaction sets mined on the same tip get the same hash, and mined
    /// blocks fail content validation. Kept for chains produced by older
    /// nodes that worked this way.
    ParentContent,
}

/// Tunable ledger behaviour.
#[derive(Debug, Clone, Default)]
pub struct LedgerConfig {
    /// How mined blocks derive their hash.
    pub hash_binding: HashBinding,
}

// ---------------------------------------------------------------------------
// ChainFault
// ---------------------------------------------------------------------------

/// A problem found by [`Ledger::verify_chain`] at a specific block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainFault {
    /// Index of the offending block.
    pub index: u64,
    /// The failed check, rendered for humans.
    pub error: String,
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// Ordered chain of blocks plus the pool of transactions awaiting a block.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    chain: Vec<Block>,
    pending_transactions: Vec<Transaction>,
    config: LedgerConfig,
}

impl Ledger {
    /// Creates a ledger and mines its genesis block.
    pub fn new(config: LedgerConfig) -> Self {
        let mut ledger = Self::uninitialized(config);
        ledger.mine_block();
        ledger
    }

    /// Creates a ledger with an empty chain and no genesis block.
    ///
    /// Until [`initialize`](Self::initialize) runs (or a block is ingested),
    /// [`get_last_block`](Self::get_last_block) returns `None` and the next
    /// ingested block is accepted without validation.
    pub fn uninitialized(config: LedgerConfig) -> Self {
        Ledger {
            chain: Vec::new(),
            pending_transactions: Vec::new(),
            config,
        }
    }

    /// Mines the genesis block on an empty ledger.
    ///
    /// # Errors
    ///
    /// [`LedgerError::AlreadyInitialized`] if the chain already has blocks.
    /// The ledger is left unchanged.
    pub fn initialize(&mut self) -> Result<&Block, LedgerError> {
        if !self.chain.is_empty() {
            return Err(LedgerError::AlreadyInitialized {
                height: self.chain.len(),
            });
        }
        Ok(self.mine_block())
    }

    // -- Reads --------------------------------------------------------------

    /// Returns the block with the highest index, or `None` before genesis.
    pub fn get_last_block(&self) -> Option<&Block> {
        self.chain.last()
    }

    /// Returns every block, genesis first.
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Returns the number of blocks in the chain.
    pub fn height(&self) -> usize {
        self.chain.len()
    }

    /// Returns the block at 1-based position `index`, if any.
    ///
    /// Takes a signed index so out-of-range input from callers (zero,
    /// negatives) is a plain miss rather than a conversion error.
    pub fn get_block_by_index(&self, index: i64) -> Option<&Block> {
        let position = usize::try_from(index).ok()?.checked_sub(1)?;
        self.chain.get(position)
    }

    /// Returns the transactions queued for the next block, oldest first.
    pub fn pending_transactions(&self) -> &[Transaction] {
        &self.pending_transactions
    }

    // -- Hashing & validation -----------------------------------------------

    /// Computes the content hash of `block`. See
    /// [`compute_block_hash`] for the exact preimage.
    pub fn calculate_block_hash(block: &Block) -> String {
        compute_block_hash(block)
    }

    /// Checks that `candidate` extends `previous`.
    ///
    /// Linkage is checked first; a candidate with broken linkage is rejected
    /// whether or not its own hash is correct.
    pub fn validate_block(candidate: &Block, previous: &Block) -> Result<(), ValidationError> {
        if candidate.previous_hash != previous.block_hash {
            return Err(ValidationError::LinkageBroken {
                expected: previous.block_hash.clone(),
                found: candidate.previous_hash.clone(),
            });
        }

        let computed = Self::calculate_block_hash(candidate);
        if computed != candidate.block_hash {
            return Err(ValidationError::HashMismatch {
                computed,
                stored: candidate.block_hash.clone(),
            });
        }

        Ok(())
    }

    /// Re-validates every block after genesis against its predecessor and
    /// reports each failure.
    ///
    /// Genesis is skipped: its hash is a sentinel, not a digest. A ledger
    /// mining with [`HashBinding::ParentContent`] reports a fault for every
    /// mined block.
    pub fn verify_chain(&self) -> Vec<ChainFault> {
        self.chain
            .windows(2)
            .filter_map(|pair| {
                Self::validate_block(&pair[1], &pair[0])
                    .err()
                    .map(|e| ChainFault {
                        index: pair[1].index,
                        error: e.to_string(),
                    })
            })
            .collect()
    }

    // -- Mutations ----------------------------------------------------------

    /// Queues `transaction` for the next mined block and returns the stored
    /// record. The transaction is not inspected.
    pub fn add_pending_transaction(&mut self, transaction: Transaction) -> &Transaction {
        self.pending_transactions.push(transaction);
        tracing::debug!(
            pending = self.pending_transactions.len(),
            "transaction queued"
        );
        // Just pushed, so the pool is non-empty.
        &self.pending_transactions[self.pending_transactions.len() - 1]
    }

    /// Drains the pending pool into a new block and appends it.
    ///
    /// The new block takes ownership of the pool's contents, leaving an empty
    /// pool behind. On an empty ledger this produces the genesis block with
    /// the sentinel hashes from [`crate::config`]. Genesis never carries
    /// transactions: anything queued before it stays pending for block 2.
    pub fn mine_block(&mut self) -> &Block {
        let index = self.chain.len() as u64 + 1;
        let timestamp = current_timestamp();

        let block = match self.chain.last() {
            None => Block::new(
                GENESIS_INDEX,
                GENESIS_PREVIOUS_HASH,
                timestamp,
                Vec::new(),
                GENESIS_BLOCK_HASH,
            ),
            Some(previous) => {
                let transactions = std::mem::take(&mut self.pending_transactions);
                let mut block = Block::new(
                    index,
                    previous.block_hash.clone(),
                    timestamp,
                    transactions,
                    String::new(),
                );
                block.block_hash = match self.config.hash_binding {
                    HashBinding::OwnContent => Self::calculate_block_hash(&block),
                    HashBinding::ParentContent => Self::calculate_block_hash(previous),
                };
                block
            }
        };

        tracing::info!(
            index = block.index,
            hash = %block.block_hash,
            tx_count = block.tx_count(),
            "block mined"
        );

        self.chain.push(block);
        &self.chain[self.chain.len() - 1]
    }

    /// Appends a block built elsewhere, after checking it against the tip.
    ///
    /// An empty ledger accepts the first block unconditionally. Accepted
    /// blocks are stored exactly as received; nothing is recomputed.
    ///
    /// # Errors
    ///
    /// [`RejectedBlock`] carrying the candidate and the failed check. The
    /// chain is not modified.
    pub fn ingest_external_block(&mut self, candidate: Block) -> Result<&Block, RejectedBlock> {
        if let Some(tip) = self.chain.last() {
            if let Err(reason) = Self::validate_block(&candidate, tip) {
                tracing::warn!(
                    index = candidate.index,
                    tip = tip.index,
                    %reason,
                    "external block rejected"
                );
                return Err(RejectedBlock {
                    block: Box::new(candidate),
                    reason,
                });
            }
        } else {
            tracing::info!(index = candidate.index, "bootstrapping empty chain");
        }

        tracing::info!(
            index = candidate.index,
            hash = %candidate.block_hash,
            "external block accepted"
        );
        self.chain.push(candidate);
        Ok(&self.chain[self.chain.len() - 1])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
