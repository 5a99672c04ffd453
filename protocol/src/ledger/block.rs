//! # Block Structure
//!
//! A block is one position in the chain: its index, a link to the previous
//! block's hash, a creation timestamp, the transactions it carries and its
//! own content hash.
//!
//! ## Block Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  index: u64              (1 = genesis)       │
//! │  previous_hash: String   ("1" for genesis)   │
//! │  timestamp: String       (unix secs.micros)  │
//! │  transactions: Vec<Transaction>              │
//! │  block_hash: String      (SHA-256 hex)       │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! ## Hash Computation
//!
//! The content hash is SHA-256 over the UTF-8 string
//! `index || previous_hash || timestamp || canonical_json(transactions)`,
//! rendered as lowercase hex. `block_hash` itself is never part of the
//! preimage.
//!
//! Blocks do no computation on construction. Whoever builds one decides
//! what goes in `block_hash`: the ledger when mining, a remote party when
//! the block is ingested.

use serde::{Deserialize, Serialize};

use super::transaction::Transaction;
use crate::crypto::hash::sha256_hex_multi;

// ---------------------------------------------------------------------------
// Block
// ---------------------------------------------------------------------------

/// A chain entry. Immutable once appended.
///
/// Deserialization is strict: every field must be present with the right
/// type and unknown fields are rejected, so a malformed payload never
/// reaches validation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Block {
    /// 1-based position in the chain.
    pub index: u64,
    /// `block_hash` of the block at `index - 1`.
    pub previous_hash: String,
    /// Creation time, unix seconds with a microsecond fraction.
    pub timestamp: String,
    /// Transactions included in this block, in submission order.
    pub transactions: Vec<Transaction>,
    /// Content hash of this block (or the genesis sentinel).
    pub block_hash: String,
}

impl Block {
    /// Assemble a block from its parts. Fields are stored verbatim.
    pub fn new(
        index: u64,
        previous_hash: impl Into<String>,
        timestamp: impl Into<String>,
        transactions: Vec<Transaction>,
        block_hash: impl Into<String>,
    ) -> Self {
        Block {
            index,
            previous_hash: previous_hash.into(),
            timestamp: timestamp.into(),
            transactions,
            block_hash: block_hash.into(),
        }
    }

    /// Return the number of transactions in this block.
    pub fn tx_count(&self) -> usize {
        self.transactions.len()
    }
}

// ---------------------------------------------------------------------------
// Hash Computation
// ---------------------------------------------------------------------------

/// Compute the content hash of `block` from its index, previous hash,
/// timestamp and transactions.
///
/// Deterministic for identical inputs. The transaction list is rendered as
/// compact JSON in list order, so reordering transactions changes the hash.
pub fn compute_block_hash(block: &Block) -> String {
    let index = block.index.to_string();
    let transactions = canonical_transactions(&block.transactions);

    sha256_hex_multi(&[
        index.as_bytes(),
        block.previous_hash.as_bytes(),
        block.timestamp.as_bytes(),
        transactions.as_bytes(),
    ])
}

/// Compact JSON of `transactions`, fields in declaration order.
fn canonical_transactions(transactions: &[Transaction]) -> String {
    // Cannot fail: string-keyed maps only, and non-finite floats render as `null`.
    serde_json::to_string(transactions).expect("transaction list serializes to JSON")
}

/// Current wall-clock time formatted as a block timestamp,
/// e.g. `"1700000000.123456"`.
pub fn current_timestamp() -> String {
    let now = chrono::Utc::now();
    format!("{}.{:06}", now.timestamp(), now.timestamp_subsec_micros())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BLOCK_HASH_HEX_LENGTH;
    use crate::crypto::hash::sha256_hex;

    fn make_test_tx(amount: f64) -> Transaction {
        Transaction::new("alice", "bob", amount).with_signature("sig")
    }

    fn make_block(transactions: Vec<Transaction>) -> Block {
        Block::new(2, "abc", "1700000000.000001", transactions, "")
    }

    #[test]
    fn new_stores_fields_verbatim() {
        let block = Block::new(7, "prev", "123.456", vec![make_test_tx(1.0)], "whatever");
        assert_eq!(block.index, 7);
        assert_eq!(block.previous_hash, "prev");
        assert_eq!(block.timestamp, "123.456");
        assert_eq!(block.tx_count(), 1);
        // No hash is derived on construction.
        assert_eq!(block.block_hash, "whatever");
    }

    #[test]
    fn hash_matches_manual_preimage() {
        let block = make_block(vec![]);
        let expected = sha256_hex(b"2abc1700000000.000001[]");
        assert_eq!(compute_block_hash(&block), expected);
    }

    #[test]
    fn hash_covers_irregular_transaction_payloads() {
        let tx = Transaction::new("alice", "bob", f64::NAN)
            .with_inputs(vec![serde_json::json!({ "nested": { "deep": [1, null, "x"] } })]);
        let block = make_block(vec![tx]);

        assert_eq!(
            canonical_transactions(&block.transactions),
            r#"[{"sender":"alice","receiver":"bob","amount":null,"input_utxos":[{"nested":{"deep":[1,null,"x"]}}],"output_utxos":[],"signature":""}]"#
        );
        // An empty transaction rendering would collapse the preimage to the header fields.
        assert_ne!(compute_block_hash(&block), sha256_hex(b"2abc1700000000.000001"));
    }

    #[test]
    fn hash_is_lowercase_hex_digest() {
        let hash = compute_block_hash(&make_block(vec![make_test_tx(1.0)]));
        assert_eq!(hash.len(), BLOCK_HASH_HEX_LENGTH);
        assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn hash_is_deterministic() {
        let a = make_block(vec![make_test_tx(1.0), make_test_tx(2.0)]);
        let b = a.clone();
        assert_eq!(compute_block_hash(&a), compute_block_hash(&b));
    }

    #[test]
    fn hash_ignores_stored_block_hash() {
        let a = make_block(vec![]);
        let mut b = a.clone();
        b.block_hash = "something else".into();
        assert_eq!(compute_block_hash(&a), compute_block_hash(&b));
    }

    #[test]
    fn hash_changes_with_each_field() {
        let base = make_block(vec![make_test_tx(1.0)]);
        let base_hash = compute_block_hash(&base);

        let mut other = base.clone();
        other.index += 1;
        assert_ne!(compute_block_hash(&other), base_hash);

        let mut other = base.clone();
        other.previous_hash.push('0');
        assert_ne!(compute_block_hash(&other), base_hash);

        let mut other = base.clone();
        other.timestamp = "1700000000.000002".into();
        assert_ne!(compute_block_hash(&other), base_hash);

        let mut other = base.clone();
        other.transactions[0].amount = 1.5;
        assert_ne!(compute_block_hash(&other), base_hash);
    }

    #[test]
    fn hash_is_order_sensitive() {
        let tx1 = make_test_tx(1.0);
        let tx2 = make_test_tx(2.0);
        let forward = make_block(vec![tx1.clone(), tx2.clone()]);
        let reversed = make_block(vec![tx2, tx1]);
        assert_ne!(compute_block_hash(&forward), compute_block_hash(&reversed));
    }

    #[test]
    fn timestamp_has_microsecond_fraction() {
        let ts = current_timestamp();
        let (secs, micros) = ts.split_once('.').expect("fractional timestamp");
        assert!(secs.parse::<i64>().is_ok());
        assert_eq!(micros.len(), 6);
    }

    #[test]
    fn deserialize_rejects_missing_block_hash() {
        let raw = serde_json::json!({
            "index": 2,
            "previous_hash": "abc",
            "timestamp": "1.0",
            "transactions": []
        });
        assert!(serde_json::from_value::<Block>(raw).is_err());
    }

    #[test]
    fn deserialize_rejects_negative_index() {
        let raw = serde_json::json!({
            "index": -1,
            "previous_hash": "abc",
            "timestamp": "1.0",
            "transactions": [],
            "block_hash": "x"
        });
        assert!(serde_json::from_value::<Block>(raw).is_err());
    }
}
