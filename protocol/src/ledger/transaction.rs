//! Transaction records carried by blocks.
//!
//! The ledger treats transactions as opaque payloads: nothing here checks
//! balances, UTXO consistency or signatures. The struct exists so that the
//! JSON shape is enforced at the boundary and so that the canonical
//! serialization used for hashing has a fixed field order.

use serde::{Deserialize, Serialize};

/// A value transfer queued for inclusion in a block.
///
/// Field order is significant: it is the order in which fields appear in
/// the canonical JSON that feeds the block content hash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Transaction {
    /// Identifier of the paying party.
    pub sender: String,
    /// Identifier of the receiving party.
    pub receiver: String,
    /// Transferred amount. Not range-checked.
    pub amount: f64,
    /// Outputs of earlier transactions consumed by this one, as opaque records.
    pub input_utxos: Vec<serde_json::Value>,
    /// Outputs created by this transaction, as opaque records.
    pub output_utxos: Vec<serde_json::Value>,
    /// Sender's signature. Carried verbatim, never verified.
    pub signature: String,
}

impl Transaction {
    /// Creates a transfer with no UTXO records and an empty signature.
    ///
    /// Chain [`with_inputs`](Self::with_inputs),
    /// [`with_outputs`](Self::with_outputs) and
    /// [`with_signature`](Self::with_signature) to fill in the rest.
    pub fn new(sender: impl Into<String>, receiver: impl Into<String>, amount: f64) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            amount,
            input_utxos: Vec::new(),
            output_utxos: Vec::new(),
            signature: String::new(),
        }
    }

    pub fn with_inputs(mut self, inputs: Vec<serde_json::Value>) -> Self {
        self.input_utxos = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<serde_json::Value>) -> Self {
        self.output_utxos = outputs;
        self
    }

    pub fn with_signature(mut self, signature: impl Into<String>) -> Self {
        self.signature = signature.into();
        self
    }
}
