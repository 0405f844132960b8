//! Transaction receipts as seen on the external chain.

use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use shared_types::{Address, Hash, PrefixedHex};

/// One event log emitted by a transaction.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Log {
    /// Emitting contract.
    #[serde_as(as = "PrefixedHex")]
    pub address: Address,
    /// `topics[0]` is the event signature hash; indexed arguments follow.
    #[serde_as(as = "Vec<PrefixedHex>")]
    pub topics: Vec<Hash>,
    /// ABI-encoded non-indexed arguments.
    #[serde_as(as = "PrefixedHex")]
    pub data: Vec<u8>,
    /// Position of the log within its block.
    pub log_index: u64,
}

/// A mined transaction receipt.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    #[serde_as(as = "PrefixedHex")]
    pub tx_hash: Hash,
    pub block_number: u64,
    /// `true` when the transaction executed successfully.
    pub status: bool,
    pub logs: Vec<Log>,
}

impl Receipt {
    /// Create an empty successful receipt.
    pub fn new(tx_hash: Hash, block_number: u64) -> Self {
        Self {
            tx_hash,
            block_number,
            status: true,
            logs: Vec::new(),
        }
    }

    /// Find the log carrying the given block-level log index.
    pub fn log_at(&self, log_index: u64) -> Option<&Log> {
        self.logs.iter().find(|log| log.log_index == log_index)
    }
}
