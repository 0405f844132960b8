//! # Mock Contract Caller
//!
//! In-memory external chain for deterministic tests and replays. Receipts are
//! registered up front; events are encoded into real logs so decoding goes
//! through the same ABI path as production.

use crate::domain::{
    decode_event, Receipt, SignerChangeEvent, StakeUpdateEvent, StakedEvent, StakingInfoEvent,
    UnstakeInitEvent,
};
use crate::ports::ContractCaller;
use async_trait::async_trait;
use parking_lot::RwLock;
use shared_types::{Address, Hash};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

/// Mock external chain for testing.
#[derive(Default)]
pub struct MockContractCaller {
    receipts: RwLock<HashMap<Hash, Receipt>>,
    /// Known receipts that have not reached the required depth yet.
    unconfirmed: RwLock<HashSet<Hash>>,
    /// Simulated node latency.
    latency: RwLock<Option<Duration>>,
    /// Force every decode to fail.
    decode_broken: AtomicBool,
    receipt_calls: AtomicU64,
    last_required_confirmations: AtomicU64,
}

impl MockContractCaller {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a receipt.
    pub fn insert_receipt(&self, receipt: Receipt) {
        self.receipts.write().insert(receipt.tx_hash, receipt);
    }

    /// Append `event` as a log of `tx_hash`, creating the receipt at
    /// `block_number` if it does not exist yet.
    pub fn insert_event<E: StakingInfoEvent>(
        &self,
        tx_hash: Hash,
        block_number: u64,
        contract: Address,
        log_index: u64,
        event: &E,
    ) {
        let mut receipts = self.receipts.write();
        let receipt = receipts
            .entry(tx_hash)
            .or_insert_with(|| Receipt::new(tx_hash, block_number));
        receipt.logs.push(event.to_log(contract, log_index));
    }

    /// Hide a receipt until [`confirm`](Self::confirm) is called.
    pub fn set_unconfirmed(&self, tx_hash: Hash) {
        self.unconfirmed.write().insert(tx_hash);
    }

    pub fn confirm(&self, tx_hash: Hash) {
        self.unconfirmed.write().remove(&tx_hash);
    }

    pub fn set_latency(&self, latency: Option<Duration>) {
        *self.latency.write() = latency;
    }

    pub fn set_decode_broken(&self, broken: bool) {
        self.decode_broken.store(broken, Ordering::SeqCst);
    }

    /// Number of receipt queries served.
    pub fn receipt_calls(&self) -> u64 {
        self.receipt_calls.load(Ordering::SeqCst)
    }

    /// Confirmation depth requested by the most recent receipt query.
    pub fn last_required_confirmations(&self) -> u64 {
        self.last_required_confirmations.load(Ordering::SeqCst)
    }

    fn decoding(&self) -> bool {
        !self.decode_broken.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContractCaller for MockContractCaller {
    async fn get_confirmed_tx_receipt(
        &self,
        tx_hash: Hash,
        required_confirmations: u64,
    ) -> Option<Receipt> {
        self.receipt_calls.fetch_add(1, Ordering::SeqCst);
        self.last_required_confirmations
            .store(required_confirmations, Ordering::SeqCst);

        let latency = *self.latency.read();
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }

        if self.unconfirmed.read().contains(&tx_hash) {
            return None;
        }
        self.receipts.read().get(&tx_hash).cloned()
    }

    fn decode_validator_join_event(
        &self,
        contract: &Address,
        receipt: &Receipt,
        log_index: u64,
    ) -> Option<StakedEvent> {
        self.decoding()
            .then(|| decode_event(contract, receipt, log_index))
            .flatten()
    }

    fn decode_signer_update_event(
        &self,
        contract: &Address,
        receipt: &Receipt,
        log_index: u64,
    ) -> Option<SignerChangeEvent> {
        self.decoding()
            .then(|| decode_event(contract, receipt, log_index))
            .flatten()
    }

    fn decode_stake_update_event(
        &self,
        contract: &Address,
        receipt: &Receipt,
        log_index: u64,
    ) -> Option<StakeUpdateEvent> {
        self.decoding()
            .then(|| decode_event(contract, receipt, log_index))
            .flatten()
    }

    fn decode_validator_exit_event(
        &self,
        contract: &Address,
        receipt: &Receipt,
        log_index: u64,
    ) -> Option<UnstakeInitEvent> {
        self.decoding()
            .then(|| decode_event(contract, receipt, log_index))
            .flatten()
    }
}
