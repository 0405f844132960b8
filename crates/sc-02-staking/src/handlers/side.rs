//! Side handler
//!
//! Maps a message to a vote without touching persisted state:
//!
//! 1. no message: `Skip` / unknown request
//! 2. no confirmed receipt (absent, too shallow, node down, timed out):
//!    `Skip` / wait for confirmation
//! 3. expected event not decodable at the claimed log index:
//!    `Skip` / decode failed
//! 4. any claim check fails ([`crate::validation`]): `Skip` / invalid message
//! 5. otherwise `Yes`
//!
//! The result depends only on the message, the confirmed external state and
//! the ledger snapshot, so honest nodes agree and re-running is harmless.

use crate::domain::{ChainParams, DiagnosticCode, LedgerState, StakingMsg, Vote};
use crate::metrics;
use crate::validation;
use sc_01_chain_caller::{ContractCaller, Receipt};
use serde::{Deserialize, Serialize};
use shared_types::{to_hex, Hash};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// A node's vote plus the reason for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideTxResult {
    pub vote: Vote,
    pub code: DiagnosticCode,
}

impl SideTxResult {
    pub fn yes() -> Self {
        Self {
            vote: Vote::Yes,
            code: DiagnosticCode::Ok,
        }
    }

    pub fn skip(code: DiagnosticCode) -> Self {
        Self {
            vote: Vote::Skip,
            code,
        }
    }

    pub fn is_yes(&self) -> bool {
        self.vote == Vote::Yes
    }
}

/// Verifies staking claims against the external chain.
pub struct SideHandler {
    caller: Arc<dyn ContractCaller>,
    params: ChainParams,
    /// Bound on the receipt query.
    timeout: Duration,
}

impl SideHandler {
    pub fn new(caller: Arc<dyn ContractCaller>, params: ChainParams, timeout: Duration) -> Self {
        Self {
            caller,
            params,
            timeout,
        }
    }

    pub fn params(&self) -> &ChainParams {
        &self.params
    }

    /// Vote on `msg` against `ledger`.
    pub async fn handle(&self, ledger: &LedgerState, msg: Option<&StakingMsg>) -> SideTxResult {
        let Some(msg) = msg else {
            warn!("[sc-02] side handler invoked without a staking message");
            metrics::record_side_vote("unknown", Vote::Skip.as_str());
            return SideTxResult::skip(DiagnosticCode::UnknownRequest);
        };

        let started = Instant::now();
        let result = self.verify(ledger, msg).await;
        metrics::record_side_latency(started.elapsed().as_secs_f64());
        metrics::record_side_vote(msg.kind().as_str(), result.vote.as_str());

        debug!(
            kind = %msg.kind(),
            validator_id = %msg.validator_id(),
            nonce = msg.nonce(),
            tx_hash = %to_hex(&msg.header().tx_hash),
            vote = %result.vote,
            code = %result.code,
            "[sc-02] side-tx vote"
        );
        result
    }

    async fn fetch_receipt(&self, tx_hash: Hash) -> Option<Receipt> {
        let query = self
            .caller
            .get_confirmed_tx_receipt(tx_hash, self.params.mainchain_tx_confirmations);
        match tokio::time::timeout(self.timeout, query).await {
            Ok(receipt) => receipt,
            Err(_) => {
                warn!(
                    tx_hash = %to_hex(&tx_hash),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "[sc-02] receipt query timed out"
                );
                None
            }
        }
    }

    async fn verify(&self, ledger: &LedgerState, msg: &StakingMsg) -> SideTxResult {
        let header = msg.header();
        let Some(receipt) = self.fetch_receipt(header.tx_hash).await else {
            return SideTxResult::skip(DiagnosticCode::WaitForConfirmation);
        };

        let contract = &self.params.staking_info_address;
        let log_index = header.log_index;
        let caller = &self.caller;

        // Decode the kind's event, then run the kind-specific checks
        let checked = match msg {
            StakingMsg::ValidatorJoin(m) => caller
                .decode_validator_join_event(contract, &receipt, log_index)
                .map(|e| validation::validate_join(ledger, m, &e).map(|()| e.nonce)),
            StakingMsg::SignerUpdate(m) => caller
                .decode_signer_update_event(contract, &receipt, log_index)
                .map(|e| validation::validate_signer_update(ledger, m, &e).map(|()| e.nonce)),
            StakingMsg::StakeUpdate(m) => caller
                .decode_stake_update_event(contract, &receipt, log_index)
                .map(|e| validation::validate_stake_update(ledger, m, &e).map(|()| e.nonce)),
            StakingMsg::ValidatorExit(m) => caller
                .decode_validator_exit_event(contract, &receipt, log_index)
                .map(|e| validation::validate_exit(ledger, m, &e).map(|()| e.nonce)),
        };

        let Some(checked) = checked else {
            debug!(
                kind = %msg.kind(),
                tx_hash = %to_hex(&header.tx_hash),
                log_index,
                "[sc-02] event not found in receipt"
            );
            return SideTxResult::skip(DiagnosticCode::DecodeEventFailed);
        };

        match checked.and_then(|event_nonce| {
            validation::validate_position(ledger, msg, receipt.block_number, event_nonce)
        }) {
            Ok(()) => SideTxResult::yes(),
            Err(e) => {
                info!(
                    kind = %msg.kind(),
                    validator_id = %msg.validator_id(),
                    error = %e,
                    "[sc-02] rejecting side-tx claim"
                );
                SideTxResult::skip(DiagnosticCode::InvalidMsg)
            }
        }
    }
}
