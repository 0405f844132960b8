//! Side-tx Service - consensus engine facade
//!
//! Wires the side handler, post handler and ledger together behind
//! [`SideTxApi`].
//!
//! # Flow per block
//! 1. `vote_block`: every message is verified concurrently against one
//!    snapshot of the last committed ledger.
//! 2. The engine aggregates votes across nodes.
//! 3. `commit_block`: decisions are applied in canonical block order; the
//!    resulting events are published after the ledger commits.
//!
//! An abandoned round never reaches step 3, and its messages are verified
//! from scratch when re-proposed.

use crate::config::StakingConfig;
use crate::domain::{LedgerSnapshot, StakingMsg, StakingResult, Vote};
use crate::events::{CheckpointAckEvent, StakingEvent};
use crate::handlers::{PostHandler, PostTxResult, SideHandler, SideTxResult};
use crate::ports::{ContractCaller, SideTxApi, StakingEventPublisher};
use crate::state::StakingLedger;
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};


/// Side-tx Service
pub struct SideTxService<P: StakingEventPublisher> {
    ledger: Arc<StakingLedger>,
    side: SideHandler,
    publisher: Arc<P>,
}

/// Dependencies for SideTxService
pub struct StakingDependencies<P> {
    pub caller: Arc<dyn ContractCaller>,
    pub publisher: Arc<P>,
    pub ledger: Arc<StakingLedger>,
    pub config: StakingConfig,
}

impl<P: StakingEventPublisher> SideTxService<P> {
    /// Create a new SideTxService
    pub fn new(deps: StakingDependencies<P>) -> StakingResult<Self> {
        deps.config.validate()?;
        let side = SideHandler::new(
            deps.caller,
            deps.config.chain_params.clone(),
            deps.config.side_tx_timeout(),
        );
        Ok(Self {
            ledger: deps.ledger,
            side,
            publisher: deps.publisher,
        })
    }

    pub fn ledger(&self) -> &Arc<StakingLedger> {
        &self.ledger
    }

    /// Vote on `msg` against an explicit snapshot.
    pub async fn vote_at(&self, snapshot: &LedgerSnapshot, msg: Option<&StakingMsg>) -> SideTxResult {
        self.side.handle(snapshot, msg).await
    }

    /// Checkpoint ack from the checkpoint collaborator.
    pub fn on_checkpoint_ack(&self, event: CheckpointAckEvent) {
        if self.ledger.advance_epoch(event.ack_count) {
            info!(epoch = event.ack_count, "[sc-02] epoch advanced");
        }
    }
}

#[async_trait]
impl<P: StakingEventPublisher> SideTxApi for SideTxService<P> {
    async fn vote(&self, msg: Option<&StakingMsg>) -> SideTxResult {
        let snapshot = self.ledger.snapshot();
        self.side.handle(&snapshot, msg).await
    }

    async fn vote_block(&self, msgs: &[StakingMsg]) -> Vec<SideTxResult> {
        let snapshot = self.ledger.snapshot();
        join_all(msgs.iter().map(|msg| self.side.handle(&snapshot, Some(msg)))).await
    }

    async fn commit_block(&self, decisions: &[(StakingMsg, Vote)]) -> Vec<PostTxResult> {
        let results: Vec<PostTxResult> = self.ledger.commit(|state| {
            decisions
                .iter()
                .map(|(msg, vote)| PostHandler::handle(state, Some(msg), *vote))
                .collect()
        });

        let events: Vec<StakingEvent> = results.iter().filter_map(|r| r.event.clone()).collect();
        if !events.is_empty() {
            let count = events.len();
            if let Err(e) = self.publisher.publish(events).await {
                warn!(count, error = %e, "[sc-02] failed to publish staking events");
            }
        }
        results
    }

    fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }
}
