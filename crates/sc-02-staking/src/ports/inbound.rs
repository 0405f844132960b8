//! Driving ports (Inbound API)

use crate::domain::{LedgerSnapshot, StakingMsg, Validator, ValidatorId, Vote};
use crate::handlers::{PostTxResult, SideTxResult};
use async_trait::async_trait;
use shared_types::Address;

/// Consensus engine boundary.
///
/// The engine collects each node's vote during pre-commit and hands back the
/// aggregated decision per message at commit. Aggregation is the engine's.
#[async_trait]
pub trait SideTxApi: Send + Sync {
    /// Vote on one message against the latest committed snapshot.
    async fn vote(&self, msg: Option<&StakingMsg>) -> SideTxResult;

    /// Vote on every message of a proposed block; results in input order.
    async fn vote_block(&self, msgs: &[StakingMsg]) -> Vec<SideTxResult>;

    /// Apply aggregated decisions in canonical block order.
    async fn commit_block(&self, decisions: &[(StakingMsg, Vote)]) -> Vec<PostTxResult>;

    /// Latest committed snapshot.
    fn snapshot(&self) -> LedgerSnapshot;
}

/// Read-only ledger access for query collaborators.
///
/// Reflects the last committed block.
pub trait LedgerReader: Send + Sync {
    fn get_validator(&self, id: ValidatorId) -> Option<Validator>;

    fn get_validator_by_signer(&self, signer: &Address) -> Option<Validator>;

    /// Validators active in the current epoch, in id order.
    fn current_validator_set(&self) -> Vec<Validator>;

    fn current_epoch(&self) -> u64;
}
