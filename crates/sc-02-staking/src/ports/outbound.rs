//! Driven ports (Outbound dependencies)
//!
//! The external-chain reader is [`ContractCaller`](sc_01_chain_caller::ContractCaller),
//! re-exported from the ports module.

use crate::events::StakingEvent;
use async_trait::async_trait;

/// Sink for committed-mutation events.
#[async_trait]
pub trait StakingEventPublisher: Send + Sync {
    /// Publish the events of one committed block, in commit order.
    async fn publish(&self, events: Vec<StakingEvent>) -> Result<(), String>;
}
