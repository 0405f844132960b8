//! Event Bus adapter
//!
//! In-memory `StakingEventPublisher`. Keeps each committed block's events
//! as one batch so tests can check both commit order and block boundaries.

use crate::domain::ValidatorId;
use crate::events::StakingEvent;
use crate::ports::StakingEventPublisher;
use async_trait::async_trait;
use parking_lot::RwLock;

/// In-memory event bus adapter
#[derive(Default)]
pub struct InMemoryEventBus {
    /// One entry per published block, in publish order.
    blocks: RwLock<Vec<Vec<StakingEvent>>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every event received, flattened in commit order.
    pub fn get_events(&self) -> Vec<StakingEvent> {
        self.blocks.read().iter().flatten().cloned().collect()
    }

    pub fn event_count(&self) -> usize {
        self.blocks.read().iter().map(Vec::len).sum()
    }

    /// Number of blocks that published at least one event.
    pub fn block_count(&self) -> usize {
        self.blocks.read().len()
    }

    /// History of one validator, oldest first.
    pub fn events_for(&self, id: ValidatorId) -> Vec<StakingEvent> {
        self.blocks
            .read()
            .iter()
            .flatten()
            .filter(|event| event.validator_id() == id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl StakingEventPublisher for InMemoryEventBus {
    async fn publish(&self, events: Vec<StakingEvent>) -> Result<(), String> {
        if !events.is_empty() {
            self.blocks.write().push(events);
        }
        Ok(())
    }
}
