use crate::domain::{LedgerSnapshot, LedgerState, Validator, ValidatorId};
use crate::ports::LedgerReader;
use parking_lot::RwLock;
use shared_types::Address;
use std::sync::Arc;
use tracing::{debug, warn};

/// Owner of the committed ledger.
///
/// Voting reads [`snapshot`](Self::snapshot)s; only [`commit`](Self::commit)
/// writes. A commit mutates a private copy when snapshots are outstanding,
/// so a snapshot never observes a later block.
pub struct StakingLedger {
    current: RwLock<Arc<LedgerState>>,
}

impl StakingLedger {
    pub fn new(genesis: LedgerState) -> Self {
        Self {
            current: RwLock::new(Arc::new(genesis)),
        }
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::new(self.current.read().clone())
    }

    /// Apply one block's mutations and bump the ledger version.
    pub fn commit<T>(&self, apply: impl FnOnce(&mut LedgerState) -> T) -> T {
        let mut current = self.current.write();
        let state = Arc::make_mut(&mut *current);
        let out = apply(state);
        state.bump_version();
        debug!(version = state.version(), "[sc-02] ledger committed");
        out
    }

    /// Advance the epoch on a checkpoint ack. Epochs never move backwards.
    pub fn advance_epoch(&self, epoch: u64) -> bool {
        let current = self.current.read().epoch();
        if epoch <= current {
            warn!(epoch, current, "[sc-02] ignoring non-increasing epoch");
            return false;
        }
        self.commit(|state| {
            if epoch > state.epoch() {
                state.set_epoch(epoch);
            }
        });
        true
    }

    pub fn version(&self) -> u64 {
        self.current.read().version()
    }
}

impl Default for StakingLedger {
    fn default() -> Self {
        Self::new(LedgerState::new())
    }
}

impl LedgerReader for StakingLedger {
    fn get_validator(&self, id: ValidatorId) -> Option<Validator> {
        self.current.read().get_validator(id).cloned()
    }

    fn get_validator_by_signer(&self, signer: &Address) -> Option<Validator> {
        self.current.read().get_validator_by_signer(signer).cloned()
    }

    fn current_validator_set(&self) -> Vec<Validator> {
        self.current
            .read()
            .current_validator_set()
            .into_iter()
            .cloned()
            .collect()
    }

    fn current_epoch(&self) -> u64 {
        self.current.read().epoch()
    }
}
