//! Validator/staking ledger state
//!
//! `LedgerState` is the replicated store of validators and their applied
//! nonces. It is mutated only by the post handler through
//! [`StakingLedger::commit`](crate::state::StakingLedger::commit); voting
//! reads an immutable [`LedgerSnapshot`].

use super::{EventSequence, StakingError, StakingResult, Validator, ValidatorId};
use shared_types::{to_hex, Address};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::ops::Deref;
use std::sync::Arc;

/// Validators, signer index, consumed event sequences and the current epoch.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LedgerState {
    /// Ordered by id for deterministic iteration.
    validators: BTreeMap<ValidatorId, Validator>,
    /// Signer address -> validator id. Bijective with the validators' signers.
    signers: HashMap<Address, ValidatorId>,
    /// External logs already committed.
    sequences: BTreeSet<EventSequence>,
    /// Current sidechain epoch (checkpoint ack count).
    epoch: u64,
    /// Incremented once per committed block.
    version: u64,
}

impl LedgerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Genesis ledger from a validator list.
    ///
    /// Rejects duplicate ids and signers, and signers that are not the
    /// address of the validator's public key.
    pub fn from_validators(
        epoch: u64,
        validators: impl IntoIterator<Item = Validator>,
    ) -> StakingResult<Self> {
        let mut state = Self {
            epoch,
            ..Self::default()
        };
        for validator in validators {
            if validator.pubkey.address()? != validator.signer {
                return Err(StakingError::SignerKeyMismatch(validator.id));
            }
            state.ensure_absent(validator.id)?;
            state.ensure_signer_free(&validator.signer, validator.id)?;
            state.insert_validator(validator);
        }
        Ok(state)
    }

    // === READ INTERFACE ===

    pub fn get_validator(&self, id: ValidatorId) -> Option<&Validator> {
        self.validators.get(&id)
    }

    pub fn get_validator_by_signer(&self, signer: &Address) -> Option<&Validator> {
        self.signers
            .get(signer)
            .and_then(|id| self.validators.get(id))
    }

    pub fn contains(&self, id: ValidatorId) -> bool {
        self.validators.contains_key(&id)
    }

    /// All validators, including exited ones, in id order.
    pub fn validators(&self) -> impl Iterator<Item = &Validator> {
        self.validators.values()
    }

    pub fn len(&self) -> usize {
        self.validators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.validators.is_empty()
    }

    /// Validators active in `epoch`, in id order.
    pub fn active_validators(&self, epoch: u64) -> Vec<&Validator> {
        self.validators
            .values()
            .filter(|v| v.is_active(epoch))
            .collect()
    }

    /// Validators active in the current epoch.
    pub fn current_validator_set(&self) -> Vec<&Validator> {
        self.active_validators(self.epoch)
    }

    /// Voting power of the current validator set.
    pub fn total_voting_power(&self) -> u64 {
        self.current_validator_set()
            .iter()
            .map(|v| v.voting_power)
            .fold(0u64, u64::saturating_add)
    }

    /// Last applied nonce for `id`; 0 for an unknown validator.
    pub fn watermark(&self, id: ValidatorId) -> u64 {
        self.validators.get(&id).map_or(0, |v| v.nonce)
    }

    pub fn has_sequence(&self, sequence: EventSequence) -> bool {
        self.sequences.contains(&sequence)
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // === CHECKS ===

    pub(crate) fn ensure_absent(&self, id: ValidatorId) -> StakingResult<()> {
        if self.contains(id) {
            return Err(StakingError::ValidatorExists(id));
        }
        Ok(())
    }

    pub(crate) fn ensure_present(&self, id: ValidatorId) -> StakingResult<&Validator> {
        self.get_validator(id)
            .ok_or(StakingError::ValidatorNotFound(id))
    }

    /// `signer` must be unused, or used by `owner` itself.
    pub(crate) fn ensure_signer_free(
        &self,
        signer: &Address,
        owner: ValidatorId,
    ) -> StakingResult<()> {
        match self.signers.get(signer) {
            Some(holder) if *holder != owner => Err(StakingError::SignerInUse {
                signer: to_hex(signer),
                holder: *holder,
            }),
            _ => Ok(()),
        }
    }

    // === MUTATIONS (post handler only) ===

    pub(crate) fn insert_validator(&mut self, validator: Validator) {
        self.signers.insert(validator.signer, validator.id);
        self.validators.insert(validator.id, validator);
    }

    pub(crate) fn validator_mut(&mut self, id: ValidatorId) -> StakingResult<&mut Validator> {
        self.validators
            .get_mut(&id)
            .ok_or(StakingError::ValidatorNotFound(id))
    }

    /// Move `id`'s signer index entry from its old signer to `new_signer`.
    pub(crate) fn reindex_signer(&mut self, id: ValidatorId, old_signer: &Address, new_signer: Address) {
        if self.signers.get(old_signer) == Some(&id) {
            self.signers.remove(old_signer);
        }
        self.signers.insert(new_signer, id);
    }

    /// Record an applied nonce and consume the event sequence.
    pub(crate) fn record_applied(
        &mut self,
        id: ValidatorId,
        nonce: u64,
        sequence: EventSequence,
    ) -> StakingResult<()> {
        let validator = self.validator_mut(id)?;
        validator.nonce = nonce;
        validator.last_updated = sequence;
        self.sequences.insert(sequence);
        Ok(())
    }

    pub(crate) fn set_epoch(&mut self, epoch: u64) {
        self.epoch = epoch;
    }

    pub(crate) fn bump_version(&mut self) {
        self.version += 1;
    }
}

/// Immutable view of the ledger as of a committed block.
///
/// Cheap to clone; later commits never change what a snapshot shows.
#[derive(Clone, Debug)]
pub struct LedgerSnapshot(Arc<LedgerState>);

impl LedgerSnapshot {
    pub fn new(state: Arc<LedgerState>) -> Self {
        Self(state)
    }
}

impl From<LedgerState> for LedgerSnapshot {
    fn from(state: LedgerState) -> Self {
        Self(Arc::new(state))
    }
}

impl Deref for LedgerSnapshot {
    type Target = LedgerState;

    fn deref(&self) -> &LedgerState {
        &self.0
    }
}
