//! Validator domain entities

use super::{EventSequence, StakingError, StakingResult};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use shared_types::{Address, PrefixedHex, PubKey, U256};
use std::fmt;

/// Staking-contract validator identifier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ValidatorId(pub u64);

impl ValidatorId {
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ValidatorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ValidatorId {
    fn from(id: u64) -> Self {
        ValidatorId(id)
    }
}

/// Staking token decimals; one whole token is one unit of voting power.
pub const TOKEN_DECIMALS: usize = 18;

/// Voting power of a stake: whole tokens, which must fit in `u64`.
pub fn voting_power(stake: U256) -> StakingResult<u64> {
    let power = stake / U256::exp10(TOKEN_DECIMALS);
    if power > U256::from(u64::MAX) {
        return Err(StakingError::PowerOverflow(stake));
    }
    Ok(power.as_u64())
}

/// A validator in the staking ledger.
///
/// Never removed: an exited validator keeps its entry with `end_epoch` set.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Validator {
    pub id: ValidatorId,
    #[serde_as(as = "PrefixedHex")]
    pub signer: Address,
    pub pubkey: PubKey,
    pub voting_power: u64,
    pub stake: U256,
    pub start_epoch: u64,
    /// Deactivation epoch; 0 while the validator has not exited.
    pub end_epoch: u64,
    /// Last applied nonce.
    pub nonce: u64,
    /// Event sequence of the last committed mutation.
    pub last_updated: EventSequence,
}

impl Validator {
    /// Build a validator from a join, deriving signer and voting power.
    pub fn new(
        id: ValidatorId,
        pubkey: PubKey,
        stake: U256,
        start_epoch: u64,
    ) -> StakingResult<Self> {
        let signer = pubkey.address()?;
        Ok(Self {
            id,
            signer,
            pubkey,
            voting_power: voting_power(stake)?,
            stake,
            start_epoch,
            end_epoch: 0,
            nonce: 0,
            last_updated: 0,
        })
    }

    pub fn has_exited(&self) -> bool {
        self.end_epoch != 0
    }

    /// Active in `epoch`: started, not yet ended, and holding power.
    pub fn is_active(&self, epoch: u64) -> bool {
        self.start_epoch <= epoch
            && (self.end_epoch == 0 || self.end_epoch > epoch)
            && self.voting_power > 0
    }
}
