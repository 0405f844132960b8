//! Published events (Outgoing)
//!
//! One event per committed ledger mutation, emitted after the block commits.

use crate::domain::ValidatorId;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use shared_types::{Address, PrefixedHex, U256};

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StakingEvent {
    ValidatorJoined {
        validator_id: ValidatorId,
        #[serde_as(as = "PrefixedHex")]
        signer: Address,
        voting_power: u64,
        start_epoch: u64,
        nonce: u64,
    },
    SignerChanged {
        validator_id: ValidatorId,
        #[serde_as(as = "PrefixedHex")]
        old_signer: Address,
        #[serde_as(as = "PrefixedHex")]
        new_signer: Address,
        nonce: u64,
    },
    StakeUpdated {
        validator_id: ValidatorId,
        stake: U256,
        old_power: u64,
        new_power: u64,
        nonce: u64,
    },
    ValidatorExited {
        validator_id: ValidatorId,
        end_epoch: u64,
        nonce: u64,
    },
}

impl StakingEvent {
    pub fn validator_id(&self) -> ValidatorId {
        match self {
            StakingEvent::ValidatorJoined { validator_id, .. }
            | StakingEvent::SignerChanged { validator_id, .. }
            | StakingEvent::StakeUpdated { validator_id, .. }
            | StakingEvent::ValidatorExited { validator_id, .. } => *validator_id,
        }
    }
}
