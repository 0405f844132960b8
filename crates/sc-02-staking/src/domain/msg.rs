//! Side-transaction messages
//!
//! A message is a proposer's claim that a staking-info event happened on the
//! external chain: "event E is at block B, log index L, in transaction T,
//! with nonce N". Messages are immutable once built and are checked field by
//! field against the decoded event before anyone votes for them.

use super::{event_sequence, EventSequence, ValidatorId};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use shared_types::{Hash, PrefixedHex, PubKey, U256};
use std::fmt;

/// Location and nonce of the claimed external event.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MsgHeader {
    #[serde_as(as = "PrefixedHex")]
    pub tx_hash: Hash,
    pub log_index: u64,
    pub block_number: u64,
    pub nonce: u64,
}

impl MsgHeader {
    pub fn new(tx_hash: Hash, log_index: u64, block_number: u64, nonce: u64) -> Self {
        Self {
            tx_hash,
            log_index,
            block_number,
            nonce,
        }
    }

    pub fn event_sequence(&self) -> EventSequence {
        event_sequence(self.block_number, self.log_index)
    }
}

/// Claim: a new validator staked.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorJoinMsg {
    pub id: ValidatorId,
    pub activation_epoch: u64,
    pub amount: U256,
    /// Full 65-byte uncompressed key.
    pub signer_pubkey: PubKey,
    pub header: MsgHeader,
}

/// Claim: a validator rotated its signer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerUpdateMsg {
    pub id: ValidatorId,
    pub new_signer_pubkey: PubKey,
    pub header: MsgHeader,
}

/// Claim: a validator's stake changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeUpdateMsg {
    pub id: ValidatorId,
    pub new_amount: U256,
    pub header: MsgHeader,
}

/// Claim: a validator started unbonding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorExitMsg {
    pub id: ValidatorId,
    pub deactivation_epoch: u64,
    pub header: MsgHeader,
}

/// The closed set of staking side-tx messages.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StakingMsg {
    ValidatorJoin(ValidatorJoinMsg),
    SignerUpdate(SignerUpdateMsg),
    StakeUpdate(StakeUpdateMsg),
    ValidatorExit(ValidatorExitMsg),
}

/// Message kind, for logs and metric labels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MsgKind {
    ValidatorJoin,
    SignerUpdate,
    StakeUpdate,
    ValidatorExit,
}

impl MsgKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MsgKind::ValidatorJoin => "validator_join",
            MsgKind::SignerUpdate => "signer_update",
            MsgKind::StakeUpdate => "stake_update",
            MsgKind::ValidatorExit => "validator_exit",
        }
    }
}

impl fmt::Display for MsgKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl StakingMsg {
    pub fn kind(&self) -> MsgKind {
        match self {
            StakingMsg::ValidatorJoin(_) => MsgKind::ValidatorJoin,
            StakingMsg::SignerUpdate(_) => MsgKind::SignerUpdate,
            StakingMsg::StakeUpdate(_) => MsgKind::StakeUpdate,
            StakingMsg::ValidatorExit(_) => MsgKind::ValidatorExit,
        }
    }

    pub fn header(&self) -> &MsgHeader {
        match self {
            StakingMsg::ValidatorJoin(m) => &m.header,
            StakingMsg::SignerUpdate(m) => &m.header,
            StakingMsg::StakeUpdate(m) => &m.header,
            StakingMsg::ValidatorExit(m) => &m.header,
        }
    }

    pub fn validator_id(&self) -> ValidatorId {
        match self {
            StakingMsg::ValidatorJoin(m) => m.id,
            StakingMsg::SignerUpdate(m) => m.id,
            StakingMsg::StakeUpdate(m) => m.id,
            StakingMsg::ValidatorExit(m) => m.id,
        }
    }

    pub fn nonce(&self) -> u64 {
        self.header().nonce
    }
}

impl From<ValidatorJoinMsg> for StakingMsg {
    fn from(msg: ValidatorJoinMsg) -> Self {
        StakingMsg::ValidatorJoin(msg)
    }
}

impl From<SignerUpdateMsg> for StakingMsg {
    fn from(msg: SignerUpdateMsg) -> Self {
        StakingMsg::SignerUpdate(msg)
    }
}

impl From<StakeUpdateMsg> for StakingMsg {
    fn from(msg: StakeUpdateMsg) -> Self {
        StakingMsg::StakeUpdate(msg)
    }
}

impl From<ValidatorExitMsg> for StakingMsg {
    fn from(msg: ValidatorExitMsg) -> Self {
        StakingMsg::ValidatorExit(msg)
    }
}
