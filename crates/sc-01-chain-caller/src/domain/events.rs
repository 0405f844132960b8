//! # Staking-Info Events
//!
//! The four events the external staking-info contract emits for validator
//! lifecycle changes. Field layout follows the contract ABI:
//!
//! | Event | Indexed (topics) | Data |
//! |-------|------------------|------|
//! | `Staked` | signer, validatorId, activationEpoch | nonce, amount, total, signerPubkey |
//! | `SignerChange` | validatorId, oldSigner, newSigner | nonce, signerPubkey |
//! | `StakeUpdate` | validatorId, nonce, newAmount | - |
//! | `UnstakeInit` | user, validatorId, amount | nonce, deactivationEpoch |
//!
//! Decoded events are used for comparison only and are never persisted.

use crate::domain::abi::{
    address_word, bytes_tail, dynamic_bytes, expect_topics, to_address, to_u256, to_u64,
    u256_word, u64_word, word, WORD,
};
use crate::domain::Log;
use serde::{Deserialize, Serialize};
use shared_types::{keccak256, Address, Hash, U256};

/// An event emitted by the staking-info contract.
pub trait StakingInfoEvent: Sized {
    /// Canonical Solidity signature, e.g. `StakeUpdate(uint256,uint256,uint256)`.
    const SIGNATURE: &'static str;

    /// `topics[0]` of a matching log.
    fn topic() -> Hash {
        keccak256(Self::SIGNATURE.as_bytes())
    }

    /// Decode a log already known to carry this event's topic.
    fn from_log(log: &Log) -> Option<Self>;

    /// Encode as a log emitted by `contract`.
    fn to_log(&self, contract: Address, log_index: u64) -> Log;
}

/// `Staked`: a new validator joined.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakedEvent {
    pub signer: Address,
    pub validator_id: u64,
    pub nonce: u64,
    pub activation_epoch: u64,
    pub amount: U256,
    pub total: U256,
    /// Signer key without its SEC1 prefix byte (64 bytes).
    pub signer_pubkey: Vec<u8>,
}

impl StakingInfoEvent for StakedEvent {
    const SIGNATURE: &'static str =
        "Staked(address,uint256,uint256,uint256,uint256,uint256,bytes)";

    fn from_log(log: &Log) -> Option<Self> {
        let topics = expect_topics(log, 4)?;
        Some(Self {
            signer: to_address(&topics[1])?,
            validator_id: to_u64(&topics[2])?,
            activation_epoch: to_u64(&topics[3])?,
            nonce: to_u64(word(&log.data, 0)?)?,
            amount: to_u256(word(&log.data, 1)?),
            total: to_u256(word(&log.data, 2)?),
            signer_pubkey: dynamic_bytes(&log.data, 3)?,
        })
    }

    fn to_log(&self, contract: Address, log_index: u64) -> Log {
        let mut data = Vec::new();
        data.extend_from_slice(&u64_word(self.nonce));
        data.extend_from_slice(&u256_word(self.amount));
        data.extend_from_slice(&u256_word(self.total));
        data.extend_from_slice(&u64_word((4 * WORD) as u64));
        data.extend(bytes_tail(&self.signer_pubkey));
        Log {
            address: contract,
            topics: vec![
                Self::topic(),
                address_word(&self.signer),
                u64_word(self.validator_id),
                u64_word(self.activation_epoch),
            ],
            data,
            log_index,
        }
    }
}

/// `SignerChange`: a validator rotated its signing key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignerChangeEvent {
    pub validator_id: u64,
    pub nonce: u64,
    pub old_signer: Address,
    pub new_signer: Address,
    /// New signer key without its SEC1 prefix byte.
    pub signer_pubkey: Vec<u8>,
}

impl StakingInfoEvent for SignerChangeEvent {
    const SIGNATURE: &'static str = "SignerChange(uint256,uint256,address,address,bytes)";

    fn from_log(log: &Log) -> Option<Self> {
        let topics = expect_topics(log, 4)?;
        Some(Self {
            validator_id: to_u64(&topics[1])?,
            old_signer: to_address(&topics[2])?,
            new_signer: to_address(&topics[3])?,
            nonce: to_u64(word(&log.data, 0)?)?,
            signer_pubkey: dynamic_bytes(&log.data, 1)?,
        })
    }

    fn to_log(&self, contract: Address, log_index: u64) -> Log {
        let mut data = Vec::new();
        data.extend_from_slice(&u64_word(self.nonce));
        data.extend_from_slice(&u64_word((2 * WORD) as u64));
        data.extend(bytes_tail(&self.signer_pubkey));
        Log {
            address: contract,
            topics: vec![
                Self::topic(),
                u64_word(self.validator_id),
                address_word(&self.old_signer),
                address_word(&self.new_signer),
            ],
            data,
            log_index,
        }
    }
}

/// `StakeUpdate`: a validator's total stake changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakeUpdateEvent {
    pub validator_id: u64,
    pub nonce: u64,
    pub new_amount: U256,
}

impl StakingInfoEvent for StakeUpdateEvent {
    const SIGNATURE: &'static str = "StakeUpdate(uint256,uint256,uint256)";

    fn from_log(log: &Log) -> Option<Self> {
        let topics = expect_topics(log, 4)?;
        if !log.data.is_empty() {
            return None;
        }
        Some(Self {
            validator_id: to_u64(&topics[1])?,
            nonce: to_u64(&topics[2])?,
            new_amount: to_u256(&topics[3]),
        })
    }

    fn to_log(&self, contract: Address, log_index: u64) -> Log {
        Log {
            address: contract,
            topics: vec![
                Self::topic(),
                u64_word(self.validator_id),
                u64_word(self.nonce),
                u256_word(self.new_amount),
            ],
            data: Vec::new(),
            log_index,
        }
    }
}

/// `UnstakeInit`: a validator started unbonding.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnstakeInitEvent {
    pub user: Address,
    pub validator_id: u64,
    pub nonce: u64,
    pub deactivation_epoch: u64,
    pub amount: U256,
}

impl StakingInfoEvent for UnstakeInitEvent {
    const SIGNATURE: &'static str = "UnstakeInit(address,uint256,uint256,uint256,uint256)";

    fn from_log(log: &Log) -> Option<Self> {
        let topics = expect_topics(log, 4)?;
        if log.data.len() != 2 * WORD {
            return None;
        }
        Some(Self {
            user: to_address(&topics[1])?,
            validator_id: to_u64(&topics[2])?,
            amount: to_u256(&topics[3]),
            nonce: to_u64(word(&log.data, 0)?)?,
            deactivation_epoch: to_u64(word(&log.data, 1)?)?,
        })
    }

    fn to_log(&self, contract: Address, log_index: u64) -> Log {
        let mut data = Vec::with_capacity(2 * WORD);
        data.extend_from_slice(&u64_word(self.nonce));
        data.extend_from_slice(&u64_word(self.deactivation_epoch));
        Log {
            address: contract,
            topics: vec![
                Self::topic(),
                address_word(&self.user),
                u64_word(self.validator_id),
                u256_word(self.amount),
            ],
            data,
            log_index,
        }
    }
}
