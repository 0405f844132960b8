//! Domain layer for the staking subsystem
//!
//! Pure types and rules: validators, the ledger, side-tx messages, votes,
//! chain parameters and the nonce sequencer.

pub mod error;
pub mod ledger;
pub mod msg;
pub mod params;
pub mod sequencer;
pub mod validator;
pub mod vote;

pub use error::{StakingError, StakingResult};
pub use ledger::{LedgerSnapshot, LedgerState};
pub use msg::{
    MsgHeader, MsgKind, SignerUpdateMsg, StakeUpdateMsg, StakingMsg, ValidatorExitMsg,
    ValidatorJoinMsg,
};
pub use params::ChainParams;
pub use sequencer::{event_sequence, EventSequence};
pub use validator::{voting_power, Validator, ValidatorId};
pub use vote::{DiagnosticCode, Vote};
