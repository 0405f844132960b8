//! # Domain Layer
//!
//! Receipts, logs and the staking-info events decoded from them.

pub mod abi;
pub mod errors;
pub mod events;
pub mod receipt;

pub use abi::decode_event;
pub use errors::CallerError;
pub use events::{
    SignerChangeEvent, StakeUpdateEvent, StakedEvent, StakingInfoEvent, UnstakeInitEvent,
};
pub use receipt::{Log, Receipt};
