//! Events published and consumed by the staking subsystem

pub mod consumed;
pub mod published;

pub use consumed::CheckpointAckEvent;
pub use published::StakingEvent;
