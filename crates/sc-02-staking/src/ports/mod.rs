//! Ports layer for the staking subsystem

pub mod inbound;
pub mod outbound;

pub use inbound::{LedgerReader, SideTxApi};
pub use outbound::StakingEventPublisher;
pub use sc_01_chain_caller::ContractCaller;
