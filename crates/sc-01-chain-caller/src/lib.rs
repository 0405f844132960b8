//! # SC-01 Chain Caller
//!
//! External-Event Verifier for the sidechain staking core.
//!
//! **Subsystem ID:** 1
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! Side handlers never trust a proposer's claim about the external chain.
//! This crate answers the two questions they ask instead:
//!
//! 1. Is there a receipt for this transaction that is at least `N` blocks
//!    deep? ([`ContractCaller::get_confirmed_tx_receipt`])
//! 2. Does the log at this index decode as the expected staking-info event,
//!    emitted by the expected contract? (`decode_*_event`)
//!
//! Both answers are soft: anything short of a confirmed, well-formed result
//! is `None`, and the caller votes to skip rather than fail.
//!
//! ## Module Structure
//!
//! ```text
//! sc-01-chain-caller/
//! ├── domain/          # Receipt, Log, staking-info events, ABI codec, errors
//! ├── ports/           # ContractCaller (outbound)
//! ├── adapters/        # RpcContractCaller (JSON-RPC), MockContractCaller
//! └── config.rs        # RpcConfig
//! ```

#![warn(clippy::all)]

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{MockContractCaller, RpcContractCaller};
pub use config::RpcConfig;
pub use domain::{
    decode_event, CallerError, Log, Receipt, SignerChangeEvent, StakeUpdateEvent, StakedEvent,
    StakingInfoEvent, UnstakeInitEvent,
};
pub use ports::ContractCaller;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
