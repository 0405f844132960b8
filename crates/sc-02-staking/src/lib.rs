//! # sc-02-staking
//!
//! Validator/staking ledger and the side-transaction handlers that mutate it.
//!
//! ## Architecture
//!
//! A staking message is a proposer's claim about an event on the external
//! staking contract. Each message goes through two phases:
//!
//! ```text
//!   pre-commit                         commit
//!   ──────────                         ──────
//!   SideHandler ──(Vote, code)──→ [engine aggregates] ──Vote──→ PostHandler
//!       │                                                          │
//!       ├─ ContractCaller (receipt, event)                         ├─ nonce successor
//!       └─ LedgerSnapshot (read-only)                              └─ LedgerState (mutate)
//! ```
//!
//! The side handler is pure: the same message against the same confirmed
//! external state and snapshot always yields the same vote. The post handler
//! runs in canonical block order and is the only writer of the ledger.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sc_02_staking::{SideTxService, StakingDependencies, StakingConfig};
//! use sc_02_staking::ports::SideTxApi;
//!
//! let service = SideTxService::new(StakingDependencies {
//!     caller,
//!     publisher,
//!     ledger,
//!     config: StakingConfig::from_env()?,
//! })?;
//!
//! let votes = service.vote_block(&msgs).await;
//! // ... engine aggregates votes across nodes ...
//! let results = service.commit_block(&decisions).await;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod events;
pub mod handlers;
pub mod metrics;
pub mod ports;
pub mod service;
pub mod state;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::InMemoryEventBus;
pub use config::StakingConfig;
pub use domain::{
    ChainParams, DiagnosticCode, LedgerSnapshot, LedgerState, MsgHeader, MsgKind,
    SignerUpdateMsg, StakeUpdateMsg, StakingError, StakingMsg, StakingResult, Validator,
    ValidatorExitMsg, ValidatorId, ValidatorJoinMsg, Vote,
};
pub use events::{CheckpointAckEvent, StakingEvent};
pub use handlers::{PostHandler, PostTxResult, SideHandler, SideTxResult};
pub use ports::{LedgerReader, SideTxApi, StakingEventPublisher};
pub use service::{SideTxService, StakingDependencies};
pub use state::StakingLedger;
