//! # Adapters
//!
//! - [`RpcContractCaller`]: Ethereum JSON-RPC over HTTP
//! - [`MockContractCaller`]: in-memory receipts for deterministic tests

pub mod mock;
pub mod rpc;

pub use mock::MockContractCaller;
pub use rpc::RpcContractCaller;
