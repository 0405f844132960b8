//! # Ports Layer
//!
//! Outbound port for reading the external chain.

pub mod outbound;

pub use outbound::ContractCaller;
