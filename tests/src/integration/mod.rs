//! Integration tests across the chain caller and the staking ledger.


pub mod consensus;
pub mod properties;
pub mod scenarios;
