//! # Shared Types Crate
//!
//! Primitive types used by every subsystem of the sidechain staking core.
//!
//! ## Contents
//!
//! - **Entities**: `Hash`, `Address`, `U256` and Keccak-256 hashing.
//! - **Public keys**: `PubKey`, the raw uncompressed secp256k1 signer key and
//!   its Ethereum-style address derivation.
//! - **Encoding**: `0x`-prefixed hex helpers and the `PrefixedHex` serde
//!   adapter used for every byte field that crosses the JSON boundary.

pub mod encoding;
pub mod entities;
pub mod errors;
pub mod pubkey;

pub use encoding::{decode_hex, parse_address, parse_hash, to_hex, PrefixedHex};
pub use entities::*;
pub use errors::*;
pub use pubkey::PubKey;
