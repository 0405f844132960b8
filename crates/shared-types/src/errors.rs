//! Error types for shared primitives.

use thiserror::Error;

/// Reasons a signer public key is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PubKeyError {
    #[error("Public key is empty")]
    Empty,

    #[error("Invalid public key length: expected 65 bytes, got {0}")]
    InvalidLength(usize),

    #[error("Invalid public key prefix: expected 0x04, got {0:#04x}")]
    InvalidPrefix(u8),

    #[error("Public key is not a point on secp256k1")]
    InvalidPoint,
}

/// Hex decoding failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HexError {
    #[error("Invalid hex string: {0}")]
    Invalid(String),

    #[error("Invalid length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
}
