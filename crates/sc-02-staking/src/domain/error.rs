//! Error types for the staking subsystem
//!
//! These never cross the handler boundary: the side handler folds them into
//! a vote, the post handler into a diagnostic code.

use super::{DiagnosticCode, EventSequence, ValidatorId};
use shared_types::{PubKeyError, U256};

/// Staking error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StakingError {
    #[error("Invalid signer public key: {0}")]
    InvalidPubKey(#[from] PubKeyError),

    #[error("Signer mismatch: claimed {claimed}, event {event}")]
    SignerMismatch { claimed: String, event: String },

    #[error("Signer public key does not match the event")]
    PubKeyMismatch,

    #[error("Validator {0} signer is not the address of its public key")]
    SignerKeyMismatch(ValidatorId),

    #[error("Validator id mismatch: claimed {claimed}, event {event}")]
    ValidatorIdMismatch { claimed: ValidatorId, event: u64 },

    #[error("Validator {0} already exists")]
    ValidatorExists(ValidatorId),

    #[error("Validator {0} not found")]
    ValidatorNotFound(ValidatorId),

    #[error("Signer {signer} already used by validator {holder}")]
    SignerInUse { signer: String, holder: ValidatorId },

    #[error("Old signer mismatch: ledger {ledger}, event {event}")]
    OldSignerMismatch { ledger: String, event: String },

    #[error("Field mismatch: {field}")]
    FieldMismatch { field: &'static str },

    #[error("Block number mismatch: claimed {claimed}, receipt {receipt}")]
    BlockMismatch { claimed: u64, receipt: u64 },

    #[error("Nonce mismatch: claimed {claimed}, event {event}")]
    NonceMismatch { claimed: u64, event: u64 },

    #[error("Stale nonce {claimed}: validator already at {watermark}")]
    StaleNonce { claimed: u64, watermark: u64 },

    #[error("Out-of-order nonce {claimed}: expected {expected}")]
    UnexpectedNonce { claimed: u64, expected: u64 },

    #[error("Validator {0} has already exited")]
    AlreadyExited(ValidatorId),

    #[error("Stake {0} overflows voting power")]
    PowerOverflow(U256),

    #[error("Event sequence {0} already processed")]
    ReplayedEvent(EventSequence),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl StakingError {
    /// Diagnostic code reported when this error rejects a commit.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            StakingError::ReplayedEvent(_) | StakingError::StaleNonce { .. } => {
                DiagnosticCode::OldTx
            }
            _ => DiagnosticCode::InvalidMsg,
        }
    }
}

/// Result type for staking operations
pub type StakingResult<T> = Result<T, StakingError>;
