//! Nonce sequencer
//!
//! Per-validator nonces start at 1 and advance by exactly 1 per committed
//! external event. The rule is checked in two places:
//!
//! - the side handler compares the claimed nonce with the decoded event and
//!   drops claims the ledger has already passed ([`check_claim`],
//!   [`check_not_stale`]);
//! - the post handler requires the exact successor of the ledger watermark
//!   before mutating ([`check_next`]).
//!
//! Independently of nonces, each external log is identified by its event
//! sequence and may be committed once.

use super::{StakingError, StakingResult};

/// `block_number * 100_000 + log_index` of an external log.
pub type EventSequence = u128;

const SEQUENCE_BLOCK_FACTOR: u128 = 100_000;

/// Event sequence identifying one external log.
pub fn event_sequence(block_number: u64, log_index: u64) -> EventSequence {
    u128::from(block_number) * SEQUENCE_BLOCK_FACTOR + u128::from(log_index)
}

/// The claimed nonce must equal the nonce the external event carries.
pub fn check_claim(claimed: u64, event: u64) -> StakingResult<()> {
    if claimed != event {
        return Err(StakingError::NonceMismatch { claimed, event });
    }
    Ok(())
}

/// Reject a claim whose nonce the ledger has already applied.
pub fn check_not_stale(watermark: u64, claimed: u64) -> StakingResult<()> {
    if claimed <= watermark {
        return Err(StakingError::StaleNonce { claimed, watermark });
    }
    Ok(())
}

/// The claimed nonce must be the exact successor of `watermark`.
pub fn check_next(watermark: u64, claimed: u64) -> StakingResult<()> {
    check_not_stale(watermark, claimed)?;
    let expected = watermark.saturating_add(1);
    if claimed != expected {
        return Err(StakingError::UnexpectedNonce { claimed, expected });
    }
    Ok(())
}
