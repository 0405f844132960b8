//! Side-tx claim validation
//!
//! Stateless checks of a message against the decoded external event and a
//! ledger snapshot. The side handler runs them in a fixed order and stops at
//! the first failure:
//!
//! 1. signer key well-formed and matching the event
//! 2. validator id matches the event; existence as the kind requires
//! 3. kind-specific field equality
//! 4. claimed block number equals the receipt's
//! 5. claimed nonce equals the event's and is ahead of the ledger

use crate::domain::sequencer::{check_claim, check_not_stale};
use crate::domain::{
    voting_power, LedgerState, SignerUpdateMsg, StakeUpdateMsg, StakingError, StakingMsg,
    StakingResult, ValidatorExitMsg, ValidatorId, ValidatorJoinMsg,
};
use sc_01_chain_caller::{SignerChangeEvent, StakeUpdateEvent, StakedEvent, UnstakeInitEvent};
use shared_types::{to_hex, Address, PubKey};

/// Derive the claimed signer and match it against the event's signer and key.
pub fn check_signer(
    claimed: &PubKey,
    event_signer: &Address,
    event_pubkey: &[u8],
) -> StakingResult<Address> {
    let derived = claimed.address()?;
    if derived != *event_signer {
        return Err(StakingError::SignerMismatch {
            claimed: to_hex(&derived),
            event: to_hex(event_signer),
        });
    }
    if claimed.without_prefix() != event_pubkey {
        return Err(StakingError::PubKeyMismatch);
    }
    Ok(derived)
}

fn check_id(claimed: ValidatorId, event: u64) -> StakingResult<()> {
    if claimed.as_u64() != event {
        return Err(StakingError::ValidatorIdMismatch { claimed, event });
    }
    Ok(())
}

fn check_field<T: PartialEq>(field: &'static str, claimed: &T, event: &T) -> StakingResult<()> {
    if claimed != event {
        return Err(StakingError::FieldMismatch { field });
    }
    Ok(())
}

pub fn validate_join(
    ledger: &LedgerState,
    msg: &ValidatorJoinMsg,
    event: &StakedEvent,
) -> StakingResult<()> {
    let signer = check_signer(&msg.signer_pubkey, &event.signer, &event.signer_pubkey)?;

    check_id(msg.id, event.validator_id)?;
    ledger.ensure_absent(msg.id)?;
    ledger.ensure_signer_free(&signer, msg.id)?;

    check_field("activation_epoch", &msg.activation_epoch, &event.activation_epoch)?;
    check_field("amount", &msg.amount, &event.amount)?;
    voting_power(msg.amount)?;
    Ok(())
}

pub fn validate_signer_update(
    ledger: &LedgerState,
    msg: &SignerUpdateMsg,
    event: &SignerChangeEvent,
) -> StakingResult<()> {
    let new_signer = check_signer(
        &msg.new_signer_pubkey,
        &event.new_signer,
        &event.signer_pubkey,
    )?;

    check_id(msg.id, event.validator_id)?;
    let validator = ledger.ensure_present(msg.id)?;
    ledger.ensure_signer_free(&new_signer, msg.id)?;

    if validator.signer != event.old_signer {
        return Err(StakingError::OldSignerMismatch {
            ledger: to_hex(&validator.signer),
            event: to_hex(&event.old_signer),
        });
    }
    Ok(())
}

pub fn validate_stake_update(
    ledger: &LedgerState,
    msg: &StakeUpdateMsg,
    event: &StakeUpdateEvent,
) -> StakingResult<()> {
    check_id(msg.id, event.validator_id)?;
    ledger.ensure_present(msg.id)?;

    check_field("new_amount", &msg.new_amount, &event.new_amount)?;
    voting_power(msg.new_amount)?;
    Ok(())
}

pub fn validate_exit(
    ledger: &LedgerState,
    msg: &ValidatorExitMsg,
    event: &UnstakeInitEvent,
) -> StakingResult<()> {
    check_id(msg.id, event.validator_id)?;
    let validator = ledger.ensure_present(msg.id)?;

    check_field(
        "deactivation_epoch",
        &msg.deactivation_epoch,
        &event.deactivation_epoch,
    )?;
    if msg.deactivation_epoch == 0 {
        return Err(StakingError::FieldMismatch {
            field: "deactivation_epoch",
        });
    }
    if validator.has_exited() {
        return Err(StakingError::AlreadyExited(msg.id));
    }
    Ok(())
}

/// Block-number and nonce checks shared by every kind.
pub fn validate_position(
    ledger: &LedgerState,
    msg: &StakingMsg,
    receipt_block: u64,
    event_nonce: u64,
) -> StakingResult<()> {
    let header = msg.header();
    if header.block_number != receipt_block {
        return Err(StakingError::BlockMismatch {
            claimed: header.block_number,
            receipt: receipt_block,
        });
    }

    check_claim(header.nonce, event_nonce)?;
    check_not_stale(ledger.watermark(msg.validator_id()), header.nonce)?;

    let sequence = header.event_sequence();
    if ledger.has_sequence(sequence) {
        return Err(StakingError::ReplayedEvent(sequence));
    }
    Ok(())
}
