//! Post handler
//!
//! Applies a message to the ledger once the network's aggregated vote is
//! `Yes`. Before mutating it re-checks, against the ledger as it is now:
//!
//! - the external log has not been committed before (replay)
//! - the nonce is the exact successor of the validator's watermark
//! - existence rules for the message kind
//!
//! Every check runs before the first write, so a rejected message leaves the
//! ledger untouched.

use crate::domain::sequencer::check_next;
use crate::domain::{
    voting_power, DiagnosticCode, LedgerState, SignerUpdateMsg, StakeUpdateMsg, StakingError,
    StakingMsg, StakingResult, Validator, ValidatorExitMsg, ValidatorJoinMsg, Vote,
};
use crate::events::StakingEvent;
use crate::metrics;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Outcome of a commit attempt.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostTxResult {
    pub code: DiagnosticCode,
    /// Set when the ledger was mutated.
    pub event: Option<StakingEvent>,
}

impl PostTxResult {
    fn applied(event: StakingEvent) -> Self {
        Self {
            code: DiagnosticCode::Ok,
            event: Some(event),
        }
    }

    fn rejected(code: DiagnosticCode) -> Self {
        Self { code, event: None }
    }

    pub fn is_ok(&self) -> bool {
        self.code.is_ok()
    }
}

/// Commits agreed staking messages.
pub struct PostHandler;

impl PostHandler {
    /// Apply `msg` to `state` if `vote` is `Yes`.
    pub fn handle(state: &mut LedgerState, msg: Option<&StakingMsg>, vote: Vote) -> PostTxResult {
        let Some(msg) = msg else {
            warn!("[sc-02] post handler invoked without a staking message");
            metrics::record_post_result("unknown", DiagnosticCode::UnknownRequest.as_str());
            return PostTxResult::rejected(DiagnosticCode::UnknownRequest);
        };

        let result = if vote != Vote::Yes {
            debug!(
                kind = %msg.kind(),
                validator_id = %msg.validator_id(),
                %vote,
                "[sc-02] side-tx not agreed, skipping commit"
            );
            PostTxResult::rejected(DiagnosticCode::SideTxRejected)
        } else {
            match Self::apply(state, msg) {
                Ok(event) => {
                    info!(
                        kind = %msg.kind(),
                        validator_id = %msg.validator_id(),
                        nonce = msg.nonce(),
                        "[sc-02] staking message committed"
                    );
                    PostTxResult::applied(event)
                }
                Err(e) => {
                    warn!(
                        kind = %msg.kind(),
                        validator_id = %msg.validator_id(),
                        nonce = msg.nonce(),
                        error = %e,
                        "[sc-02] commit rejected"
                    );
                    PostTxResult::rejected(e.code())
                }
            }
        };

        metrics::record_post_result(msg.kind().as_str(), result.code.as_str());
        result
    }

    fn apply(state: &mut LedgerState, msg: &StakingMsg) -> StakingResult<StakingEvent> {
        let header = msg.header();
        let id = msg.validator_id();
        let sequence = header.event_sequence();

        if state.has_sequence(sequence) {
            return Err(StakingError::ReplayedEvent(sequence));
        }
        check_next(state.watermark(id), header.nonce)?;

        let event = match msg {
            StakingMsg::ValidatorJoin(m) => apply_join(state, m)?,
            StakingMsg::SignerUpdate(m) => apply_signer_update(state, m)?,
            StakingMsg::StakeUpdate(m) => apply_stake_update(state, m)?,
            StakingMsg::ValidatorExit(m) => apply_exit(state, m)?,
        };
        state.record_applied(id, header.nonce, sequence)?;
        Ok(event)
    }
}

fn apply_join(state: &mut LedgerState, msg: &ValidatorJoinMsg) -> StakingResult<StakingEvent> {
    state.ensure_absent(msg.id)?;
    let validator = Validator::new(
        msg.id,
        msg.signer_pubkey.clone(),
        msg.amount,
        msg.activation_epoch,
    )?;
    state.ensure_signer_free(&validator.signer, msg.id)?;

    let event = StakingEvent::ValidatorJoined {
        validator_id: msg.id,
        signer: validator.signer,
        voting_power: validator.voting_power,
        start_epoch: validator.start_epoch,
        nonce: msg.header.nonce,
    };
    state.insert_validator(validator);
    Ok(event)
}

fn apply_signer_update(
    state: &mut LedgerState,
    msg: &SignerUpdateMsg,
) -> StakingResult<StakingEvent> {
    let new_signer = msg.new_signer_pubkey.address()?;
    let old_signer = state.ensure_present(msg.id)?.signer;
    state.ensure_signer_free(&new_signer, msg.id)?;

    let validator = state.validator_mut(msg.id)?;
    validator.signer = new_signer;
    validator.pubkey = msg.new_signer_pubkey.clone();
    state.reindex_signer(msg.id, &old_signer, new_signer);

    Ok(StakingEvent::SignerChanged {
        validator_id: msg.id,
        old_signer,
        new_signer,
        nonce: msg.header.nonce,
    })
}

fn apply_stake_update(
    state: &mut LedgerState,
    msg: &StakeUpdateMsg,
) -> StakingResult<StakingEvent> {
    let new_power = voting_power(msg.new_amount)?;
    let validator = state.validator_mut(msg.id)?;
    let old_power = validator.voting_power;
    validator.stake = msg.new_amount;
    validator.voting_power = new_power;

    Ok(StakingEvent::StakeUpdated {
        validator_id: msg.id,
        stake: msg.new_amount,
        old_power,
        new_power,
        nonce: msg.header.nonce,
    })
}

fn apply_exit(state: &mut LedgerState, msg: &ValidatorExitMsg) -> StakingResult<StakingEvent> {
    if msg.deactivation_epoch == 0 {
        return Err(StakingError::FieldMismatch {
            field: "deactivation_epoch",
        });
    }
    let validator = state.validator_mut(msg.id)?;
    if validator.has_exited() {
        return Err(StakingError::AlreadyExited(msg.id));
    }
    validator.end_epoch = msg.deactivation_epoch;

    Ok(StakingEvent::ValidatorExited {
        validator_id: msg.id,
        end_epoch: msg.deactivation_epoch,
        nonce: msg.header.nonce,
    })
}
