//! # Staking Scenarios
//!
//! End-to-end walkthroughs of single messages: vote on the side handler,
//! then commit on the post handler against the same ledger.
//!
//! | Scenario | Claim | Expected |
//! |----------|-------|----------|
//! | A | join, confirmed, matching event | `Yes`, validator inserted at nonce 1 |
//! | B | join, receipt not confirmed | `Skip` / wait for confirmation |
//! | C | receipt without the event | `Skip` / decode failed |
//! | D | nonce disagrees with event or ledger | `Skip` / invalid message |
//! | E | signer key disagrees with event | `Skip` / invalid message |
//! | F | stake update, then replay | `Yes` and applied, replay rejected |

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use sc_01_chain_caller::{MockContractCaller, Receipt, StakedEvent};
    use sc_02_staking::{
        DiagnosticCode, LedgerState, PostHandler, SideHandler, SideTxResult, StakingEvent,
        StakingMsg, ValidatorId, Vote,
    };

    use crate::integration::fixtures::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn side_handler(caller: &Arc<MockContractCaller>) -> SideHandler {
        SideHandler::new(caller.clone(), params(), Duration::from_secs(1))
    }

    /// Vote, then commit with the node's own vote as the aggregate.
    async fn vote_and_commit(
        caller: &Arc<MockContractCaller>,
        ledger: &mut LedgerState,
        msg: &StakingMsg,
    ) -> (SideTxResult, sc_02_staking::PostTxResult) {
        let side = side_handler(caller).handle(ledger, Some(msg)).await;
        let post = PostHandler::handle(ledger, Some(msg), side.vote);
        (side, post)
    }

    // =============================================================================
    // SCENARIOS
    // =============================================================================

    /// Scenario A: a confirmed, matching join is accepted and inserted.
    #[tokio::test]
    async fn test_validator_join_success() {
        let caller = Arc::new(MockContractCaller::new());
        let msg: StakingMsg = join(1, 1, 1).into();
        register(&caller, &msg, 1);

        let mut ledger = LedgerState::default();
        let (side, post) = vote_and_commit(&caller, &mut ledger, &msg).await;

        assert_eq!(side, SideTxResult::yes());
        assert!(post.is_ok());
        let validator = ledger.get_validator(ValidatorId(1)).unwrap();
        assert_eq!(validator.nonce, 1);
        assert_eq!(validator.voting_power, 1);
        assert_eq!(validator.signer, pubkey(1).address().unwrap());
        assert_eq!(
            ledger.get_validator_by_signer(&validator.signer).map(|v| v.id),
            Some(ValidatorId(1))
        );
        assert!(matches!(
            post.event,
            Some(StakingEvent::ValidatorJoined { nonce: 1, .. })
        ));
        assert_eq!(caller.last_required_confirmations(), params().mainchain_tx_confirmations);
    }

    /// Scenario B: no confirmed receipt means wait, and nothing changes.
    #[tokio::test]
    async fn test_unconfirmed_receipt_waits() {
        let caller = Arc::new(MockContractCaller::new());
        let msg: StakingMsg = join(1, 1, 1).into();
        register(&caller, &msg, 1);
        caller.set_unconfirmed(msg.header().tx_hash);

        let mut ledger = LedgerState::default();
        let (side, post) = vote_and_commit(&caller, &mut ledger, &msg).await;

        assert_eq!(side, SideTxResult::skip(DiagnosticCode::WaitForConfirmation));
        assert_eq!(post.code, DiagnosticCode::SideTxRejected);
        assert_eq!(ledger, LedgerState::default());
    }

    /// Scenario B, absent receipt variant.
    #[tokio::test]
    async fn test_missing_receipt_waits() {
        let caller = Arc::new(MockContractCaller::new());
        let msg: StakingMsg = join(1, 1, 1).into();

        let side = side_handler(&caller)
            .handle(&LedgerState::default(), Some(&msg))
            .await;
        assert_eq!(side, SideTxResult::skip(DiagnosticCode::WaitForConfirmation));
    }

    /// Scenario C: the receipt exists but carries no log at the claimed index.
    #[tokio::test]
    async fn test_event_not_found() {
        let caller = Arc::new(MockContractCaller::new());
        let msg: StakingMsg = join(1, 1, 1).into();
        caller.insert_receipt(Receipt::new(msg.header().tx_hash, JOIN_BLOCK));

        let side = side_handler(&caller)
            .handle(&LedgerState::default(), Some(&msg))
            .await;
        assert_eq!(side, SideTxResult::skip(DiagnosticCode::DecodeEventFailed));
    }

    /// Scenario C, wrong event kind at the claimed index.
    #[tokio::test]
    async fn test_event_of_other_kind_not_decoded() {
        let caller = Arc::new(MockContractCaller::new());
        let join_msg = join(1, 1, 1);
        let update = stake_update(1, 5, 1);
        // A stake-update log sits where the join claims its Staked log
        caller.insert_event(
            join_msg.header.tx_hash,
            JOIN_BLOCK,
            contract(),
            0,
            &stake_update_event(&update),
        );

        let msg: StakingMsg = join_msg.into();
        let side = side_handler(&caller)
            .handle(&LedgerState::default(), Some(&msg))
            .await;
        assert_eq!(side, SideTxResult::skip(DiagnosticCode::DecodeEventFailed));
    }

    /// Scenario D: claimed nonce 9, event nonce 3.
    #[tokio::test]
    async fn test_nonce_disagrees_with_event() {
        let caller = Arc::new(MockContractCaller::new());
        let mut ledger = LedgerState::from_validators(1, vec![validator(1, 1, 10, 2)]).unwrap();

        let mut claimed = stake_update(1, 20, 3);
        let event = stake_update_event(&claimed);
        caller.insert_event(claimed.header.tx_hash, claimed.header.block_number, contract(), 0, &event);
        claimed.header.nonce = 9;

        let msg: StakingMsg = claimed.into();
        let before = ledger.clone();
        let (side, post) = vote_and_commit(&caller, &mut ledger, &msg).await;

        assert_eq!(side, SideTxResult::skip(DiagnosticCode::InvalidMsg));
        assert_eq!(post.code, DiagnosticCode::SideTxRejected);
        assert_eq!(ledger, before);
    }

    /// Scenario D: the ledger watermark already passed the claimed nonce.
    #[tokio::test]
    async fn test_nonce_behind_watermark() {
        let caller = Arc::new(MockContractCaller::new());
        let ledger = LedgerState::from_validators(1, vec![validator(1, 1, 10, 9)]).unwrap();
        let msg: StakingMsg = stake_update(1, 20, 9).into();
        register(&caller, &msg, 1);

        let side = side_handler(&caller).handle(&ledger, Some(&msg)).await;
        assert_eq!(side, SideTxResult::skip(DiagnosticCode::InvalidMsg));
    }

    /// Scenario E: the event's signer is not the address of the claimed key.
    #[tokio::test]
    async fn test_signer_mismatch_rejected() {
        let caller = Arc::new(MockContractCaller::new());
        let msg = join(1, 1, 1);
        let event = StakedEvent {
            signer: pubkey(2).address().unwrap(),
            ..staked_event(&msg)
        };
        caller.insert_event(msg.header.tx_hash, JOIN_BLOCK, contract(), 0, &event);

        let msg: StakingMsg = msg.into();
        let mut ledger = LedgerState::default();
        let (side, post) = vote_and_commit(&caller, &mut ledger, &msg).await;

        assert_eq!(side, SideTxResult::skip(DiagnosticCode::InvalidMsg));
        assert!(!post.is_ok());
        assert!(ledger.is_empty());
    }

    /// Scenario E: malformed claimed key is rejected before any comparison.
    #[tokio::test]
    async fn test_malformed_pubkey_rejected() {
        let caller = Arc::new(MockContractCaller::new());
        let good = join(1, 1, 1);
        register(&caller, &StakingMsg::from(good.clone()), 1);

        let mut bad = good;
        bad.signer_pubkey = shared_types::PubKey::new(vec![0x04; 10]);
        let msg: StakingMsg = bad.into();

        let side = side_handler(&caller)
            .handle(&LedgerState::default(), Some(&msg))
            .await;
        assert_eq!(side, SideTxResult::skip(DiagnosticCode::InvalidMsg));
    }

    /// Scenario F: a stake update applies once; its replay is rejected at commit.
    #[tokio::test]
    async fn test_stake_update_then_replay() {
        let caller = Arc::new(MockContractCaller::new());
        let mut ledger = LedgerState::from_validators(1, vec![validator(1, 1, 10, 4)]).unwrap();
        let msg: StakingMsg = stake_update(1, 25, 5).into();
        register(&caller, &msg, 1);

        let (side, post) = vote_and_commit(&caller, &mut ledger, &msg).await;
        assert_eq!(side, SideTxResult::yes());
        assert!(post.is_ok());

        let validator = ledger.get_validator(ValidatorId(1)).unwrap();
        assert_eq!(validator.stake, tokens(25));
        assert_eq!(validator.voting_power, 25);
        assert_eq!(validator.nonce, 5);

        // The replay no longer wins a vote, and a forced commit is refused
        let side = side_handler(&caller).handle(&ledger, Some(&msg)).await;
        assert_eq!(side, SideTxResult::skip(DiagnosticCode::InvalidMsg));

        let before = ledger.clone();
        let replay = PostHandler::handle(&mut ledger, Some(&msg), Vote::Yes);
        assert_eq!(replay.code, DiagnosticCode::OldTx);
        assert_eq!(ledger, before);
    }

    // =============================================================================
    // FULL LIFECYCLE
    // =============================================================================

    /// Join, rotate signer, exit; each step at the next nonce.
    #[tokio::test]
    async fn test_join_rotate_exit_lifecycle() {
        let caller = Arc::new(MockContractCaller::new());
        let mut ledger = LedgerState::default();

        let joined: StakingMsg = join(7, 7, 3).into();
        register(&caller, &joined, 7);
        let rotated: StakingMsg = signer_update(7, 8, 2).into();
        register(&caller, &rotated, 7);
        let exited: StakingMsg = exit(7, 9, 3).into();
        register(&caller, &exited, 8);

        for msg in [&joined, &rotated, &exited] {
            let (side, post) = vote_and_commit(&caller, &mut ledger, msg).await;
            assert_eq!(side, SideTxResult::yes(), "{}", msg.kind());
            assert!(post.is_ok(), "{}", msg.kind());
        }

        let validator = ledger.get_validator(ValidatorId(7)).unwrap();
        assert_eq!(validator.nonce, 3);
        assert_eq!(validator.signer, pubkey(8).address().unwrap());
        assert_eq!(validator.end_epoch, 9);
        assert!(ledger.get_validator_by_signer(&pubkey(7).address().unwrap()).is_none());

        // Exited validators stay in the ledger
        assert_eq!(ledger.len(), 1);
        assert!(validator.has_exited());
    }

    /// A second exit for an exited validator is refused.
    #[tokio::test]
    async fn test_double_exit_rejected() {
        let caller = Arc::new(MockContractCaller::new());
        let mut exited = validator(3, 3, 10, 1);
        exited.end_epoch = 5;
        let ledger = LedgerState::from_validators(1, vec![exited]).unwrap();

        let msg: StakingMsg = exit(3, 6, 2).into();
        register(&caller, &msg, 3);

        let side = side_handler(&caller).handle(&ledger, Some(&msg)).await;
        assert_eq!(side, SideTxResult::skip(DiagnosticCode::InvalidMsg));
    }

    /// No message at all is an unknown request on both sides.
    #[tokio::test]
    async fn test_unknown_request() {
        let caller = Arc::new(MockContractCaller::new());
        let mut ledger = LedgerState::default();

        let side = side_handler(&caller).handle(&ledger, None).await;
        assert_eq!(side, SideTxResult::skip(DiagnosticCode::UnknownRequest));

        let post = PostHandler::handle(&mut ledger, None, Vote::Yes);
        assert_eq!(post.code, DiagnosticCode::UnknownRequest);
        assert_eq!(caller.receipt_calls(), 0);
    }
}
