//! # Side-Tx Properties
//!
//! Determinism of votes, gap-free nonce sequencing, commit only on agreement,
//! and retry after a pending confirmation.

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use proptest::prelude::*;
    use sc_01_chain_caller::MockContractCaller;
    use sc_02_staking::{
        DiagnosticCode, LedgerState, PostHandler, SideHandler, SideTxResult, StakingMsg,
        ValidatorId, Vote,
    };

    use crate::integration::fixtures::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    fn side_handler(caller: &Arc<MockContractCaller>) -> SideHandler {
        SideHandler::new(caller.clone(), params(), Duration::from_secs(1))
    }

    /// One message of every kind for validator 1 (seed 1, nonce 4, 10 tokens),
    /// each registered on `caller`, plus a join for a new validator.
    fn registered_messages(caller: &MockContractCaller) -> Vec<StakingMsg> {
        let msgs: Vec<StakingMsg> = vec![
            join(2, 2, 3).into(),
            stake_update(1, 30, 5).into(),
            signer_update(1, 9, 5).into(),
            exit(1, 4, 5).into(),
        ];
        for msg in &msgs {
            register(caller, msg, msg.validator_id().as_u64() as u8);
        }
        msgs
    }

    fn genesis() -> LedgerState {
        LedgerState::from_validators(1, vec![validator(1, 1, 10, 4)]).unwrap()
    }

    // =============================================================================
    // DETERMINISM
    // =============================================================================

    #[tokio::test]
    async fn test_side_handler_is_deterministic() {
        let caller = Arc::new(MockContractCaller::new());
        let mut msgs = registered_messages(&caller);
        // Unregistered and mismatching claims must be stable too
        msgs.push(stake_update(1, 30, 6).into());
        let mut wrong_nonce = stake_update(1, 30, 5);
        wrong_nonce.header.nonce = 7;
        msgs.push(wrong_nonce.into());

        let ledger = genesis();
        let first = side_handler(&caller);
        let second = side_handler(&caller);

        for msg in &msgs {
            let a = first.handle(&ledger, Some(msg)).await;
            let b = first.handle(&ledger, Some(msg)).await;
            let c = second.handle(&ledger, Some(msg)).await;
            assert_eq!(a, b, "{}", msg.kind());
            assert_eq!(a, c, "{}", msg.kind());
        }
    }

    #[tokio::test]
    async fn test_side_handler_never_mutates_snapshot() {
        let caller = Arc::new(MockContractCaller::new());
        let msgs = registered_messages(&caller);
        let ledger = genesis();
        let before = ledger.clone();

        for msg in &msgs {
            let result = side_handler(&caller).handle(&ledger, Some(msg)).await;
            assert_eq!(result, SideTxResult::yes(), "{}", msg.kind());
        }
        assert_eq!(ledger, before);
    }

    // =============================================================================
    // NO PREMATURE COMMIT
    // =============================================================================

    #[tokio::test]
    async fn test_no_commit_without_yes() {
        let caller = Arc::new(MockContractCaller::new());
        let msgs = registered_messages(&caller);

        for vote in [Vote::No, Vote::Skip] {
            let mut ledger = genesis();
            let before = ledger.clone();
            for msg in &msgs {
                let result = PostHandler::handle(&mut ledger, Some(msg), vote);
                assert_eq!(result.code, DiagnosticCode::SideTxRejected);
                assert!(result.event.is_none());
            }
            assert_eq!(ledger, before, "{vote}");
        }
    }

    // =============================================================================
    // IDEMPOTENT RETRY
    // =============================================================================

    #[tokio::test]
    async fn test_retry_after_pending_confirmation() {
        let caller = Arc::new(MockContractCaller::new());
        let msg: StakingMsg = stake_update(1, 42, 5).into();
        register(&caller, &msg, 1);
        caller.set_unconfirmed(msg.header().tx_hash);

        // Node that had to wait
        let mut retried = genesis();
        let pending = side_handler(&caller).handle(&retried, Some(&msg)).await;
        assert_eq!(pending, SideTxResult::skip(DiagnosticCode::WaitForConfirmation));
        PostHandler::handle(&mut retried, Some(&msg), pending.vote);
        assert_eq!(retried, genesis());

        caller.confirm(msg.header().tx_hash);
        let confirmed = side_handler(&caller).handle(&retried, Some(&msg)).await;
        assert_eq!(confirmed, SideTxResult::yes());
        let late = PostHandler::handle(&mut retried, Some(&msg), confirmed.vote);

        // Node that saw it confirmed the first time
        let mut direct = genesis();
        let early = PostHandler::handle(&mut direct, Some(&msg), Vote::Yes);

        assert_eq!(late, early);
        assert_eq!(retried, direct);
        assert_eq!(retried.get_validator(ValidatorId(1)).unwrap().nonce, 5);
    }

    // =============================================================================
    // NONCE MONOTONICITY
    // =============================================================================

    proptest! {
        /// Whatever nonces are thrown at the post handler, the committed ones
        /// are 1, 2, 3, ... and every other call leaves the ledger untouched.
        #[test]
        fn prop_committed_nonces_are_gap_free(claims in prop::collection::vec(1u64..8, 1..40)) {
            let mut ledger = LedgerState::from_validators(1, vec![validator(1, 1, 10, 0)]).unwrap();
            let mut committed = Vec::new();

            for (i, nonce) in claims.into_iter().enumerate() {
                let msg: StakingMsg = stake_update(1, 10 + i as u64, nonce).into();
                let watermark = ledger.get_validator(ValidatorId(1)).unwrap().nonce;
                let before = ledger.clone();

                let result = PostHandler::handle(&mut ledger, Some(&msg), Vote::Yes);

                if result.is_ok() {
                    prop_assert_eq!(nonce, watermark + 1);
                    committed.push(nonce);
                } else {
                    prop_assert!(nonce != watermark + 1);
                    prop_assert_eq!(&ledger, &before);
                }
            }

            let expected: Vec<u64> = (1..=committed.len() as u64).collect();
            prop_assert_eq!(committed, expected);
        }

        /// A joined validator's nonce only ever moves to its successor.
        #[test]
        fn prop_join_then_updates_advance_by_one(updates in 1u64..10) {
            let mut ledger = LedgerState::default();
            let joined: StakingMsg = join(3, 3, 1).into();
            prop_assert!(PostHandler::handle(&mut ledger, Some(&joined), Vote::Yes).is_ok());

            for nonce in 2..=updates + 1 {
                let msg: StakingMsg = stake_update(3, nonce, nonce).into();
                prop_assert!(PostHandler::handle(&mut ledger, Some(&msg), Vote::Yes).is_ok());
                prop_assert_eq!(ledger.watermark(ValidatorId(3)), nonce);
            }

            // Skipping ahead is refused
            let gap: StakingMsg = stake_update(3, 99, updates + 3).into();
            let result = PostHandler::handle(&mut ledger, Some(&gap), Vote::Yes);
            prop_assert_eq!(result.code, DiagnosticCode::InvalidMsg);
        }
    }
}
