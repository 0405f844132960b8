//! # Simulated Consensus Round
//!
//! Several nodes vote on the same proposed block, an aggregator applies the
//! more-than-two-thirds voting-power rule, and every node commits the
//! aggregated decisions. Ledgers must stay identical across nodes.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use futures::future::join_all;
    use sc_01_chain_caller::MockContractCaller;
    use sc_02_staking::{
        DiagnosticCode, InMemoryEventBus, LedgerState, SideTxApi, SideTxResult, SideTxService,
        StakingConfig, StakingDependencies, StakingEvent, StakingLedger, StakingMsg, ValidatorId,
        Vote,
    };

    use crate::integration::fixtures::*;

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    const NODES: u64 = 4;

    struct Node {
        caller: Arc<MockContractCaller>,
        bus: Arc<InMemoryEventBus>,
        service: SideTxService<InMemoryEventBus>,
    }

    /// Validators 1..=4, ten tokens each, last nonce 4.
    fn genesis() -> LedgerState {
        let validators = (1..=NODES).map(|id| validator(id, id as u8, 10, 4));
        LedgerState::from_validators(1, validators).unwrap()
    }

    fn node() -> Node {
        let caller = Arc::new(MockContractCaller::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let service = SideTxService::new(StakingDependencies {
            caller: caller.clone(),
            publisher: bus.clone(),
            ledger: Arc::new(StakingLedger::new(genesis())),
            config: StakingConfig::for_testing(),
        })
        .unwrap();
        Node {
            caller,
            bus,
            service,
        }
    }

    /// `Yes` when validators holding more than 2/3 of the power voted yes.
    ///
    /// Node `i` votes with validator `i + 1`.
    fn aggregate(ledger: &LedgerState, votes: &[Vec<SideTxResult>]) -> Vec<Vote> {
        let total = ledger.total_voting_power();
        let msgs = votes.first().map_or(0, Vec::len);
        (0..msgs)
            .map(|j| {
                let yes_power: u64 = votes
                    .iter()
                    .enumerate()
                    .filter(|(_, node_votes)| node_votes[j].is_yes())
                    .filter_map(|(i, _)| ledger.get_validator(ValidatorId(i as u64 + 1)))
                    .map(|v| v.voting_power)
                    .sum();
                if yes_power * 3 > total * 2 {
                    Vote::Yes
                } else {
                    Vote::Skip
                }
            })
            .collect()
    }

    async fn run_round(nodes: &[Node], block: &[StakingMsg]) -> Vec<Vote> {
        let votes = join_all(nodes.iter().map(|n| n.service.vote_block(block))).await;
        let decisions = aggregate(&nodes[0].service.snapshot(), &votes);

        let commit: Vec<(StakingMsg, Vote)> =
            block.iter().cloned().zip(decisions.iter().copied()).collect();
        for n in nodes {
            n.service.commit_block(&commit).await;
        }
        decisions
    }

    fn assert_ledgers_agree(nodes: &[Node]) {
        let first = nodes[0].service.snapshot();
        for n in &nodes[1..] {
            assert_eq!(*n.service.snapshot(), *first);
        }
    }

    // =============================================================================
    // TESTS
    // =============================================================================

    #[tokio::test]
    async fn test_supermajority_commits_everywhere() {
        let nodes: Vec<Node> = (0..NODES).map(|_| node()).collect();
        let joined: StakingMsg = join(5, 5, 7).into();
        let updated: StakingMsg = stake_update(1, 20, 5).into();

        for (i, n) in nodes.iter().enumerate() {
            register(&n.caller, &joined, 5);
            // The last node's external node has not seen the update yet
            if i < 3 {
                register(&n.caller, &updated, 1);
            }
        }

        let decisions = run_round(&nodes, &[joined, updated]).await;
        assert_eq!(decisions, vec![Vote::Yes, Vote::Yes]);

        assert_ledgers_agree(&nodes);
        let ledger = nodes[3].service.snapshot();
        assert_eq!(ledger.get_validator(ValidatorId(5)).unwrap().nonce, 1);
        assert_eq!(ledger.get_validator(ValidatorId(1)).unwrap().voting_power, 20);
        assert_eq!(ledger.total_voting_power(), 20 + 30 + 7);

        for n in &nodes {
            let events = n.bus.get_events();
            assert_eq!(events.len(), 2);
            assert!(matches!(events[0], StakingEvent::ValidatorJoined { .. }));
            assert!(matches!(events[1], StakingEvent::StakeUpdated { new_power: 20, .. }));
            assert_eq!(n.bus.block_count(), 1);
            assert_eq!(n.bus.events_for(ValidatorId(5)).len(), 1);
        }
    }

    #[tokio::test]
    async fn test_split_vote_commits_nothing() {
        let nodes: Vec<Node> = (0..NODES).map(|_| node()).collect();
        let updated: StakingMsg = stake_update(2, 50, 5).into();

        // Only half the power sees the receipt confirmed
        for n in &nodes[..2] {
            register(&n.caller, &updated, 2);
        }

        let decisions = run_round(&nodes, &[updated]).await;
        assert_eq!(decisions, vec![Vote::Skip]);

        assert_ledgers_agree(&nodes);
        let ledger = nodes[0].service.snapshot();
        let untouched = genesis();
        assert!(ledger.validators().eq(untouched.validators()));
        // The block still counts as committed
        assert_eq!(ledger.version(), untouched.version() + 1);
        assert!(nodes.iter().all(|n| n.bus.event_count() == 0));
    }

    #[tokio::test]
    async fn test_conflicting_joins_first_wins() {
        let nodes: Vec<Node> = (0..NODES).map(|_| node()).collect();
        let first: StakingMsg = join(6, 6, 5).into();
        // Same validator id from a different transaction, also nonce 1
        let mut second = join(6, 16, 5);
        second.header.tx_hash = [0xee; 32];
        second.header.block_number = 11;
        let second: StakingMsg = second.into();

        for n in &nodes {
            register(&n.caller, &first, 6);
            register(&n.caller, &second, 16);
        }

        // Both claims are individually valid against the pre-block snapshot
        let decisions = run_round(&nodes, &[first, second.clone()]).await;
        assert_eq!(decisions, vec![Vote::Yes, Vote::Yes]);

        assert_ledgers_agree(&nodes);
        let ledger = nodes[0].service.snapshot();
        assert_eq!(
            ledger.get_validator(ValidatorId(6)).unwrap().signer,
            pubkey(6).address().unwrap()
        );

        // Re-proposing the loser in a later block no longer passes the side handler
        let vote = nodes[0].service.vote(Some(&second)).await;
        assert_eq!(vote, SideTxResult::skip(DiagnosticCode::InvalidMsg));
    }
}
