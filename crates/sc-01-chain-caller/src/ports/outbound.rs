//! # Outbound Ports
//!
//! The capability side handlers use to verify claims against the external
//! chain. It is injected, never global, so a test can substitute a
//! deterministic implementation.

use crate::domain::{
    decode_event, Receipt, SignerChangeEvent, StakeUpdateEvent, StakedEvent, UnstakeInitEvent,
};
use async_trait::async_trait;
use shared_types::{Address, Hash};

/// External chain reader - outbound port.
///
/// Every method is a soft query: `None` means "not available yet or not
/// valid", and callers must treat it as a reason to abstain rather than as
/// an error.
#[async_trait]
pub trait ContractCaller: Send + Sync {
    /// Fetch the receipt of `tx_hash` if it is at least
    /// `required_confirmations` blocks deep and succeeded.
    async fn get_confirmed_tx_receipt(
        &self,
        tx_hash: Hash,
        required_confirmations: u64,
    ) -> Option<Receipt>;

    /// Decode a `Staked` event at `log_index` emitted by `contract`.
    fn decode_validator_join_event(
        &self,
        contract: &Address,
        receipt: &Receipt,
        log_index: u64,
    ) -> Option<StakedEvent> {
        decode_event(contract, receipt, log_index)
    }

    /// Decode a `SignerChange` event.
    fn decode_signer_update_event(
        &self,
        contract: &Address,
        receipt: &Receipt,
        log_index: u64,
    ) -> Option<SignerChangeEvent> {
        decode_event(contract, receipt, log_index)
    }

    /// Decode a `StakeUpdate` event.
    fn decode_stake_update_event(
        &self,
        contract: &Address,
        receipt: &Receipt,
        log_index: u64,
    ) -> Option<StakeUpdateEvent> {
        decode_event(contract, receipt, log_index)
    }

    /// Decode an `UnstakeInit` event.
    fn decode_validator_exit_event(
        &self,
        contract: &Address,
        receipt: &Receipt,
        log_index: u64,
    ) -> Option<UnstakeInitEvent> {
        decode_event(contract, receipt, log_index)
    }
}
