//! Chain parameters
//!
//! Owned by the parameter-governance collaborator; read-only here.

use super::{StakingError, StakingResult};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use shared_types::{is_zero_address, parse_address, Address, PrefixedHex, ZERO_ADDRESS};
use std::env;

/// Default external-chain confirmation depth.
pub const DEFAULT_MAINCHAIN_TX_CONFIRMATIONS: u64 = 6;

#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainParams {
    /// Blocks a receipt must be buried under before it is trusted.
    pub mainchain_tx_confirmations: u64,
    /// Staking-info contract whose logs are verified.
    #[serde_as(as = "PrefixedHex")]
    pub staking_info_address: Address,
}

impl Default for ChainParams {
    fn default() -> Self {
        Self {
            mainchain_tx_confirmations: DEFAULT_MAINCHAIN_TX_CONFIRMATIONS,
            staking_info_address: ZERO_ADDRESS,
        }
    }
}

impl ChainParams {
    pub fn new(mainchain_tx_confirmations: u64, staking_info_address: Address) -> Self {
        Self {
            mainchain_tx_confirmations,
            staking_info_address,
        }
    }

    /// Fixed non-zero contract address for tests.
    pub fn for_testing() -> Self {
        Self::new(DEFAULT_MAINCHAIN_TX_CONFIRMATIONS, [0x5a; 20])
    }

    /// Create parameters from environment variables.
    ///
    /// - `SC_MAINCHAIN_TX_CONFIRMATIONS`: confirmation depth (default: 6)
    /// - `SC_STAKING_INFO_ADDRESS`: staking-info contract (required for a
    ///   valid configuration)
    pub fn from_env() -> StakingResult<Self> {
        let mainchain_tx_confirmations = match env::var("SC_MAINCHAIN_TX_CONFIRMATIONS") {
            Ok(v) => v
                .parse()
                .map_err(|e| StakingError::Config(format!("SC_MAINCHAIN_TX_CONFIRMATIONS: {e}")))?,
            Err(_) => DEFAULT_MAINCHAIN_TX_CONFIRMATIONS,
        };
        let staking_info_address = match env::var("SC_STAKING_INFO_ADDRESS") {
            Ok(v) => parse_address(&v)
                .map_err(|e| StakingError::Config(format!("SC_STAKING_INFO_ADDRESS: {e}")))?,
            Err(_) => ZERO_ADDRESS,
        };
        let params = Self::new(mainchain_tx_confirmations, staking_info_address);
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> StakingResult<()> {
        if self.mainchain_tx_confirmations == 0 {
            return Err(StakingError::Config(
                "mainchain_tx_confirmations must be > 0".into(),
            ));
        }
        if is_zero_address(&self.staking_info_address) {
            return Err(StakingError::Config(
                "staking_info_address must be set".into(),
            ));
        }
        Ok(())
    }
}
