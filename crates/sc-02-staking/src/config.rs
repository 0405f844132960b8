//! Staking subsystem configuration

use crate::domain::{ChainParams, StakingError, StakingResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default bound on the side handler's external query.
pub const DEFAULT_SIDE_TX_TIMEOUT_MS: u64 = 5_000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingConfig {
    pub chain_params: ChainParams,
    /// Receipt queries slower than this vote `Skip`.
    pub side_tx_timeout_ms: u64,
}

impl Default for StakingConfig {
    fn default() -> Self {
        Self {
            chain_params: ChainParams::default(),
            side_tx_timeout_ms: DEFAULT_SIDE_TX_TIMEOUT_MS,
        }
    }
}

impl StakingConfig {
    pub fn for_testing() -> Self {
        Self {
            chain_params: ChainParams::for_testing(),
            side_tx_timeout_ms: 1_000,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// See [`ChainParams::from_env`]; additionally `SC_SIDE_TX_TIMEOUT_MS`
    /// (default: 5000).
    pub fn from_env() -> StakingResult<Self> {
        let config = Self {
            chain_params: ChainParams::from_env()?,
            side_tx_timeout_ms: parse_timeout_ms(env::var("SC_SIDE_TX_TIMEOUT_MS").ok().as_deref())?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn side_tx_timeout(&self) -> Duration {
        Duration::from_millis(self.side_tx_timeout_ms)
    }

    pub fn validate(&self) -> StakingResult<()> {
        self.chain_params.validate()?;
        if self.side_tx_timeout_ms == 0 {
            return Err(StakingError::Config(
                "side_tx_timeout_ms must be > 0".into(),
            ));
        }
        Ok(())
    }
}

/// Unset means the default; a set but malformed value is an error.
fn parse_timeout_ms(raw: Option<&str>) -> StakingResult<u64> {
    match raw {
        Some(v) => v
            .trim()
            .parse()
            .map_err(|e| StakingError::Config(format!("SC_SIDE_TX_TIMEOUT_MS: {e}"))),
        None => Ok(DEFAULT_SIDE_TX_TIMEOUT_MS),
    }
}
