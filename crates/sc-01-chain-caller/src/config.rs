//! # External-Chain RPC Configuration

use crate::domain::CallerError;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Default external-chain endpoint.
pub const DEFAULT_RPC_URL: &str = "http://localhost:8545";

/// Default bound on a single external query.
pub const DEFAULT_TIMEOUT_MS: u64 = 5_000;

/// Configuration for [`RpcContractCaller`](crate::RpcContractCaller).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcConfig {
    /// HTTP(S) JSON-RPC endpoint of an external-chain node.
    pub url: String,
    /// Upper bound on each request, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_RPC_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl RpcConfig {
    /// Short timeout against a local node.
    pub fn for_testing() -> Self {
        Self {
            url: "http://127.0.0.1:8545".to_string(),
            timeout_ms: 500,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// - `SC_ETH_RPC_URL`: endpoint (default: http://localhost:8545)
    /// - `SC_ETH_RPC_TIMEOUT_MS`: request bound (default: 5000)
    pub fn from_env() -> Self {
        Self {
            url: env::var("SC_ETH_RPC_URL").unwrap_or_else(|_| DEFAULT_RPC_URL.to_string()),
            timeout_ms: env::var("SC_ETH_RPC_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_MS),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn validate(&self) -> Result<(), CallerError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(CallerError::Config(format!(
                "RPC url must be http(s): {}",
                self.url
            )));
        }
        if self.timeout_ms == 0 {
            return Err(CallerError::Config("timeout_ms must be > 0".into()));
        }
        Ok(())
    }
}
