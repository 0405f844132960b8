//! # Domain Errors
//!
//! Failures talking to the external chain. These never cross the
//! [`ContractCaller`](crate::ports::ContractCaller) port: adapters log them and
//! report "no confirmed receipt" instead.

use thiserror::Error;

/// External-chain client errors.
#[derive(Debug, Error)]
pub enum CallerError {
    /// HTTP transport failure (connection refused, TLS, body read).
    #[error("Transport error: {0}")]
    Transport(String),

    /// Request exceeded the configured bound.
    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    /// JSON-RPC error object returned by the node.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// Response did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<reqwest::Error> for CallerError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CallerError::MalformedResponse(err.to_string())
        } else {
            CallerError::Transport(err.to_string())
        }
    }
}
