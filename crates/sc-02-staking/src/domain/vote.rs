//! Votes and diagnostic codes
//!
//! The side handler's output and the post handler's outcome are small closed
//! types rather than overloaded status integers. Diagnostic codes are stable
//! and operator-visible.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A node's vote on a side transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vote {
    Yes,
    No,
    Skip,
}

impl Vote {
    pub fn as_str(&self) -> &'static str {
        match self {
            Vote::Yes => "yes",
            Vote::No => "no",
            Vote::Skip => "skip",
        }
    }
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable diagnostic codes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum DiagnosticCode {
    Ok = 0,
    /// No message, or a message kind this subsystem does not handle.
    UnknownRequest = 6,
    /// Field, nonce, existence or signer mismatch.
    InvalidMsg = 1400,
    /// Event already committed.
    OldTx = 1401,
    /// Receipt absent or not yet deep enough.
    WaitForConfirmation = 1500,
    /// Log missing or not the expected event.
    DecodeEventFailed = 1501,
    /// Post handler called with a non-`Yes` aggregated vote.
    SideTxRejected = 1502,
}

impl DiagnosticCode {
    pub fn as_u32(self) -> u32 {
        self as u32
    }

    pub fn is_ok(self) -> bool {
        self == DiagnosticCode::Ok
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DiagnosticCode::Ok => "ok",
            DiagnosticCode::UnknownRequest => "unknown_request",
            DiagnosticCode::InvalidMsg => "invalid_msg",
            DiagnosticCode::OldTx => "old_tx",
            DiagnosticCode::WaitForConfirmation => "wait_for_confirmation",
            DiagnosticCode::DecodeEventFailed => "decode_event_failed",
            DiagnosticCode::SideTxRejected => "side_tx_rejected",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.as_str(), self.as_u32())
    }
}
