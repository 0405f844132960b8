//! Consumed events (Incoming)

use serde::{Deserialize, Serialize};

/// A checkpoint was acknowledged on the external chain.
///
/// The sidechain epoch is the acknowledged-checkpoint count; validator
/// activation and deactivation epochs are compared against it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointAckEvent {
    pub ack_count: u64,
}
