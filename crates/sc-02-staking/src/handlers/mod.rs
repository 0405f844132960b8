//! Side-transaction handlers
//!
//! - [`SideHandler`]: verifies a claim against the external chain and votes.
//!   Never mutates state.
//! - [`PostHandler`]: applies a claim to the ledger once the network's
//!   aggregated vote is `Yes`.

pub mod post;
pub mod side;

pub use post::{PostHandler, PostTxResult};
pub use side::{SideHandler, SideTxResult};
