//! # Sidechain Staking Test Suite
//!
//! Cross-crate tests that drive the side and post handlers through the
//! mock external chain.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── fixtures.rs     # Keys, messages, and matching external events
//!     ├── scenarios.rs    # Join, stake update, and rejection walkthroughs
//!     ├── properties.rs   # Determinism, nonce sequencing, retries
//!     └── consensus.rs    # Several nodes voting and committing one block
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p sc-tests
//! cargo test -p sc-tests integration::properties::
//! ```

pub mod integration;
