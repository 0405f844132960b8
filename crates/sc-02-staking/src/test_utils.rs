//! Shared fixtures for unit tests.

use crate::domain::validator::TOKEN_DECIMALS;
use shared_types::{PubKey, U256};

/// Deterministic signer key derived from a one-byte scalar.
pub(crate) fn pubkey(seed: u8) -> PubKey {
    let mut scalar = [0u8; 32];
    scalar[31] = seed.max(1);
    let secret = k256::SecretKey::from_slice(&scalar).expect("valid scalar");
    PubKey::from(&secret.public_key())
}

/// `n` whole staking tokens.
pub(crate) fn tokens(n: u64) -> U256 {
    U256::from(n) * U256::exp10(TOKEN_DECIMALS)
}
