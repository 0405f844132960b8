//! # Signer Public Keys
//!
//! A validator's signer is identified on the sidechain by its raw uncompressed
//! secp256k1 public key (65 bytes, leading `0x04`). The staking contract emits
//! the same key without its prefix byte, and the signer address is the last
//! 20 bytes of the Keccak-256 hash of those 64 bytes.
//!
//! Claims arrive from untrusted proposers, so a `PubKey` may hold arbitrary
//! bytes. Nothing derives an address from a key that fails [`PubKey::validate`].

use crate::{keccak256, Address, PrefixedHex, PubKeyError};
use k256::elliptic_curve::sec1::ToEncodedPoint;
use serde::{Deserialize, Serialize};
use serde_with::serde_as;
use std::fmt;

/// Length of an uncompressed SEC1 public key.
pub const UNCOMPRESSED_PUBKEY_LEN: usize = 65;

/// SEC1 tag byte of an uncompressed point.
pub const UNCOMPRESSED_PREFIX: u8 = 0x04;

/// Raw signer public key, possibly malformed.
#[serde_as]
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PubKey(#[serde_as(as = "PrefixedHex")] Vec<u8>);

impl PubKey {
    /// Wrap raw bytes without validation.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The 64 bytes the staking contract emits (key minus the SEC1 tag).
    ///
    /// Empty for an empty key.
    pub fn without_prefix(&self) -> &[u8] {
        self.0.get(1..).unwrap_or_default()
    }

    /// Check the key is a well-formed uncompressed secp256k1 point.
    pub fn validate(&self) -> Result<(), PubKeyError> {
        match self.0.as_slice() {
            [] => Err(PubKeyError::Empty),
            bytes if bytes.len() != UNCOMPRESSED_PUBKEY_LEN => {
                Err(PubKeyError::InvalidLength(bytes.len()))
            }
            [prefix, ..] if *prefix != UNCOMPRESSED_PREFIX => {
                Err(PubKeyError::InvalidPrefix(*prefix))
            }
            bytes => k256::PublicKey::from_sec1_bytes(bytes)
                .map(|_| ())
                .map_err(|_| PubKeyError::InvalidPoint),
        }
    }

    /// Derive the Ethereum-style signer address.
    pub fn address(&self) -> Result<Address, PubKeyError> {
        self.validate()?;
        let hash = keccak256(self.without_prefix());
        let mut address = [0u8; 20];
        address.copy_from_slice(&hash[12..]);
        Ok(address)
    }
}

impl From<&k256::PublicKey> for PubKey {
    fn from(key: &k256::PublicKey) -> Self {
        Self(key.to_encoded_point(false).as_bytes().to_vec())
    }
}

impl From<Vec<u8>> for PubKey {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl fmt::Debug for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PubKey({})", crate::to_hex(&self.0))
    }
}

impl fmt::Display for PubKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::to_hex(&self.0))
    }
}
