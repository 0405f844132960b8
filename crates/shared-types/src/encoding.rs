//! # Hex Encoding
//!
//! Byte fields cross the JSON boundary (external-chain RPC, operator message
//! files) as `0x`-prefixed lowercase hex.

use crate::{Address, Hash, HexError};
use serde::{de::Error as _, Deserialize, Deserializer, Serializer};
use serde_with::{DeserializeAs, SerializeAs};

/// Encode bytes as `0x`-prefixed lowercase hex.
pub fn to_hex(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode hex with or without a `0x` prefix.
pub fn decode_hex(s: &str) -> Result<Vec<u8>, HexError> {
    let stripped = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    hex::decode(stripped).map_err(|e| HexError::Invalid(e.to_string()))
}

fn decode_fixed<const N: usize>(s: &str) -> Result<[u8; N], HexError> {
    let bytes = decode_hex(s)?;
    let actual = bytes.len();
    bytes.try_into().map_err(|_| HexError::InvalidLength {
        expected: N,
        actual,
    })
}

/// Parse a 32-byte hash.
pub fn parse_hash(s: &str) -> Result<Hash, HexError> {
    decode_fixed::<32>(s)
}

/// Parse a 20-byte address.
pub fn parse_address(s: &str) -> Result<Address, HexError> {
    decode_fixed::<20>(s)
}

/// `serde_with` adapter serializing any byte container as `0x`-prefixed hex.
///
/// ```rust,ignore
/// #[serde_as]
/// #[derive(Serialize, Deserialize)]
/// struct Claim {
///     #[serde_as(as = "PrefixedHex")]
///     tx_hash: Hash,
/// }
/// ```
pub struct PrefixedHex;

impl<T: AsRef<[u8]>> SerializeAs<T> for PrefixedHex {
    fn serialize_as<S: Serializer>(source: &T, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex(source.as_ref()))
    }
}

impl<'de, T: TryFrom<Vec<u8>>> DeserializeAs<'de, T> for PrefixedHex {
    fn deserialize_as<D: Deserializer<'de>>(deserializer: D) -> Result<T, D::Error> {
        let s = String::deserialize(deserializer)?;
        let bytes = decode_hex(&s).map_err(D::Error::custom)?;
        let len = bytes.len();
        T::try_from(bytes)
            .map_err(|_| D::Error::custom(format!("unexpected byte length {len}")))
    }
}
