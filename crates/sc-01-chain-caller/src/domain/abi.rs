//! # ABI Word Codec
//!
//! Minimal Solidity ABI handling for staking-info logs: 32-byte words,
//! left-padded addresses and integers, and a single trailing dynamic `bytes`
//! argument. Every read is bounds-checked and returns `None` on malformed
//! input.

use crate::domain::{Log, Receipt, StakingInfoEvent};
use shared_types::{Address, Hash, U256};

/// Size of one ABI word.
pub const WORD: usize = 32;

/// Decode the staking-info event at `log_index` from `receipt`.
///
/// Returns `None` unless the log exists, was emitted by `contract`, carries
/// the event's signature topic and decodes cleanly.
pub fn decode_event<E: StakingInfoEvent>(
    contract: &Address,
    receipt: &Receipt,
    log_index: u64,
) -> Option<E> {
    let log = receipt.log_at(log_index)?;
    if log.address != *contract {
        return None;
    }
    if log.topics.first() != Some(&E::topic()) {
        return None;
    }
    E::from_log(log)
}

/// Require exactly `count` topics (signature included).
pub(crate) fn expect_topics(log: &Log, count: usize) -> Option<&[Hash]> {
    (log.topics.len() == count).then_some(log.topics.as_slice())
}

/// Read the `index`-th head word of `data`.
pub(crate) fn word(data: &[u8], index: usize) -> Option<&[u8]> {
    let start = index.checked_mul(WORD)?;
    data.get(start..start.checked_add(WORD)?)
}

pub(crate) fn to_u256(word: &[u8]) -> U256 {
    U256::from_big_endian(word)
}

/// Narrow a word to `u64`, rejecting values that do not fit.
pub(crate) fn to_u64(word: &[u8]) -> Option<u64> {
    let value = to_u256(word);
    (value <= U256::from(u64::MAX)).then(|| value.as_u64())
}

/// Read a left-padded address; the 12 padding bytes must be zero.
pub(crate) fn to_address(word: &[u8]) -> Option<Address> {
    if word.len() != WORD || word[..12].iter().any(|b| *b != 0) {
        return None;
    }
    let mut address = [0u8; 20];
    address.copy_from_slice(&word[12..]);
    Some(address)
}

/// Read a dynamic `bytes` argument whose offset lives in head word `index`.
pub(crate) fn dynamic_bytes(data: &[u8], index: usize) -> Option<Vec<u8>> {
    let offset = usize::try_from(to_u64(word(data, index)?)?).ok()?;
    if offset % WORD != 0 {
        return None;
    }
    let len_word = data.get(offset..offset.checked_add(WORD)?)?;
    let len = usize::try_from(to_u64(len_word)?).ok()?;
    let start = offset + WORD;
    data.get(start..start.checked_add(len)?).map(<[u8]>::to_vec)
}

pub(crate) fn u256_word(value: U256) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    value.to_big_endian(&mut word);
    word
}

pub(crate) fn u64_word(value: u64) -> [u8; WORD] {
    u256_word(U256::from(value))
}

pub(crate) fn address_word(address: &Address) -> [u8; WORD] {
    let mut word = [0u8; WORD];
    word[12..].copy_from_slice(address);
    word
}

/// Encode a dynamic `bytes` tail: length word, then data right-padded.
pub(crate) fn bytes_tail(bytes: &[u8]) -> Vec<u8> {
    let padded = bytes.len().div_ceil(WORD) * WORD;
    let mut out = Vec::with_capacity(WORD + padded);
    out.extend_from_slice(&u64_word(bytes.len() as u64));
    out.extend_from_slice(bytes);
    out.resize(WORD + padded, 0);
    out
}
