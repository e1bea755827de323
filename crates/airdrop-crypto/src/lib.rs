//! Hashing substrate shared by the tree builder and the verifier.
//!
//! Both sides of the commitment boundary (this workspace and the on-chain
//! claim contract) must agree on these byte layouts exactly:
//!
//! - **Leaf**: `keccak256(pad32(address) ‖ be32(amount) ‖ be4(index))`, one hash
//!   over the 68-byte concatenation. Contracts that hash each field separately
//!   before combining are *not* compatible with this scheme.
//! - **Node**: `keccak256(min(a, b) ‖ max(a, b))`, comparing the two children as
//!   raw bytes, so combination does not depend on which child is left.

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::unwrap_used,
    clippy::expect_used
)]

use airdrop_core::{Address, AirdropError, Amount, Claim, Result};
use sha3::{Digest, Keccak256};

/// 32-byte digest.
pub type Hash32 = [u8; 32];

/// Width of every digest in bytes.
pub const HASH_LEN: usize = 32;

/// Width of the leaf encoding: 32 (address) + 32 (amount) + 4 (index).
pub const LEAF_ENCODING_LEN: usize = 68;

/// Keccak-256 of `data`.
#[inline]
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash32 {
    let digest = Keccak256::digest(data);
    let mut out = [0u8; HASH_LEN];
    out.copy_from_slice(&digest);
    out
}

/* --------------------------------- leaves --------------------------------- */

/// Fixed-width leaf encoding. The buffer lives on the caller's stack, so
/// concurrent callers never share scratch space.
#[must_use]
pub fn encode_leaf(address: &Address, amount: &Amount, index: u32) -> [u8; LEAF_ENCODING_LEN] {
    let mut buf = [0u8; LEAF_ENCODING_LEN];
    buf[..32].copy_from_slice(&address.to_word());
    buf[32..64].copy_from_slice(&amount.to_be_bytes());
    buf[64..].copy_from_slice(&index.to_be_bytes());
    buf
}

/// Leaf hash from individual fields.
#[inline]
#[must_use]
pub fn hash_leaf_parts(address: &Address, amount: &Amount, index: u32) -> Hash32 {
    keccak256(&encode_leaf(address, amount, index))
}

/// Leaf hash of a normalized claim.
#[inline]
#[must_use]
pub fn hash_leaf(claim: &Claim) -> Hash32 {
    hash_leaf_parts(&claim.address, &claim.amount, claim.index)
}

/* ---------------------------------- nodes --------------------------------- */

/// Sorted-pair parent hash: the byte-wise smaller child goes first.
#[inline]
#[must_use]
pub fn hash_pair(a: &Hash32, b: &Hash32) -> Hash32 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 2 * HASH_LEN];
    buf[..HASH_LEN].copy_from_slice(lo);
    buf[HASH_LEN..].copy_from_slice(hi);
    keccak256(&buf)
}

/// [`hash_pair`] over unchecked slices; anything other than 32 bytes is
/// [`AirdropError::HashLengthMismatch`].
pub fn hash_pair_slices(a: &[u8], b: &[u8]) -> Result<Hash32> {
    Ok(hash_pair(&hash_from_slice(a)?, &hash_from_slice(b)?))
}

/* --------------------------------- helpers -------------------------------- */

/// Copy a slice into a [`Hash32`], checking its width.
pub fn hash_from_slice(bytes: &[u8]) -> Result<Hash32> {
    <Hash32>::try_from(bytes).map_err(|_| AirdropError::HashLengthMismatch {
        expected: HASH_LEN,
        found: bytes.len(),
    })
}

/// `0x`-prefixed lowercase hex.
#[must_use]
pub fn to_hex(h: &Hash32) -> String {
    format!("0x{}", hex::encode(h))
}

/// Parse `0x`-prefixed (or bare) hex into a [`Hash32`].
///
/// Any input that does not decode to exactly 32 bytes (odd length, non-hex
/// digits, wrong width) is [`AirdropError::HashLengthMismatch`]; `found`
/// reports the decoded width, or 0 when decoding failed.
pub fn parse_hash_hex(s: &str) -> Result<Hash32> {
    let digits = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s);
    let bytes = hex::decode(digits).map_err(|_| AirdropError::HashLengthMismatch {
        expected: HASH_LEN,
        found: 0,
    })?;
    hash_from_slice(&bytes)
}
