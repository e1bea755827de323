//! Canonical claim types shared across the airdrop workspace.
//!
//! Serialized forms stay text-friendly: addresses are `0x`-prefixed lowercase
//! hex and amounts are decimal strings so arbitrary precision survives JSON.

use primitive_types::U256;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{AirdropError, Result};

/// Width of a recipient address in bytes.
pub const ADDRESS_LEN: usize = 20;

/// 20-byte recipient identifier.
///
/// `Ord` is the unsigned big-endian byte order, which is the canonical claim order.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Address([u8; ADDRESS_LEN]);

impl Address {
    /// The all-zero address (never a valid recipient).
    pub const ZERO: Self = Self([0u8; ADDRESS_LEN]);

    /// Wrap raw bytes.
    #[inline]
    #[must_use]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw bytes.
    #[inline]
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }

    /// Returns `true` for the all-zero address.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; ADDRESS_LEN]
    }

    /// Address left-padded to a 32-byte word (12 zero bytes, then the address).
    #[must_use]
    pub fn to_word(&self) -> [u8; 32] {
        let mut word = [0u8; 32];
        word[32 - ADDRESS_LEN..].copy_from_slice(&self.0);
        word
    }
}

impl FromStr for Address {
    type Err = AirdropError;

    /// Accepts exactly 40 hex digits, with or without a `0x`/`0X` prefix.
    fn from_str(s: &str) -> Result<Self> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        let invalid = || AirdropError::InvalidAddress {
            input: s.to_string(),
        };
        if digits.len() != ADDRESS_LEN * 2 {
            return Err(invalid());
        }
        let mut out = [0u8; ADDRESS_LEN];
        hex::decode_to_slice(digits, &mut out).map_err(|_| invalid())?;
        Ok(Self(out))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}

impl Serialize for Address {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Non-negative integer amount bounded to 256 bits (the on-chain word size).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Amount(U256);

impl Amount {
    /// Zero.
    pub const ZERO: Self = Self(U256([0; 4]));

    /// Wrap a 256-bit value.
    #[inline]
    #[must_use]
    pub const fn new(value: U256) -> Self {
        Self(value)
    }

    /// Parse a decimal string. Signs, non-digits, empty input, and values wider
    /// than 256 bits are rejected as [`AirdropError::InvalidAmount`].
    pub fn from_dec_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AirdropError::invalid_amount("empty amount"));
        }
        if s.starts_with('-') {
            return Err(AirdropError::invalid_amount(format!("negative amount {s}")));
        }
        if !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(AirdropError::invalid_amount(format!("not a decimal integer: {s}")));
        }
        U256::from_dec_str(s)
            .map(Self)
            .map_err(|_| AirdropError::invalid_amount(format!("{s} does not fit in 256 bits")))
    }

    /// Inner value.
    #[inline]
    #[must_use]
    pub const fn value(&self) -> U256 {
        self.0
    }

    /// Returns `true` when the amount is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// 32-byte big-endian encoding.
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let mut out = [0u8; 32];
        self.0.to_big_endian(&mut out);
        out
    }

    /// Checked addition (`None` on 256-bit overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }
}

impl From<u64> for Amount {
    fn from(v: u64) -> Self {
        Self(U256::from(v))
    }
}

impl From<u128> for Amount {
    fn from(v: u128) -> Self {
        Self(U256::from(v))
    }
}

impl FromStr for Amount {
    type Err = AirdropError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_dec_str(s)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Amount({})", self.0)
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::from_dec_str(&s).map_err(de::Error::custom)
    }
}

/// A claim as delivered by an external loader, before canonical ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawClaim {
    /// Recipient.
    pub address: Address,
    /// Claimable amount.
    pub amount: Amount,
}

impl RawClaim {
    /// Construct a raw claim.
    #[inline]
    #[must_use]
    pub const fn new(address: Address, amount: Amount) -> Self {
        Self { address, amount }
    }
}

/// A normalized claim: `index` is its position in the canonical (address-sorted) order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Claim {
    /// Recipient.
    pub address: Address,
    /// Claimable amount.
    pub amount: Amount,
    /// Position in the canonical ordering.
    pub index: u32,
}

impl Claim {
    /// Construct a claim with an explicit index (callers outside normalization
    /// should only do this to rebuild a claim they already know to be canonical).
    #[inline]
    #[must_use]
    pub const fn new(address: Address, amount: Amount, index: u32) -> Self {
        Self {
            address,
            amount,
            index,
        }
    }

    /// Drop the index.
    #[inline]
    #[must_use]
    pub const fn raw(&self) -> RawClaim {
        RawClaim::new(self.address, self.amount)
    }
}
