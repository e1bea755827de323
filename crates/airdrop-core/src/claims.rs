//! Claim-set utilities used around normalization: synthetic data, dedup,
//! filtering, batching, and totals.

use primitive_types::U256;
use std::collections::HashSet;

use crate::error::{AirdropError, Result};
use crate::types::{Address, Amount, RawClaim};

/// Token decimals used by [`generate_claims`].
pub const TOKEN_DECIMALS: usize = 18;

/// Deterministic synthetic claim set.
///
/// Claim `i` goes to the address whose 40 hex digits spell `i + 1` in zero-padded
/// decimal (so `0x0000…0001`, `0x0000…0002`, …, `0x0000…0010`), with an amount of
/// `((i mod 1000) + 1) × 10^18`.
#[must_use]
pub fn generate_claims(count: usize) -> Vec<RawClaim> {
    let unit = U256::exp10(TOKEN_DECIMALS);
    (0..count)
        .map(|i| {
            let tokens = U256::from((i % 1000) as u64 + 1);
            RawClaim::new(decimal_digits_address(i as u128 + 1), Amount::new(tokens * unit))
        })
        .collect()
}

/// Pack the 40-digit zero-padded decimal rendering of `n` as hex nibbles.
fn decimal_digits_address(n: u128) -> Address {
    let digits = format!("{n:040}");
    let d = digits.as_bytes();
    let mut out = [0u8; 20];
    for (k, byte) in out.iter_mut().enumerate() {
        *byte = ((d[2 * k] - b'0') << 4) | (d[2 * k + 1] - b'0');
    }
    Address::from_bytes(out)
}

/// Keep the first occurrence of each address, preserving input order.
#[must_use]
pub fn deduplicate(claims: &[RawClaim]) -> Vec<RawClaim> {
    let mut seen = HashSet::with_capacity(claims.len());
    claims
        .iter()
        .filter(|c| seen.insert(c.address))
        .copied()
        .collect()
}

/// Selection criteria for [`filter`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimFilter {
    /// Inclusive lower bound on amount.
    pub min_amount: Option<Amount>,
    /// Inclusive upper bound on amount.
    pub max_amount: Option<Amount>,
    /// Always dropped (takes precedence over `include`).
    pub exclude: Vec<Address>,
    /// When non-empty, only these addresses are kept.
    pub include: Vec<Address>,
}

impl ClaimFilter {
    /// Whether `claim` passes every criterion.
    #[must_use]
    pub fn accepts(&self, claim: &RawClaim) -> bool {
        if self.exclude.contains(&claim.address) {
            return false;
        }
        if !self.include.is_empty() && !self.include.contains(&claim.address) {
            return false;
        }
        if self.min_amount.is_some_and(|min| claim.amount < min) {
            return false;
        }
        if self.max_amount.is_some_and(|max| claim.amount > max) {
            return false;
        }
        true
    }
}

/// Claims accepted by `criteria`, in input order.
#[must_use]
pub fn filter(claims: &[RawClaim], criteria: &ClaimFilter) -> Vec<RawClaim> {
    claims
        .iter()
        .filter(|c| criteria.accepts(c))
        .copied()
        .collect()
}

/// Split into contiguous batches of at most `batch_size` (0 ⇒ one batch).
#[must_use]
pub fn split_batches(claims: &[RawClaim], batch_size: usize) -> Vec<&[RawClaim]> {
    if batch_size == 0 {
        return vec![claims];
    }
    claims.chunks(batch_size).collect()
}

/// Sum of all amounts; overflow past 256 bits is [`AirdropError::InvalidAmount`].
pub fn total_amount<'a, I>(amounts: I) -> Result<Amount>
where
    I: IntoIterator<Item = &'a Amount>,
{
    amounts.into_iter().try_fold(Amount::ZERO, |acc, a| {
        acc.checked_add(*a)
            .ok_or_else(|| AirdropError::invalid_amount("total amount overflows 256 bits"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_addresses_follow_decimal_digits() {
        let claims = generate_claims(12);
        assert_eq!(
            claims[0].address.to_string(),
            "0x0000000000000000000000000000000000000001"
        );
        assert_eq!(
            claims[9].address.to_string(),
            "0x0000000000000000000000000000000000000010"
        );
        assert_eq!(
            claims[0].amount,
            Amount::from_dec_str("1000000000000000000").unwrap()
        );
        assert_eq!(
            claims[11].amount,
            Amount::from_dec_str("12000000000000000000").unwrap()
        );
    }

    #[test]
    fn generated_amounts_wrap_every_thousand() {
        let claims = generate_claims(1001);
        assert_eq!(claims[1000].amount, claims[0].amount);
    }

    #[test]
    fn dedup_keeps_first() {
        let a = Address::from_bytes([1; 20]);
        let b = Address::from_bytes([2; 20]);
        let input = [
            RawClaim::new(a, Amount::from(1u64)),
            RawClaim::new(b, Amount::from(2u64)),
            RawClaim::new(a, Amount::from(3u64)),
        ];
        let out = deduplicate(&input);
        assert_eq!(out, vec![input[0], input[1]]);
    }

    #[test]
    fn filter_precedence_and_bounds() {
        let claims = generate_claims(5);
        let f = ClaimFilter {
            min_amount: Some(claims[1].amount),
            max_amount: Some(claims[3].amount),
            exclude: vec![claims[2].address],
            include: vec![],
        };
        let out = filter(&claims, &f);
        assert_eq!(out, vec![claims[1], claims[3]]);

        let only = ClaimFilter {
            include: vec![claims[4].address, claims[0].address],
            exclude: vec![claims[0].address],
            ..ClaimFilter::default()
        };
        assert_eq!(filter(&claims, &only), vec![claims[4]]);
    }

    #[test]
    fn batches() {
        let claims = generate_claims(5);
        let b = split_batches(&claims, 2);
        assert_eq!(b.iter().map(|s| s.len()).collect::<Vec<_>>(), vec![2, 2, 1]);
        assert_eq!(split_batches(&claims, 0).len(), 1);
    }

    #[test]
    fn total_detects_overflow() {
        let max = Amount::new(U256::MAX);
        assert!(total_amount(&[max, Amount::from(1u64)]).is_err());
        assert_eq!(
            total_amount(&[Amount::from(2u64), Amount::from(3u64)]).unwrap(),
            Amount::from(5u64)
        );
    }
}
