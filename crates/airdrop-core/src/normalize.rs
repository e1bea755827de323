//! Claim normalization: validation plus canonical ordering.
//!
//! This is the only place claims are reordered. The output is sorted by
//! address (unsigned big-endian bytes) and each claim's `index` equals its
//! position, which makes the resulting commitment independent of input order.

use std::collections::HashSet;

use crate::error::{AirdropError, Result};
use crate::types::{Claim, RawClaim};

/// Validate and canonically order `raw` with no size limit.
///
/// Checks run in input order, so the reported error is the first offending
/// claim as the caller supplied them:
/// - empty input ⇒ [`AirdropError::EmptyInput`]
/// - zero amount ⇒ [`AirdropError::InvalidAmount`]
/// - zero address ⇒ [`AirdropError::ZeroAddress`]
/// - repeated address ⇒ [`AirdropError::DuplicateAddress`]
pub fn normalize(raw: &[RawClaim]) -> Result<Vec<Claim>> {
    normalize_with_limit(raw, usize::MAX)
}

/// Same as [`normalize`], additionally rejecting sets larger than `max_claims`
/// (or larger than the 32-bit index space).
pub fn normalize_with_limit(raw: &[RawClaim], max_claims: usize) -> Result<Vec<Claim>> {
    if raw.is_empty() {
        return Err(AirdropError::EmptyInput);
    }
    let max = max_claims.min(u32::MAX as usize);
    if raw.len() > max {
        return Err(AirdropError::TooManyClaims {
            count: raw.len(),
            max,
        });
    }

    let mut seen = HashSet::with_capacity(raw.len());
    for (position, c) in raw.iter().enumerate() {
        if c.amount.is_zero() {
            return Err(AirdropError::invalid_amount(format!(
                "zero amount for {} at input position {position}",
                c.address
            )));
        }
        if c.address.is_zero() {
            return Err(AirdropError::ZeroAddress { position });
        }
        if !seen.insert(c.address) {
            return Err(AirdropError::DuplicateAddress { address: c.address });
        }
    }

    let mut sorted: Vec<RawClaim> = raw.to_vec();
    // Addresses are unique, so an unstable sort is still deterministic.
    sorted.sort_unstable_by(|a, b| a.address.cmp(&b.address));

    let claims = sorted
        .into_iter()
        .zip(0u32..)
        .map(|(c, index)| Claim::new(c.address, c.amount, index))
        .collect();
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Address, Amount};

    fn addr(last: u8) -> Address {
        let mut b = [0xaa; 20];
        b[19] = last;
        Address::from_bytes(b)
    }

    fn raw(last: u8, amount: u64) -> RawClaim {
        RawClaim::new(addr(last), Amount::from(amount))
    }

    #[test]
    fn sorts_and_assigns_indices() {
        let out = normalize(&[raw(3, 30), raw(1, 10), raw(2, 20)]).unwrap();
        let got: Vec<(u8, u32)> = out
            .iter()
            .map(|c| (c.address.as_bytes()[19], c.index))
            .collect();
        assert_eq!(got, vec![(1, 0), (2, 1), (3, 2)]);
        assert_eq!(out[0].amount, Amount::from(10u64));
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(normalize(&[]), Err(AirdropError::EmptyInput));
    }

    #[test]
    fn rejects_zero_amount() {
        let err = normalize(&[raw(1, 10), raw(2, 0)]).unwrap_err();
        assert!(matches!(err, AirdropError::InvalidAmount { .. }));
    }

    #[test]
    fn rejects_zero_address() {
        let claims = [raw(1, 10), RawClaim::new(Address::ZERO, Amount::from(5u64))];
        assert_eq!(
            normalize(&claims),
            Err(AirdropError::ZeroAddress { position: 1 })
        );
    }

    #[test]
    fn rejects_duplicates() {
        let err = normalize(&[raw(1, 10), raw(2, 20), raw(1, 30)]).unwrap_err();
        assert_eq!(err, AirdropError::DuplicateAddress { address: addr(1) });
    }

    #[test]
    fn enforces_limit() {
        let err = normalize_with_limit(&[raw(1, 1), raw(2, 2)], 1).unwrap_err();
        assert_eq!(err, AirdropError::TooManyClaims { count: 2, max: 1 });
    }
}
