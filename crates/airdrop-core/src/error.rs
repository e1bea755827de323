//! Error taxonomy shared by every airdrop crate.
//!
//! Normalization and construction errors surface before any tree exists, so a
//! caller never observes a partially built commitment. Everything except
//! [`AirdropError::HashLengthMismatch`] is recoverable by fixing the input.

use thiserror::Error;

use crate::types::Address;

/// Errors produced while normalizing claims, building trees, or verifying proofs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AirdropError {
    /// No claims were supplied.
    #[error("no claims provided")]
    EmptyInput,

    /// The same address appears more than once in the claim set.
    #[error("duplicate address {address}")]
    DuplicateAddress {
        /// Offending address.
        address: Address,
    },

    /// Amount is zero, negative, malformed, or does not fit in 256 bits.
    #[error("invalid amount: {reason}")]
    InvalidAmount {
        /// Human-readable cause.
        reason: String,
    },

    /// A claim targets the all-zero address.
    #[error("zero address at input position {position}")]
    ZeroAddress {
        /// Position of the claim in the caller's (unsorted) input.
        position: usize,
    },

    /// A textual address could not be parsed.
    #[error("invalid address: {input}")]
    InvalidAddress {
        /// The rejected input.
        input: String,
    },

    /// Proof requested for an address that is not part of the committed set.
    #[error("address {address} not found in claim set")]
    AddressNotFound {
        /// Requested address.
        address: Address,
    },

    /// Hash material of the wrong width was supplied.
    #[error("hash length mismatch: expected {expected} bytes, found {found}")]
    HashLengthMismatch {
        /// Required width in bytes.
        expected: usize,
        /// Width actually supplied.
        found: usize,
    },

    /// The claim set exceeds the configured limit.
    #[error("too many claims: {count} exceeds the limit of {max}")]
    TooManyClaims {
        /// Number of claims supplied.
        count: usize,
        /// Configured maximum.
        max: usize,
    },

    /// A proof-derivation unit failed inside the pipeline; the batch was discarded.
    #[error("proof generation failed for {address}: {source}")]
    WorkerFailure {
        /// Address whose unit failed first.
        address: Address,
        /// Underlying failure.
        #[source]
        source: Box<AirdropError>,
    },

    /// The worker pool could not be started.
    #[error("worker pool unavailable: {reason}")]
    WorkerPool {
        /// Underlying cause.
        reason: String,
    },
}

impl AirdropError {
    /// Shorthand for [`AirdropError::InvalidAmount`].
    pub fn invalid_amount(reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            reason: reason.into(),
        }
    }

    /// `true` for integrity violations that a retry with the same caller cannot fix.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::HashLengthMismatch { .. } => true,
            Self::WorkerFailure { source, .. } => source.is_fatal(),
            _ => false,
        }
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, AirdropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_hash_mismatch_is_fatal() {
        let mismatch = AirdropError::HashLengthMismatch {
            expected: 32,
            found: 31,
        };
        assert!(mismatch.is_fatal());
        assert!(!AirdropError::EmptyInput.is_fatal());

        let wrapped = AirdropError::WorkerFailure {
            address: Address::from_bytes([1u8; 20]),
            source: Box::new(mismatch),
        };
        assert!(wrapped.is_fatal());
    }

    #[test]
    fn messages_name_the_offender() {
        let e = AirdropError::DuplicateAddress {
            address: Address::from_bytes([0xab; 20]),
        };
        assert_eq!(
            e.to_string(),
            "duplicate address 0xabababababababababababababababababababab"
        );
    }
}
