//! Proof verification, independent of the tree that produced the proof.
//!
//! Recompute the leaf from `(address, amount, index)`, fold the siblings
//! through the sorted-pair hash, compare against the root byte-for-byte.
//! A mismatch is `false`, never an error; only structurally invalid input
//! (a hash that is not 32 bytes) is reported as one.

use airdrop_core::{Address, Amount, Claim, Result};
use airdrop_crypto::{hash_from_slice, hash_leaf_parts, hash_pair, parse_hash_hex, Hash32};

use crate::proof::{Proof, ProofRecord};

/// Fold `siblings` (bottom→top) onto `leaf`.
#[must_use]
pub fn fold_siblings(leaf: Hash32, siblings: &[Hash32]) -> Hash32 {
    siblings.iter().fold(leaf, |acc, sib| hash_pair(&acc, sib))
}

/// `true` iff `leaf` folds to `root` through `siblings`.
#[inline]
#[must_use]
pub fn verify_leaf(root: &Hash32, leaf: Hash32, siblings: &[Hash32]) -> bool {
    fold_siblings(leaf, siblings) == *root
}

/// `true` iff `claim` is committed under `root`.
#[must_use]
pub fn verify_claim(root: &Hash32, claim: &Claim, siblings: &[Hash32]) -> bool {
    let leaf = hash_leaf_parts(&claim.address, &claim.amount, claim.index);
    verify_leaf(root, leaf, siblings)
}

/// `true` iff `proof` (with its own index and amount) commits `address` under `root`.
#[must_use]
pub fn verify_proof(root: &Hash32, address: &Address, proof: &Proof) -> bool {
    let leaf = hash_leaf_parts(address, &proof.amount, proof.index);
    verify_leaf(root, leaf, &proof.siblings)
}

/// Verify a serialized proof record against a hex root.
///
/// A root or sibling that does not decode to 32 bytes is
/// [`airdrop_core::AirdropError::HashLengthMismatch`].
pub fn verify_record(root_hex: &str, address: &Address, record: &ProofRecord) -> Result<bool> {
    let root = parse_hash_hex(root_hex)?;
    ProofVerifier::new(root).verify_record(address, record)
}

/// Verifier bound to one committed root.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProofVerifier {
    root: Hash32,
}

impl ProofVerifier {
    /// Verifier for `root`.
    #[must_use]
    pub const fn new(root: Hash32) -> Self {
        Self { root }
    }

    /// Verifier for a `0x`-prefixed hex root.
    pub fn from_hex(root_hex: &str) -> Result<Self> {
        parse_hash_hex(root_hex).map(Self::new)
    }

    /// The root proofs are checked against.
    #[must_use]
    pub const fn root(&self) -> Hash32 {
        self.root
    }

    /// See [`verify_claim`].
    #[must_use]
    pub fn verify_claim(&self, claim: &Claim, siblings: &[Hash32]) -> bool {
        verify_claim(&self.root, claim, siblings)
    }

    /// See [`verify_proof`].
    #[must_use]
    pub fn verify_proof(&self, address: &Address, proof: &Proof) -> bool {
        verify_proof(&self.root, address, proof)
    }

    /// Verify with siblings given as raw byte slices of unchecked width.
    pub fn verify_raw(
        &self,
        address: &Address,
        amount: &Amount,
        index: u32,
        siblings: &[&[u8]],
    ) -> Result<bool> {
        let siblings = siblings
            .iter()
            .map(|s| hash_from_slice(s))
            .collect::<Result<Vec<_>>>()?;
        let leaf = hash_leaf_parts(address, amount, index);
        Ok(verify_leaf(&self.root, leaf, &siblings))
    }

    /// Verify a serialized proof record.
    pub fn verify_record(&self, address: &Address, record: &ProofRecord) -> Result<bool> {
        let proof = record.to_proof()?;
        Ok(self.verify_proof(address, &proof))
    }
}
