//! Inclusion proofs and their serialized form.
//!
//! A [`Proof`] is a plain value: sibling hashes bottom→top plus the claim's
//! index and amount. It carries no reference to the tree and is only
//! meaningful next to the root it was produced against.

use std::collections::BTreeMap;

use airdrop_core::{Address, Amount, Result};
use airdrop_crypto::{parse_hash_hex, to_hex, Hash32};
use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::tree::{next_level, MerkleTree};

/// Merkle inclusion proof: siblings bottom→top plus the leaf's index and amount.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Proof {
    /// Sibling hashes from the leaf level up to (excluding) the root.
    pub siblings: Vec<Hash32>,
    /// Canonical index of the claim.
    pub index: u32,
    /// Claimed amount.
    pub amount: Amount,
}

impl Proof {
    /// Assemble a proof.
    #[must_use]
    pub const fn new(siblings: Vec<Hash32>, index: u32, amount: Amount) -> Self {
        Self {
            siblings,
            index,
            amount,
        }
    }

    /// Serialized form (hex siblings, decimal amount).
    #[must_use]
    pub fn to_record(&self) -> ProofRecord {
        ProofRecord {
            proof: self.siblings.iter().map(to_hex).collect(),
            index: self.index,
            amount: self.amount,
        }
    }
}

/// Derive the sibling path for `index` by recomputing every level from `leaves`.
///
/// At each level the target's neighbour (`index ^ 1`, or the target itself when
/// it is an unpaired trailing node) is recorded, the level is paired exactly as
/// the tree builder pairs it, and the index is halved. Returns `None` when
/// `index` is out of range.
///
/// This is O(n) per call; bulk generation should go through
/// [`crate::pipeline::generate_all_proofs`], which reads the stored levels.
#[must_use]
pub fn proof_path(leaves: &[Hash32], index: usize) -> Option<Vec<Hash32>> {
    if index >= leaves.len() {
        return None;
    }
    let mut level = leaves.to_vec();
    let mut idx = index;
    let mut siblings = Vec::new();
    while level.len() > 1 {
        let sib = if (idx ^ 1) < level.len() { idx ^ 1 } else { idx };
        siblings.push(level[sib]);
        level = next_level(&level);
        idx /= 2;
    }
    Some(siblings)
}

/* ----------------------------- serialized form ----------------------------- */

/// Text form of a proof handed to claimants and the on-chain verifier.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofRecord {
    /// `0x`-prefixed hex sibling hashes, bottom→top.
    pub proof: Vec<String>,
    /// Canonical index.
    pub index: u32,
    /// Amount as a decimal string.
    pub amount: Amount,
}

impl ProofRecord {
    /// Decode back into a [`Proof`]. Any sibling that is not 32 bytes of hex is
    /// [`airdrop_core::AirdropError::HashLengthMismatch`].
    pub fn to_proof(&self) -> Result<Proof> {
        let siblings = self
            .proof
            .iter()
            .map(|h| parse_hash_hex(h))
            .collect::<Result<Vec<_>>>()?;
        Ok(Proof::new(siblings, self.index, self.amount))
    }
}

/// Root plus every claimant's proof record, keyed by address.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProofBundle {
    /// `0x`-prefixed hex root.
    pub merkle_root: String,
    /// Number of claims committed.
    pub total_claims: usize,
    /// Proof records by address.
    pub proofs: BTreeMap<Address, ProofRecord>,
}

impl ProofBundle {
    /// Bundle a tree's root with a proof map produced against it.
    #[must_use]
    pub fn new(tree: &MerkleTree, proofs: &BTreeMap<Address, Proof>) -> Self {
        Self {
            merkle_root: tree.root_hex(),
            total_claims: tree.len(),
            proofs: proofs
                .iter()
                .map(|(addr, p)| (*addr, p.to_record()))
                .collect(),
        }
    }

    /// Pretty JSON.
    pub fn to_json_pretty(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serialize proof bundle")
    }

    /// Parse from JSON.
    pub fn from_json_str(s: &str) -> anyhow::Result<Self> {
        serde_json::from_str(s).context("deserialize proof bundle")
    }
}
