//! Merkle tree over normalized claims, stored as a flat arena of levels.
//!
//! `levels[0]` holds the leaf hashes in canonical claim order and
//! `levels.last()` holds the single root. Nodes are addressed by
//! `(level, position)`; the children of `(k, i)` are `(k-1, 2i)` and
//! `(k-1, 2i+1)`, or `(k-1, 2i)` twice when that level has an odd length.

use std::collections::HashMap;

use airdrop_core::{
    normalize, normalize_with_limit, Address, AirdropError, Claim, PipelineConfig, RawClaim, Result,
};
use airdrop_crypto::{hash_leaf, hash_pair, to_hex, Hash32};
use tracing::debug;

use crate::proof::{proof_path, Proof};

/// Immutable commitment over a canonical claim sequence.
#[derive(Clone, Debug)]
pub struct MerkleTree {
    claims: Vec<Claim>,
    levels: Vec<Vec<Hash32>>,
    root: Hash32,
    by_address: HashMap<Address, u32>,
}

impl MerkleTree {
    /// Normalize `raw` (no size limit) and build the tree.
    pub fn build(raw: &[RawClaim]) -> Result<Self> {
        Self::build_with_config(raw, &PipelineConfig::default())
    }

    /// Normalize `raw` under `config.max_claims` and build the tree.
    pub fn build_with_config(raw: &[RawClaim], config: &PipelineConfig) -> Result<Self> {
        let claims = normalize_with_limit(raw, config.max_claims)?;
        Self::from_normalized(claims)
    }

    /// Rebuild from previously indexed claims. Indices are ignored and
    /// reassigned, so any order of the same claims yields the same tree.
    pub fn from_claims(claims: &[Claim]) -> Result<Self> {
        let raw: Vec<RawClaim> = claims.iter().map(Claim::raw).collect();
        Self::from_normalized(normalize(&raw)?)
    }

    /// `claims` must come straight from normalization.
    fn from_normalized(claims: Vec<Claim>) -> Result<Self> {
        let leaves: Vec<Hash32> = claims.iter().map(hash_leaf).collect();
        let levels = build_levels(leaves);
        let root = levels
            .last()
            .and_then(|top| top.first())
            .copied()
            .ok_or(AirdropError::EmptyInput)?;
        let by_address = claims.iter().map(|c| (c.address, c.index)).collect();

        debug!(
            leaves = claims.len(),
            height = levels.len() - 1,
            root = %to_hex(&root),
            "merkle tree built"
        );

        Ok(Self {
            claims,
            levels,
            root,
            by_address,
        })
    }

    /// Root digest.
    #[inline]
    #[must_use]
    pub const fn root(&self) -> Hash32 {
        self.root
    }

    /// Root as `0x`-prefixed hex.
    #[must_use]
    pub fn root_hex(&self) -> String {
        to_hex(&self.root)
    }

    /// Number of pairing rounds from the leaves to the root.
    #[inline]
    #[must_use]
    pub fn height(&self) -> usize {
        self.levels.len() - 1
    }

    /// Number of leaves (claims).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.claims.len()
    }

    /// Never `true` in practice: construction rejects empty claim sets.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    /// Canonical claim sequence.
    #[inline]
    #[must_use]
    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Leaf hashes in canonical order.
    #[inline]
    #[must_use]
    pub fn leaves(&self) -> &[Hash32] {
        &self.levels[0]
    }

    /// Leaf hash at canonical position `i`.
    #[must_use]
    pub fn leaf(&self, i: usize) -> Option<Hash32> {
        self.leaves().get(i).copied()
    }

    /// Hashes at level `k` (0 = leaves), if it exists.
    #[must_use]
    pub fn level(&self, k: usize) -> Option<&[Hash32]> {
        self.levels.get(k).map(Vec::as_slice)
    }

    /// Canonical index of `address`.
    #[must_use]
    pub fn index_of(&self, address: &Address) -> Option<u32> {
        self.by_address.get(address).copied()
    }

    /// Claim for `address`.
    #[must_use]
    pub fn claim(&self, address: &Address) -> Option<&Claim> {
        self.index_of(address).map(|i| &self.claims[i as usize])
    }

    /// Inclusion proof for `address`, read from the stored levels (O(log n)).
    pub fn proof(&self, address: &Address) -> Result<Proof> {
        let index = self
            .index_of(address)
            .ok_or(AirdropError::AddressNotFound { address: *address })?;
        Ok(self.proof_at(index as usize))
    }

    /// Inclusion proof for `address`, recomputing every level from the leaves
    /// (O(n)). Produces exactly what [`Self::proof`] returns.
    pub fn derive_proof(&self, address: &Address) -> Result<Proof> {
        let not_found = || AirdropError::AddressNotFound { address: *address };
        let index = self.index_of(address).ok_or_else(not_found)?;
        let siblings = proof_path(self.leaves(), index as usize).ok_or_else(not_found)?;
        Ok(Proof::new(siblings, index, self.claims[index as usize].amount))
    }

    /// Proof for the claim at canonical position `index` (must be `< len()`).
    pub(crate) fn proof_at(&self, index: usize) -> Proof {
        let mut idx = index;
        let mut siblings = Vec::with_capacity(self.height());
        for level in &self.levels[..self.levels.len() - 1] {
            let sib = if (idx ^ 1) < level.len() { idx ^ 1 } else { idx };
            siblings.push(level[sib]);
            idx >>= 1;
        }
        let claim = &self.claims[index];
        Proof::new(siblings, claim.index, claim.amount)
    }
}

/// Fold leaves bottom-up into every level, ending with a single root.
///
/// Adjacent pairs `(0,1), (2,3), …` are combined with [`hash_pair`]; an odd
/// trailing node is combined with itself. An empty input yields one empty level.
#[must_use]
pub fn build_levels(leaves: Vec<Hash32>) -> Vec<Vec<Hash32>> {
    let mut levels = vec![leaves];
    loop {
        let top = &levels[levels.len() - 1];
        if top.len() <= 1 {
            break;
        }
        let next = next_level(top);
        levels.push(next);
    }
    levels
}

/// One pairing round.
#[must_use]
pub fn next_level(level: &[Hash32]) -> Vec<Hash32> {
    level
        .chunks(2)
        // A one-element chunk pairs with itself.
        .map(|pair| hash_pair(&pair[0], &pair[pair.len() - 1]))
        .collect()
}

/// Root over `leaves` without retaining intermediate levels.
#[must_use]
pub fn merkle_root(leaves: &[Hash32]) -> Option<Hash32> {
    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = next_level(&level);
    }
    level.first().copied()
}

/// Height of a tree with `n` leaves: `ceil(log2(n))`, 0 for `n <= 1`.
#[must_use]
pub const fn tree_height(n: usize) -> usize {
    let mut height = 0;
    let mut nodes = n;
    while nodes > 1 {
        nodes = (nodes + 1) / 2;
        height += 1;
    }
    height
}
