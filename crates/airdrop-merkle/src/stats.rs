//! Summary statistics over a built tree and its proof map.

use airdrop_core::{claims::total_amount, Amount, Result};
use serde::Serialize;

use crate::pipeline::ProofMap;
use crate::tree::MerkleTree;

/// Aggregate figures reported after a proof run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeStats {
    /// Number of committed claims.
    pub total_claims: usize,
    /// Pairing rounds from leaves to root.
    pub height: usize,
    /// Mean number of siblings per proof (0 for an empty map).
    pub average_proof_len: f64,
    /// Sum of all claimed amounts.
    pub total_amount: Amount,
}

impl TreeStats {
    /// Collect statistics; fails only if the amount total overflows 256 bits.
    pub fn collect(tree: &MerkleTree, proofs: &ProofMap) -> Result<Self> {
        let siblings: usize = proofs.values().map(|p| p.siblings.len()).sum();
        #[allow(clippy::cast_precision_loss)]
        let average_proof_len = if proofs.is_empty() {
            0.0
        } else {
            siblings as f64 / proofs.len() as f64
        };
        Ok(Self {
            total_claims: tree.len(),
            height: tree.height(),
            average_proof_len,
            total_amount: total_amount(tree.claims().iter().map(|c| &c.amount))?,
        })
    }
}
