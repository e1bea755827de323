//! Parallel proof generation over a fixed-size worker pool.
//!
//! The tree is shared read-only by every unit, so no locking is needed. Any
//! failing unit aborts the batch: callers get the complete proof map or an
//! error, never a partial map.

use std::collections::BTreeMap;

use airdrop_core::{Address, AirdropError, PipelineConfig, Result};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::proof::Proof;
use crate::tree::MerkleTree;

/// Proofs keyed by claimant address.
pub type ProofMap = BTreeMap<Address, Proof>;

/// Run `unit` over `items` on a dedicated pool of `workers` threads.
///
/// Results keep input order. The first error observed stops scheduling of new
/// units; units already in flight may finish, but their results are dropped.
pub fn fan_out<T, R, F>(items: &[T], workers: usize, unit: F) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
    F: Fn(&T) -> Result<R> + Sync,
{
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(workers.max(1))
        .thread_name(|i| format!("airdrop-proof-{i}"))
        .build()
        .map_err(|e| AirdropError::WorkerPool {
            reason: e.to_string(),
        })?;
    pool.install(|| items.par_iter().map(|item| unit(item)).collect())
}

/// Proof for every claim in `tree`, using `config.effective_workers` threads.
pub fn generate_all_proofs(tree: &MerkleTree, config: &PipelineConfig) -> Result<ProofMap> {
    generate_with(tree, config, |tree, address| tree.proof(address))
}

/// Same as [`generate_all_proofs`] with a caller-supplied derivation unit.
///
/// A unit error is reported as [`AirdropError::WorkerFailure`] naming the
/// address whose unit failed.
pub fn generate_with<F>(tree: &MerkleTree, config: &PipelineConfig, unit: F) -> Result<ProofMap>
where
    F: Fn(&MerkleTree, &Address) -> Result<Proof> + Sync,
{
    config.validate()?;
    let workers = config.effective_workers(tree.len());
    debug!(workers, claims = tree.len(), "starting proof pipeline");

    let proofs = fan_out(tree.claims(), workers, |claim| {
        unit(tree, &claim.address).map_err(|source| AirdropError::WorkerFailure {
            address: claim.address,
            source: Box::new(source),
        })
    })
    .map_err(|e| {
        warn!(error = %e, "proof pipeline aborted");
        e
    })?;

    let map: ProofMap = tree
        .claims()
        .iter()
        .map(|c| c.address)
        .zip(proofs)
        .collect();
    info!(proofs = map.len(), workers, "proof pipeline complete");
    Ok(map)
}

/// Single-threaded reference: recompute each path from the leaves.
pub fn generate_all_proofs_sequential(tree: &MerkleTree) -> Result<ProofMap> {
    tree.claims()
        .iter()
        .map(|c| tree.derive_proof(&c.address).map(|p| (c.address, p)))
        .collect()
}
