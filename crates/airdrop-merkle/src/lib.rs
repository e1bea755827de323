//! Merkle commitment over a normalized airdrop claim set.
//!
//! - Tree: keccak leaves in canonical address order, sorted-pair internal
//!   nodes, odd trailing nodes paired with themselves. Levels are kept so a
//!   proof is a read of `height` siblings.
//! - Proofs: per-address sibling paths, generated one at a time or for the
//!   whole set on a bounded `rayon` pool (all-or-nothing).
//! - Verification: fold a proof back to the root; needs no tree.
//! - Serialized form: hex siblings + index + decimal amount, bundled with
//!   the root as JSON.
//!
//! ```
//! use airdrop_core::{claims::generate_claims, PipelineConfig};
//! use airdrop_merkle::{generate_all_proofs, MerkleTree, ProofVerifier};
//!
//! let tree = MerkleTree::build(&generate_claims(8))?;
//! let proofs = generate_all_proofs(&tree, &PipelineConfig::default())?;
//! let verifier = ProofVerifier::new(tree.root());
//! assert!(proofs.iter().all(|(addr, p)| verifier.verify_proof(addr, p)));
//! # Ok::<(), airdrop_core::AirdropError>(())
//! ```

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
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

pub mod pipeline;
pub mod proof;
pub mod stats;
pub mod tree;
pub mod verify;

pub use pipeline::{generate_all_proofs, generate_all_proofs_sequential, ProofMap};
pub use proof::{proof_path, Proof, ProofBundle, ProofRecord};
pub use stats::TreeStats;
pub use tree::{merkle_root, tree_height, MerkleTree};
pub use verify::{verify_claim, verify_proof, verify_record, ProofVerifier};
