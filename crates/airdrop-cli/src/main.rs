#![forbid(unsafe_code)]
#![deny(
    rust_2018_idioms,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo
)]

use std::time::Instant;

use airdrop_core::{claims::generate_claims, Address, Amount, PipelineConfig};
use airdrop_crypto::parse_hash_hex;
use airdrop_merkle::{generate_all_proofs, MerkleTree, ProofVerifier, TreeStats};
use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(
    name = "airdrop",
    about = "Merkle airdrop commitment engine",
    long_about = "Merkle airdrop commitment engine.\n\nBuild a commitment over synthetic claims, print inclusion proofs, and verify proofs against a root. Everything runs in memory.",
    version = env!("CARGO_PKG_VERSION"),
    disable_help_subcommand = true
)]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Build a tree over N synthetic claims, generate every proof, spot-check a few.
    Demo {
        /// Number of synthetic claims (>0)
        #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u32).range(1..))]
        claims: u32,

        /// Worker threads (default: AIRDROP_WORKERS or available parallelism)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
        workers: Option<u32>,
    },

    /// Print the proof record (JSON) for one address of the synthetic set.
    Proof {
        /// Number of synthetic claims (>0)
        #[arg(long, default_value_t = 10_000, value_parser = clap::value_parser!(u32).range(1..))]
        claims: u32,

        /// Claimant address (0x + 40 hex digits)
        #[arg(long)]
        address: String,
    },

    /// Verify a proof given on the command line.
    Verify {
        /// Committed root (0x + 64 hex digits)
        #[arg(long)]
        root: String,

        /// Claimant address
        #[arg(long)]
        address: String,

        /// Claimed amount (decimal)
        #[arg(long)]
        amount: String,

        /// Canonical index
        #[arg(long)]
        index: u32,

        /// Sibling hashes, bottom to top
        #[arg(long, num_args = 0..)]
        proof: Vec<String>,
    },
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Demo { claims, workers } => demo(claims as usize, workers.map(|w| w as usize)),
        Cmd::Proof { claims, address } => proof(claims as usize, &address),
        Cmd::Verify {
            root,
            address,
            amount,
            index,
            proof,
        } => verify(&root, &address, &amount, index, &proof),
    }
}

/// Compact stderr logging; `RUST_LOG` overrides the `info` default.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::builder()
        .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init();
}

fn demo(n: usize, workers: Option<usize>) -> Result<()> {
    let mut config = PipelineConfig::from_env();
    if workers.is_some() {
        config.workers = workers;
    }
    config.validate().context("pipeline configuration")?;

    info!(claims = n, "generating synthetic claims");
    let raw = generate_claims(n);

    let start = Instant::now();
    let tree = MerkleTree::build_with_config(&raw, &config).context("building merkle tree")?;
    let build_time = start.elapsed();
    println!("Tree built in {build_time:?}");
    println!("Root: {}", tree.root_hex());

    let start = Instant::now();
    let proofs = generate_all_proofs(&tree, &config).context("generating proofs")?;
    let proof_time = start.elapsed();
    #[allow(clippy::cast_precision_loss)]
    let rate = proofs.len() as f64 / proof_time.as_secs_f64().max(f64::MIN_POSITIVE);
    println!(
        "Generated {} proofs in {proof_time:?} with {} workers ({rate:.2} proofs/s)",
        proofs.len(),
        config.effective_workers(tree.len())
    );

    let verifier = ProofVerifier::new(tree.root());
    let len = tree.len();
    let mut failures = 0usize;
    for pos in [0, len / 4, len / 2, len * 3 / 4] {
        let claim = tree.claims()[pos];
        let ok = proofs
            .get(&claim.address)
            .is_some_and(|p| verifier.verify_proof(&claim.address, p));
        if ok {
            println!("OK: proof for {} (index {})", claim.address, claim.index);
        } else {
            warn!(address = %claim.address, "spot check failed");
            failures += 1;
        }
    }

    let stats = TreeStats::collect(&tree, &proofs).context("collecting tree statistics")?;
    println!(
        "{}",
        serde_json::to_string_pretty(&stats).context("serialize stats")?
    );

    if failures > 0 {
        bail!("{failures} spot-checked proofs failed verification");
    }
    Ok(())
}

fn proof(n: usize, address: &str) -> Result<()> {
    let address: Address = address
        .parse()
        .with_context(|| format!("parsing address {address}"))?;
    let tree = MerkleTree::build(&generate_claims(n)).context("building merkle tree")?;
    let record = tree
        .proof(&address)
        .with_context(|| format!("no claim for {address} among {n} synthetic claims"))?
        .to_record();

    println!("Root: {}", tree.root_hex());
    println!(
        "{}",
        serde_json::to_string_pretty(&record).context("serialize proof record")?
    );
    Ok(())
}

fn verify(root: &str, address: &str, amount: &str, index: u32, proof: &[String]) -> Result<()> {
    let root = parse_hash_hex(root).context("parsing root")?;
    let address: Address = address
        .parse()
        .with_context(|| format!("parsing address {address}"))?;
    let amount = Amount::from_dec_str(amount).context("parsing amount")?;
    let siblings = proof
        .iter()
        .map(|h| parse_hash_hex(h).with_context(|| format!("parsing proof entry {h}")))
        .collect::<Result<Vec<_>>>()?;

    let proof = airdrop_merkle::Proof::new(siblings, index, amount);
    info!(%address, index, depth = proof.siblings.len(), "verifying proof");
    if !ProofVerifier::new(root).verify_proof(&address, &proof) {
        bail!("proof does not verify for {address} at index {index}");
    }
    println!("OK: {address} is committed at index {index}");
    Ok(())
}
