//! airdrop-core: claim data model, normalization, and claim-set utilities.
//!
//! This crate defines the **stable boundary** shared by the airdrop crates:
//! - canonical data types (`Address`, `Amount`, `RawClaim`, `Claim`),
//! - the error taxonomy (`AirdropError`),
//! - claim normalization (validation + canonical address order), and
//! - pipeline configuration with environment overrides.
//!
//! ```
//! use airdrop_core::{normalize, Address, Amount, RawClaim};
//!
//! let a: Address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa02".parse()?;
//! let b: Address = "0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa01".parse()?;
//! let claims = normalize(&[
//!     RawClaim::new(a, Amount::from(200u64)),
//!     RawClaim::new(b, Amount::from(100u64)),
//! ])?;
//! assert_eq!(claims[0].address, b);
//! assert_eq!(claims[1].index, 1);
//! # Ok::<(), airdrop_core::AirdropError>(())
//! ```

#![forbid(unsafe_code)]
#![deny(rust_2018_idioms)]
#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::doc_markdown
)]

/// Synthetic data, dedup, filtering, batching, totals.
pub mod claims;
/// Pipeline configuration (defaults + env overrides).
pub mod config;
/// Error taxonomy and `Result` alias.
pub mod error;
/// Validation and canonical ordering of raw claims.
pub mod normalize;
/// Address, amount, and claim types.
pub mod types;

pub use config::PipelineConfig;
pub use error::{AirdropError, Result};
pub use normalize::{normalize, normalize_with_limit};
pub use types::*;

/// Re-exported so callers can build amounts without a direct dependency.
pub use primitive_types::U256;
