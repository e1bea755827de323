//! Pipeline configuration with environment overrides.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;

use crate::error::{AirdropError, Result};

/// Default upper bound on claims accepted for a single tree.
pub const DEFAULT_MAX_CLAIMS: usize = 1_000_000;

/// Knobs for normalization and proof generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Worker threads for the proof pipeline (`None` ⇒ available parallelism).
    pub workers: Option<usize>,
    /// Largest claim set accepted by normalization.
    pub max_claims: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: None,
            max_claims: DEFAULT_MAX_CLAIMS,
        }
    }
}

impl PipelineConfig {
    /// Defaults merged with environment overrides.
    ///
    /// Recognized variables:
    /// - `AIRDROP_WORKERS` = `<usize>`
    /// - `AIRDROP_MAX_CLAIMS` = `<usize>`
    ///
    /// Unparseable values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// Apply environment overrides on top of `self`.
    #[must_use]
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(w) = std::env::var("AIRDROP_WORKERS") {
            if let Ok(v) = w.trim().parse::<usize>() {
                self.workers = Some(v);
            }
        }
        if let Ok(m) = std::env::var("AIRDROP_MAX_CLAIMS") {
            if let Ok(v) = m.trim().parse::<usize>() {
                self.max_claims = v;
            }
        }
        self
    }

    /// Reject settings that can never produce a result.
    pub fn validate(&self) -> Result<()> {
        if self.workers == Some(0) {
            return Err(AirdropError::WorkerPool {
                reason: "worker count must be positive".into(),
            });
        }
        if self.max_claims == 0 {
            return Err(AirdropError::TooManyClaims { count: 0, max: 0 });
        }
        Ok(())
    }

    /// Worker count for a batch of `claim_count` units:
    /// `min(workers or available parallelism, claim_count)`, never below 1.
    #[must_use]
    pub fn effective_workers(&self, claim_count: usize) -> usize {
        let wanted = self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
        });
        wanted.min(claim_count).max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn workers_are_bounded_by_claims() {
        let cfg = PipelineConfig {
            workers: Some(8),
            ..PipelineConfig::default()
        };
        assert_eq!(cfg.effective_workers(3), 3);
        assert_eq!(cfg.effective_workers(100), 8);
        assert_eq!(cfg.effective_workers(0), 1);
    }

    #[test]
    fn validate_rejects_zero_workers() {
        let cfg = PipelineConfig {
            workers: Some(0),
            ..PipelineConfig::default()
        };
        assert!(cfg.validate().is_err());
        assert!(PipelineConfig::default().validate().is_ok());
    }

    // The only test in this crate that touches these variables.
    #[test]
    fn env_overrides_apply_and_skip_garbage() {
        std::env::set_var("AIRDROP_WORKERS", " 3 ");
        std::env::set_var("AIRDROP_MAX_CLAIMS", "lots");
        let cfg = PipelineConfig::from_env();
        assert_eq!(cfg.workers, Some(3));
        assert_eq!(cfg.max_claims, DEFAULT_MAX_CLAIMS);

        std::env::set_var("AIRDROP_WORKERS", "-1");
        std::env::set_var("AIRDROP_MAX_CLAIMS", "500");
        let base = PipelineConfig {
            workers: Some(6),
            max_claims: 10,
        };
        let cfg = base.with_env_overrides();
        assert_eq!(cfg.workers, Some(6));
        assert_eq!(cfg.max_claims, 500);

        std::env::remove_var("AIRDROP_WORKERS");
        std::env::remove_var("AIRDROP_MAX_CLAIMS");
        assert_eq!(PipelineConfig::from_env(), PipelineConfig::default());
    }

    #[test]
    fn serde_fills_defaults() {
        let cfg: PipelineConfig = serde_json::from_str(r#"{"workers":2}"#).unwrap();
        assert_eq!(cfg.workers, Some(2));
        assert_eq!(cfg.max_claims, DEFAULT_MAX_CLAIMS);
    }
}
