//! Run configuration.
//!
//! [`RankConfig`] holds the tunables for both estimators. It deserializes
//! from TOML with serde; unknown keys are rejected and missing keys take
//! their defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{RankError, Result, check_damping};
use crate::iterate::IterateConfig;

/// Tunables for a full ranking run (both estimators).
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RankConfig {
    /// Damping factor shared by both estimators. Default: 0.85.
    #[serde(default = "default_damping")]
    pub damping: f64,
    /// Total surfer steps across all sampling chains. Default: 10 000.
    #[serde(default = "default_samples")]
    pub samples: usize,
    /// Power-iteration convergence threshold. Default: 0.001.
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
    /// Power-iteration safety ceiling. Default: 10 000.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
    /// Independent sampling chains. Counts above `samples` behave like
    /// `samples`. Default: 1.
    #[serde(default = "default_chains")]
    pub chains: usize,
    /// Seed for the sampler. Drawn from the OS when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            damping: default_damping(),
            samples: default_samples(),
            tolerance: default_tolerance(),
            max_iterations: default_max_iterations(),
            chains: default_chains(),
            seed: None,
        }
    }
}

impl RankConfig {
    /// Parse a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        toml::from_str(raw).map_err(|e| RankError::Config(e.to_string()))
    }

    /// Read and parse a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`RankError::Config`] if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| RankError::Config(format!("read {}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }

    /// Check every tunable.
    ///
    /// # Errors
    ///
    /// Returns the [`RankError`] for the first invalid field.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if self.samples == 0 {
            return Err(RankError::InvalidSampleCount);
        }
        if self.chains == 0 {
            return Err(RankError::InvalidChainCount);
        }
        self.iterate_config().validate()
    }

    /// Solver settings derived from this config.
    #[must_use]
    pub const fn iterate_config(&self) -> IterateConfig {
        IterateConfig {
            damping: self.damping,
            tolerance: self.tolerance,
            max_iterations: self.max_iterations,
        }
    }
}

const fn default_damping() -> f64 {
    0.85
}

const fn default_samples() -> usize {
    10_000
}

const fn default_tolerance() -> f64 {
    0.001
}

const fn default_max_iterations() -> usize {
    10_000
}

const fn default_chains() -> usize {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = RankConfig::default();
        assert!((config.damping - 0.85).abs() < f64::EPSILON);
        assert_eq!(config.samples, 10_000);
        assert!((config.tolerance - 0.001).abs() < f64::EPSILON);
        assert_eq!(config.max_iterations, 10_000);
        assert_eq!(config.chains, 1);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = RankConfig::from_toml_str("damping = 0.9\nseed = 7\n").expect("valid toml");
        assert!((config.damping - 0.9).abs() < f64::EPSILON);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.samples, 10_000);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = RankConfig::from_toml_str("dampnig = 0.9\n").expect_err("typo must fail");
        assert!(matches!(err, RankError::Config(_)));
    }

    #[test]
    fn load_reads_file() {
        let dir = tempfile::tempdir().expect("temp dir should be created");
        let path = dir.path().join("linkrank.toml");
        std::fs::write(&path, "samples = 50\nchains = 2\n").expect("write config");
        let config = RankConfig::load(&path).expect("load config");
        assert_eq!(config.samples, 50);
        assert_eq!(config.chains, 2);
    }

    #[test]
    fn validate_reports_first_bad_field() {
        let config = RankConfig {
            samples: 0,
            ..RankConfig::default()
        };
        assert_eq!(config.validate(), Err(RankError::InvalidSampleCount));
        let config = RankConfig {
            tolerance: -1.0,
            ..RankConfig::default()
        };
        assert_eq!(config.validate(), Err(RankError::InvalidTolerance(-1.0)));
    }

    #[test]
    fn huge_chain_count_validates_and_ranks() {
        let config = RankConfig {
            samples: 10,
            chains: usize::MAX,
            seed: Some(1),
            ..RankConfig::default()
        };
        assert!(config.validate().is_ok());
        let g = crate::LinkGraph::from_edges(&[], &[("a", "b"), ("b", "a")]);
        let report = crate::rank(&g, &config).expect("chains are capped by samples");
        assert_eq!(report.sampled.len(), 2);
    }
}
