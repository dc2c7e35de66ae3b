//! Error type shared by every estimator in the engine.
//!
//! All errors are fatal to the computation that raised them and are returned
//! synchronously to the caller. Nothing in the engine retries.

/// Errors raised by graph estimators and configuration loading.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    /// An estimator was asked to rank a graph with zero pages.
    #[error("invalid input: the link graph has no pages")]
    EmptyGraph,

    /// A transition was requested for a page that is not in the graph.
    #[error("page not found in link graph: {0}")]
    UnknownPage(String),

    /// The damping factor lies outside the open interval (0, 1).
    #[error("damping factor must be strictly between 0 and 1, got {0}")]
    InvalidDamping(f64),

    /// The sampler was asked for zero samples.
    #[error("sample count must be at least 1")]
    InvalidSampleCount,

    /// The multi-chain sampler was asked for zero chains.
    #[error("chain count must be at least 1")]
    InvalidChainCount,

    /// The convergence tolerance is not a positive finite number.
    #[error("tolerance must be a positive finite number, got {0}")]
    InvalidTolerance(f64),

    /// The iteration ceiling is zero.
    #[error("maximum iteration count must be at least 1")]
    InvalidIterationLimit,

    /// Power iteration hit its safety ceiling before converging.
    #[error("power iteration did not converge after {iterations} iterations (last delta {delta})")]
    DidNotConverge {
        /// Iterations performed before giving up.
        iterations: usize,
        /// Largest per-page change in the final iteration.
        delta: f64,
    },

    /// Weighted next-page selection could not be set up.
    #[error("weighted page selection failed: {0}")]
    Sampling(String),

    /// A configuration file could not be read or parsed.
    #[error("invalid rank configuration: {0}")]
    Config(String),
}

/// Convenience alias used across the crate.
pub type Result<T, E = RankError> = std::result::Result<T, E>;

/// Check that `damping` lies strictly between 0 and 1.
pub(crate) fn check_damping(damping: f64) -> Result<()> {
    if damping > 0.0 && damping < 1.0 {
        Ok(())
    } else {
        Err(RankError::InvalidDamping(damping))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damping_bounds_are_exclusive() {
        assert!(check_damping(0.85).is_ok());
        assert_eq!(check_damping(0.0), Err(RankError::InvalidDamping(0.0)));
        assert_eq!(check_damping(1.0), Err(RankError::InvalidDamping(1.0)));
        assert!(check_damping(f64::NAN).is_err());
    }

    #[test]
    fn did_not_converge_message_names_iterations() {
        let err = RankError::DidNotConverge {
            iterations: 12,
            delta: 0.5,
        };
        assert!(err.to_string().contains("12 iterations"));
    }
}
