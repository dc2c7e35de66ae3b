#![forbid(unsafe_code)]
#![allow(clippy::cast_precision_loss)]
//! linkrank-core library.
//!
//! Ranks the pages of a hyperlinked corpus with two independent estimators
//! of the random-surfer stationary distribution:
//!
//! - [`sample::sample_pagerank`]: Rao–Blackwellized Monte Carlo sampling.
//! - [`iterate::iterate_pagerank`]: power iteration to a fixed point.
//!
//! # Conventions
//!
//! - **Errors**: Public functions return [`error::Result`] with a typed
//!   [`RankError`]. Callers wrap it in `anyhow` at the binary boundary.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `debug!`, `trace!`).
//! - **Randomness**: Never drawn from ambient state inside an estimator; an
//!   RNG or a seed is always passed in.

pub mod config;
pub mod distribution;
pub mod error;
pub mod graph;
pub mod iterate;
pub mod sample;
pub mod transition;

pub use config::RankConfig;
pub use distribution::Distribution;
pub use error::RankError;
pub use graph::{Adjacency, LinkGraph};
pub use iterate::{IterateConfig, IterationOutcome, iterate_pagerank};
pub use sample::{sample_pagerank, sample_pagerank_chains};
pub use transition::transition;

use rand::Rng;
use tracing::{info, instrument};

/// Output of [`rank`]: both estimates for the same graph.
#[derive(Debug, Clone, PartialEq)]
pub struct RankReport {
    /// Sampling estimate.
    pub sampled: Distribution,
    /// Power-iteration estimate.
    pub iterated: IterationOutcome,
    /// Seed the sampler ran with.
    pub seed: u64,
}

/// Run both estimators on `graph` with `config`.
///
/// When `config.seed` is `None` a seed is drawn from the thread RNG and
/// reported back in [`RankReport::seed`] so the run can be reproduced.
///
/// # Errors
///
/// Returns the first [`RankError`] raised by validation or either estimator.
#[instrument(skip(graph), fields(pages = graph.node_count(), links = graph.edge_count()))]
pub fn rank(graph: &LinkGraph, config: &RankConfig) -> error::Result<RankReport> {
    config.validate()?;
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }

    let seed = config
        .seed
        .unwrap_or_else(|| rand::thread_rng().r#gen::<u64>());

    let sampled = sample_pagerank_chains(
        graph,
        config.damping,
        config.samples,
        config.chains,
        seed,
    )?;
    let iterated = iterate_pagerank(graph, &config.iterate_config())?;

    info!(seed, iterations = iterated.iterations, "ranked corpus");

    Ok(RankReport {
        sampled,
        iterated,
        seed,
    })
}
