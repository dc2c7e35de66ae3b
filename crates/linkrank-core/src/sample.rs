//! Monte Carlo PageRank by random-surfer sampling.
//!
//! # Algorithm
//!
//! The surfer starts on a uniformly random page. At every step the
//! transition distribution `T(current, ·)` is computed, added into an
//! accumulator, and the next page is drawn from that same distribution.
//! After `n` steps the accumulator is divided by `n`.
//!
//! Averaging the one-step distributions instead of counting visits is a
//! Rao–Blackwellized estimator: it converges to the same stationary
//! distribution (ergodic theorem) with lower variance for the same number
//! of steps.
//!
//! # Multiple Chains
//!
//! [`sample_pagerank_chains`] splits the step budget across independent
//! chains, runs them on the rayon pool with one seeded [`StdRng`] each, and
//! averages the per-chain results weighted by their step counts.

use petgraph::graph::NodeIndex;
use rand::distributions::{Distribution as _, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::distribution::{Distribution, to_distribution};
use crate::error::{RankError, Result, check_damping};
use crate::graph::LinkGraph;
use crate::transition::transition_vector;

/// Estimate PageRank by sampling `samples` surfer steps with `rng`.
///
/// # Errors
///
/// Returns [`RankError::EmptyGraph`] for a graph without pages,
/// [`RankError::InvalidSampleCount`] when `samples == 0` and
/// [`RankError::InvalidDamping`] when `damping` is not in (0, 1).
#[instrument(skip(graph, rng), fields(pages = graph.node_count()))]
pub fn sample_pagerank(
    graph: &LinkGraph,
    damping: f64,
    samples: usize,
    rng: &mut impl Rng,
) -> Result<Distribution> {
    check_sampling_input(graph, damping, samples)?;

    let mut acc = run_chain(graph, damping, samples, rng)?;
    let n = samples as f64;
    for v in &mut acc {
        *v /= n;
    }

    Ok(to_distribution(graph, &acc))
}

/// Estimate PageRank with `chains` independent chains run in parallel.
///
/// Chain `i` is seeded with `seed + i`. The `samples` budget is split as
/// evenly as possible; the first `samples % chains` chains take one extra
/// step and chains left with no steps are skipped. With `chains == 1` the
/// result equals [`sample_pagerank`] driven by `StdRng::seed_from_u64(seed)`.
///
/// # Errors
///
/// Same as [`sample_pagerank`], plus [`RankError::InvalidChainCount`] when
/// `chains == 0`.
#[instrument(skip(graph), fields(pages = graph.node_count()))]
pub fn sample_pagerank_chains(
    graph: &LinkGraph,
    damping: f64,
    samples: usize,
    chains: usize,
    seed: u64,
) -> Result<Distribution> {
    if chains == 0 {
        return Err(RankError::InvalidChainCount);
    }
    check_sampling_input(graph, damping, samples)?;

    // Chains past `samples` would get no steps; never plan them.
    let plan = chain_plan(samples, chains.min(samples));
    let sums = plan
        .par_iter()
        .enumerate()
        .filter(|&(_, &steps)| steps > 0)
        .map(|(chain, &steps)| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(chain as u64));
            run_chain(graph, damping, steps, &mut rng)
        })
        .collect::<Result<Vec<_>>>()?;

    debug!(chains = sums.len(), samples, "sampling chains finished");

    let mut acc = vec![0.0_f64; graph.node_count()];
    for chain_sum in &sums {
        for (a, v) in acc.iter_mut().zip(chain_sum) {
            *a += v;
        }
    }
    let n = samples as f64;
    for v in &mut acc {
        *v /= n;
    }

    Ok(to_distribution(graph, &acc))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

fn check_sampling_input(graph: &LinkGraph, damping: f64, samples: usize) -> Result<()> {
    if graph.is_empty() {
        return Err(RankError::EmptyGraph);
    }
    if samples == 0 {
        return Err(RankError::InvalidSampleCount);
    }
    check_damping(damping)
}

/// Walk one chain for `steps` steps and return the undivided accumulator.
fn run_chain(
    graph: &LinkGraph,
    damping: f64,
    steps: usize,
    rng: &mut impl Rng,
) -> Result<Vec<f64>> {
    let n = graph.node_count();
    let mut acc = vec![0.0_f64; n];
    let mut current = NodeIndex::new(rng.gen_range(0..n));

    for _ in 0..steps {
        let probs = transition_vector(graph, damping, current);
        for (a, p) in acc.iter_mut().zip(&probs) {
            *a += p;
        }

        // The next position is drawn from the distribution just averaged in.
        let picker = WeightedIndex::new(&probs).map_err(|e| RankError::Sampling(e.to_string()))?;
        current = NodeIndex::new(picker.sample(rng));
    }

    Ok(acc)
}

/// Split `samples` steps over `chains` chains.
fn chain_plan(samples: usize, chains: usize) -> Vec<usize> {
    let base = samples / chains;
    let extra = samples % chains;
    (0..chains)
        .map(|i| base + usize::from(i < extra))
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
