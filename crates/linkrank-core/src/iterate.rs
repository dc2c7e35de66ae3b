//! PageRank by power iteration.
//!
//! # Algorithm
//!
//! ```text
//! PR(p) = (1 - d) / N + d * Σ PR(q) / out_degree(q)   for each q → p
//! ```
//!
//! Ranks start uniform at `1 / N`. Each iteration builds a fresh vector from
//! the previous one; the loop stops once no page moved by more than the
//! tolerance, and the converged vector is then divided by its sum.
//!
//! # Dangling Pages
//!
//! A dangling page has no out-edges, so it never appears in the sum above
//! and its rank mass leaks out of the recurrence every iteration. Unlike the
//! textbook treatment, that mass is *not* spread uniformly over all pages;
//! it is only recovered by the final normalization. Graphs with dangling
//! pages therefore rank differently here than in canonical PageRank (and
//! than in the sampler, whose surfer jumps uniformly from a dangling page).
//!
//! # Safety Ceiling
//!
//! The recurrence always converges for `0 < d < 1`, but the loop is still
//! bounded by [`IterateConfig::max_iterations`]; hitting it returns
//! [`RankError::DidNotConverge`].

use tracing::{debug, instrument, warn};

use crate::distribution::{Distribution, normalize, to_distribution};
use crate::error::{RankError, Result, check_damping};
use crate::graph::LinkGraph;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration for the power-iteration solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IterateConfig {
    /// Damping factor. Default: 0.85.
    pub damping: f64,
    /// Stop once every page changed by at most this much. Default: 0.001.
    pub tolerance: f64,
    /// Safety ceiling on iterations. Default: 10 000.
    pub max_iterations: usize,
}

impl Default for IterateConfig {
    fn default() -> Self {
        Self {
            damping: 0.85,
            tolerance: 0.001,
            max_iterations: 10_000,
        }
    }
}

impl IterateConfig {
    /// Check every field.
    ///
    /// # Errors
    ///
    /// Returns the [`RankError`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(RankError::InvalidTolerance(self.tolerance));
        }
        if self.max_iterations == 0 {
            return Err(RankError::InvalidIterationLimit);
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Result of a converged power iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationOutcome {
    /// Normalized ranks, summing to 1.
    pub scores: Distribution,
    /// Converged ranks before normalization.
    pub raw: Distribution,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Largest per-page change in the last iteration.
    pub delta: f64,
}

// ---------------------------------------------------------------------------
// Solver
// ---------------------------------------------------------------------------

/// Compute PageRank by power iteration.
///
/// # Errors
///
/// Returns [`RankError::EmptyGraph`] for a graph without pages, a
/// validation error for a bad `config`, or [`RankError::DidNotConverge`]
/// when `config.max_iterations` is reached first.
#[instrument(skip(graph), fields(pages = graph.node_count()))]
pub fn iterate_pagerank(graph: &LinkGraph, config: &IterateConfig) -> Result<IterationOutcome> {
    config.validate()?;
    let n = graph.node_count();
    if n == 0 {
        return Err(RankError::EmptyGraph);
    }

    let n_f64 = n as f64;
    let mut ranks = vec![1.0 / n_f64; n];
    let mut delta = f64::INFINITY;

    for iteration in 1..=config.max_iterations {
        let next = step(graph, config.damping, &ranks);

        delta = ranks
            .iter()
            .zip(next.iter())
            .map(|(old, new)| (new - old).abs())
            .fold(0.0, f64::max);

        if delta <= config.tolerance {
            debug!(iterations = iteration, delta, "power iteration converged");
            let raw = to_distribution(graph, &next);
            let mut scores = next;
            normalize(&mut scores);
            return Ok(IterationOutcome {
                scores: to_distribution(graph, &scores),
                raw,
                iterations: iteration,
                delta,
            });
        }

        ranks = next;
    }

    warn!(
        max_iterations = config.max_iterations,
        delta, "power iteration hit its iteration ceiling"
    );
    Err(RankError::DidNotConverge {
        iterations: config.max_iterations,
        delta,
    })
}

/// One application of the recurrence. `ranks` is left untouched.
///
/// Every linker `q` of `p` has at least one out-edge (the one to `p`), so the
/// division by its out-degree is never by zero.
///
/// # Panics
///
/// Panics if `ranks` is shorter than `graph.node_count()`.
#[must_use]
pub fn step(graph: &LinkGraph, damping: f64, ranks: &[f64]) -> Vec<f64> {
    let base = (1.0 - damping) / graph.node_count() as f64;
    graph
        .node_indices()
        .map(|p| {
            let inflow: f64 = graph
                .linkers(p)
                .map(|q| ranks[q.index()] / graph.out_degree(q) as f64)
                .sum();
            damping.mul_add(inflow, base)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
