//! Concrete ranking scenarios run against the public API.
//!
//! Each test builds a small hand-written corpus and checks the exact or
//! qualitative outcome of the transition model, the sampler and the
//! power-iteration solver.

use rand::SeedableRng;
use rand::rngs::StdRng;

use linkrank_core::distribution::{is_normalized, total};
use linkrank_core::iterate::step;
use linkrank_core::{
    IterateConfig, LinkGraph, RankError, iterate_pagerank, sample_pagerank,
    sample_pagerank_chains, transition,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn approx_eq(a: f64, b: f64, eps: f64) {
    assert!((a - b).abs() <= eps, "expected {b}, got {a} (eps {eps})");
}

fn config(damping: f64, tolerance: f64) -> IterateConfig {
    IterateConfig {
        damping,
        tolerance,
        ..IterateConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Iterative solver
// ---------------------------------------------------------------------------

#[test]
fn two_page_cycle_splits_evenly() {
    let g = LinkGraph::from_edges(&[], &[("A", "B"), ("B", "A")]);
    let out = iterate_pagerank(&g, &config(0.85, 0.001)).expect("converges");
    approx_eq(out.scores["A"], 0.5, 1e-12);
    approx_eq(out.scores["B"], 0.5, 1e-12);
}

#[test]
fn single_dangling_page_ranks_one() {
    let g = LinkGraph::from_edges(&["A"], &[]);
    let out = iterate_pagerank(&g, &config(0.85, 0.001)).expect("converges");
    approx_eq(out.scores["A"], 1.0, 1e-12);
}

#[test]
fn chain_with_dangling_sink_favours_the_sink() {
    let g = LinkGraph::from_edges(&[], &[("A", "B"), ("B", "C")]);
    let out = iterate_pagerank(&g, &config(0.85, 0.001)).expect("converges");

    approx_eq(total(&out.scores), 1.0, 1e-12);
    assert!(out.scores["C"] > out.scores["A"]);
    assert!(out.scores["B"] > out.scores["A"]);

    // Raw fixed point: A = 0.05, B = 0.05 + 0.85 * A, C = 0.05 + 0.85 * B.
    approx_eq(out.raw["A"], 0.05, 1e-12);
    approx_eq(out.raw["B"], 0.0925, 1e-12);
    approx_eq(out.raw["C"], 0.128_625, 1e-12);
}

#[test]
fn converged_vector_satisfies_recurrence() {
    let g = LinkGraph::from_edges(
        &[],
        &[
            ("1", "2"),
            ("2", "1"),
            ("2", "3"),
            ("3", "2"),
            ("3", "4"),
            ("4", "2"),
            ("4", "5"),
            ("5", "4"),
            ("5", "1"),
        ],
    );
    let tolerance = 1e-9;
    let out = iterate_pagerank(&g, &config(0.85, tolerance)).expect("converges");

    assert!(out.delta <= tolerance);

    // The last iteration moved every linker by at most `tolerance`, so one
    // more application moves page p by at most d * in_degree(p) * tolerance.
    let raw: Vec<f64> = g.pages().map(|p| out.raw[p]).collect();
    let applied = step(&g, 0.85, &raw);
    for idx in g.node_indices() {
        let in_degree = g.linkers(idx).count() as f64;
        let bound = 0.85 * in_degree * tolerance + f64::EPSILON;
        approx_eq(applied[idx.index()], raw[idx.index()], bound);
    }
}

#[test]
fn well_linked_page_outranks_leaf() {
    let g = LinkGraph::from_edges(
        &[],
        &[
            ("hub", "a"),
            ("a", "hub"),
            ("b", "hub"),
            ("c", "hub"),
            ("hub", "b"),
        ],
    );
    let out = iterate_pagerank(&g, &IterateConfig::default()).expect("converges");
    for leaf in ["a", "b", "c"] {
        assert!(out.scores["hub"] > out.scores[leaf]);
    }
    assert!(out.scores.values().all(|&v| (0.0..=1.0).contains(&v)));
}

// ---------------------------------------------------------------------------
// Transition model
// ---------------------------------------------------------------------------

#[test]
fn dangling_transition_is_exactly_uniform() {
    let g = LinkGraph::from_edges(&["y"], &[("a", "x"), ("b", "x")]);
    let dist = transition(&g, 0.85, "y").expect("y exists");
    assert_eq!(dist.len(), 4);
    for p in dist.values() {
        approx_eq(*p, 0.25, 0.0);
    }
}

// ---------------------------------------------------------------------------
// Sampler
// ---------------------------------------------------------------------------

#[test]
fn one_sample_on_two_pages_is_a_distribution() {
    let g = LinkGraph::from_edges(&[], &[("A", "B"), ("B", "A")]);
    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let dist = sample_pagerank(&g, 0.85, 1, &mut rng).expect("valid input");
        assert!(is_normalized(&dist, 1e-12));
        assert_eq!(dist.len(), 2);
    }
}

#[test]
fn empty_graph_is_invalid_input_for_both_estimators() {
    let g = LinkGraph::from_edges(&[], &[]);
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(
        sample_pagerank(&g, 0.85, 100, &mut rng),
        Err(RankError::EmptyGraph)
    );
    assert_eq!(
        sample_pagerank_chains(&g, 0.85, 100, 4, 1),
        Err(RankError::EmptyGraph)
    );
    assert_eq!(
        iterate_pagerank(&g, &IterateConfig::default()),
        Err(RankError::EmptyGraph)
    );
}
