//! Random-surfer transition model.
//!
//! From page `p` the surfer follows one of `p`'s links with probability `d`
//! (the damping factor) and jumps to a uniformly random page otherwise:
//!
//! ```text
//! P(p → x) = (1 - d) / N + [x ∈ out(p)] · d / |out(p)|
//! ```
//!
//! A dangling page has nowhere to go, so the surfer jumps uniformly:
//! `P(p → x) = 1 / N` for every page.

use petgraph::graph::NodeIndex;

use crate::distribution::{Distribution, to_distribution};
use crate::error::{RankError, Result, check_damping};
use crate::graph::LinkGraph;

/// Distribution over the next page, given the current `page`.
///
/// # Errors
///
/// Returns [`RankError::UnknownPage`] if `page` is not in the graph and
/// [`RankError::InvalidDamping`] if `damping` is not in (0, 1).
pub fn transition(graph: &LinkGraph, damping: f64, page: &str) -> Result<Distribution> {
    check_damping(damping)?;
    let idx = graph
        .node_index(page)
        .ok_or_else(|| RankError::UnknownPage(page.to_string()))?;
    Ok(to_distribution(graph, &transition_vector(graph, damping, idx)))
}

/// Index-ordered transition distribution for `idx`.
///
/// The caller guarantees `idx` belongs to `graph` and `damping` is valid.
#[must_use]
pub(crate) fn transition_vector(graph: &LinkGraph, damping: f64, idx: NodeIndex) -> Vec<f64> {
    let n = graph.node_count() as f64;
    let out_degree = graph.out_degree(idx);

    if out_degree == 0 {
        return vec![1.0 / n; graph.node_count()];
    }

    let mut probs = vec![(1.0 - damping) / n; graph.node_count()];
    let share = damping / out_degree as f64;
    for target in graph.links(idx) {
        probs[target.index()] += share;
    }
    probs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn linked_pages_get_damped_share() {
        // a → b, a → c; d is unreachable from a.
        let g = LinkGraph::from_edges(&["d"], &[("a", "b"), ("a", "c")]);
        let dist = transition(&g, 0.85, "a").expect("a exists");

        let base = 0.15 / 4.0;
        assert!(approx(dist["a"], base));
        assert!(approx(dist["b"], base + 0.425));
        assert!(approx(dist["c"], base + 0.425));
        assert!(approx(dist["d"], base));
    }

    #[test]
    fn dangling_page_jumps_uniformly() {
        let g = LinkGraph::from_edges(&[], &[("a", "b"), ("c", "b")]);
        let dist = transition(&g, 0.85, "b").expect("b exists");
        for p in dist.values() {
            assert!(approx(*p, 1.0 / 3.0));
        }
    }

    #[test]
    fn output_sums_to_one() {
        let g = LinkGraph::from_edges(&[], &[("a", "b"), ("b", "c"), ("c", "a"), ("c", "b")]);
        for page in ["a", "b", "c"] {
            let dist = transition(&g, 0.6, page).expect("page exists");
            let sum: f64 = dist.values().sum();
            assert!((sum - 1.0).abs() < 1e-9);
        }
    }

    #[test]
    fn unknown_page_is_rejected() {
        let g = LinkGraph::from_edges(&[], &[("a", "b")]);
        assert_eq!(
            transition(&g, 0.85, "x"),
            Err(RankError::UnknownPage("x".into()))
        );
    }

    #[test]
    fn out_of_range_damping_is_rejected() {
        let g = LinkGraph::from_edges(&[], &[("a", "b")]);
        assert_eq!(transition(&g, 1.0, "a"), Err(RankError::InvalidDamping(1.0)));
    }
}
