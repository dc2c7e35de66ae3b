//! Probability distributions over pages and the normalization helpers shared
//! by both estimators.

use std::collections::BTreeMap;

use crate::graph::LinkGraph;

/// Page identifier → probability (or rank). Every page of the graph appears
/// exactly once.
pub type Distribution = BTreeMap<String, f64>;

/// Sum of all values.
#[must_use]
pub fn total(dist: &Distribution) -> f64 {
    dist.values().sum()
}

/// Divide every value by the sum in place.
///
/// A vector summing to zero is left unchanged. Returns the sum that was
/// divided out.
pub fn normalize(values: &mut [f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if sum > 0.0 {
        for v in values.iter_mut() {
            *v /= sum;
        }
    }
    sum
}

/// Return a copy of `dist` scaled to sum to 1.
#[must_use]
pub fn normalized(dist: &Distribution) -> Distribution {
    let sum = total(dist);
    if sum > 0.0 {
        dist.iter().map(|(k, v)| (k.clone(), v / sum)).collect()
    } else {
        dist.clone()
    }
}

/// `true` if all values are non-negative and they sum to 1 within `eps`.
#[must_use]
pub fn is_normalized(dist: &Distribution, eps: f64) -> bool {
    dist.values().all(|&v| v >= 0.0) && (total(dist) - 1.0).abs() <= eps
}

/// Largest absolute per-page difference between two distributions.
///
/// Pages missing from one side count as 0 there.
#[must_use]
pub fn max_abs_difference(a: &Distribution, b: &Distribution) -> f64 {
    a.keys()
        .chain(b.keys())
        .map(|k| {
            let x = a.get(k).copied().unwrap_or(0.0);
            let y = b.get(k).copied().unwrap_or(0.0);
            (x - y).abs()
        })
        .fold(0.0, f64::max)
}

/// Attach page identifiers to an index-ordered vector.
pub(crate) fn to_distribution(graph: &LinkGraph, values: &[f64]) -> Distribution {
    graph
        .pages()
        .zip(values.iter())
        .map(|(page, &v)| (page.to_string(), v))
        .collect()
}
