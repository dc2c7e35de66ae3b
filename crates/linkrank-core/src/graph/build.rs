//! Link graph construction from a crawled adjacency relation.
//!
//! # Overview
//!
//! The crawler hands over a mapping of page → set of link targets. The raw
//! relation may contain self-links and links to documents outside the
//! corpus. [`LinkGraph::from_adjacency`] filters both out and builds a
//! [`petgraph`] directed graph that both estimators read.
//!
//! ## Edge Direction
//!
//! An edge `A → B` means "page A links to page B". Only out-links are
//! recorded; incoming links are recovered through petgraph's
//! `Direction::Incoming` view.
//!
//! ## Node Order
//!
//! Pages are inserted in sorted identifier order, so `NodeIndex` values are
//! stable for a given corpus. Seeded sampling depends on this.
//!
//! ## Content Hash
//!
//! The graph carries a BLAKE3 hash of its sorted page and edge lists. Two
//! graphs with the same pages and links have the same hash.

#![allow(clippy::module_name_repetitions)]

use std::collections::{BTreeMap, BTreeSet, HashMap};

use petgraph::{
    Direction,
    graph::{DiGraph, NodeIndex},
};
use tracing::{debug, instrument, trace};

/// Raw crawler output: page → pages it links to.
pub type Adjacency = BTreeMap<String, BTreeSet<String>>;

// ---------------------------------------------------------------------------
// LinkGraph
// ---------------------------------------------------------------------------

/// An immutable directed graph of hyperlinked pages.
///
/// Every edge target is a page of the graph, no page links to itself and
/// there are no parallel edges. Pages with no out-links are *dangling*.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: DiGraph<String, ()>,
    node_map: HashMap<String, NodeIndex>,
    content_hash: String,
}

impl LinkGraph {
    /// Build a [`LinkGraph`] from a crawled adjacency relation.
    ///
    /// Self-links and targets that are not keys of `adjacency` are dropped
    /// silently. Unknown targets are not an error.
    #[must_use]
    #[instrument(skip(adjacency), fields(pages = adjacency.len()))]
    pub fn from_adjacency(adjacency: &Adjacency) -> Self {
        let mut graph = DiGraph::<String, ()>::with_capacity(adjacency.len(), 0);
        let mut node_map: HashMap<String, NodeIndex> = HashMap::with_capacity(adjacency.len());

        // BTreeMap iterates in sorted order, which fixes the index layout.
        for page in adjacency.keys() {
            let idx = graph.add_node(page.clone());
            node_map.insert(page.clone(), idx);
        }

        let mut dropped_self = 0_usize;
        let mut dropped_external = 0_usize;
        let mut edges: Vec<(&str, &str)> = Vec::new();

        for (page, targets) in adjacency {
            let from = node_map[page];
            for target in targets {
                if target == page {
                    trace!(page = %page, "dropping self-link");
                    dropped_self += 1;
                    continue;
                }
                let Some(&to) = node_map.get(target) else {
                    trace!(page = %page, target = %target, "dropping link outside corpus");
                    dropped_external += 1;
                    continue;
                };
                graph.add_edge(from, to, ());
                edges.push((page.as_str(), target.as_str()));
            }
        }

        let content_hash = compute_content_hash(adjacency.keys(), &edges);

        debug!(
            pages = graph.node_count(),
            links = graph.edge_count(),
            dropped_self,
            dropped_external,
            "built link graph"
        );

        Self {
            graph,
            node_map,
            content_hash,
        }
    }

    /// Build a [`LinkGraph`] from an explicit edge list.
    ///
    /// Every page mentioned in `edges` becomes a node, as does every entry of
    /// `pages` (use that for pages without any links). Mostly useful for
    /// tests and benchmarks.
    #[must_use]
    pub fn from_edges(pages: &[&str], edges: &[(&str, &str)]) -> Self {
        let mut adjacency = Adjacency::new();
        for page in pages {
            adjacency.entry((*page).to_string()).or_default();
        }
        for (from, to) in edges {
            adjacency.entry((*to).to_string()).or_default();
            adjacency
                .entry((*from).to_string())
                .or_default()
                .insert((*to).to_string());
        }
        Self::from_adjacency(&adjacency)
    }

    /// Return the number of pages in the graph.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Return the number of links in the graph.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Return `true` if the graph has no pages.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Look up the `NodeIndex` for a page identifier.
    #[must_use]
    pub fn node_index(&self, page: &str) -> Option<NodeIndex> {
        self.node_map.get(page).copied()
    }

    /// Return the page identifier for a node.
    #[must_use]
    pub fn page(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(String::as_str)
    }

    /// Iterate page identifiers in index order (sorted by identifier).
    pub fn pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph.node_weights().map(String::as_str)
    }

    /// Iterate node indices in order.
    pub fn node_indices(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.node_indices()
    }

    /// Return the number of out-links of a node.
    #[must_use]
    pub fn out_degree(&self, idx: NodeIndex) -> usize {
        self.graph.neighbors_directed(idx, Direction::Outgoing).count()
    }

    /// Iterate the pages `idx` links to.
    pub fn links(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Outgoing)
    }

    /// Iterate the pages that link to `idx`.
    pub fn linkers(&self, idx: NodeIndex) -> impl Iterator<Item = NodeIndex> + '_ {
        self.graph.neighbors_directed(idx, Direction::Incoming)
    }

    /// Return `true` if the node has no out-links.
    #[must_use]
    pub fn is_dangling(&self, idx: NodeIndex) -> bool {
        self.graph
            .neighbors_directed(idx, Direction::Outgoing)
            .next()
            .is_none()
    }

    /// Return the identifiers of all dangling pages, sorted.
    #[must_use]
    pub fn dangling_pages(&self) -> Vec<&str> {
        self.graph
            .node_indices()
            .filter(|&idx| self.is_dangling(idx))
            .filter_map(|idx| self.page(idx))
            .collect()
    }

    /// BLAKE3 hash of the sorted page and link lists.
    #[must_use]
    pub fn content_hash(&self) -> &str {
        &self.content_hash
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Hash pages then edges; both arrive in sorted order from the adjacency map.
fn compute_content_hash<'a>(
    pages: impl Iterator<Item = &'a String>,
    edges: &[(&str, &str)],
) -> String {
    let mut hasher = blake3::Hasher::new();
    for page in pages {
        hasher.update(page.as_bytes());
        hasher.update(b"\x00");
    }
    hasher.update(b"\x01");
    for (from, to) in edges {
        hasher.update(from.as_bytes());
        hasher.update(b"\x00");
        hasher.update(to.as_bytes());
        hasher.update(b"\n");
    }
    hasher.finalize().to_hex().to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
