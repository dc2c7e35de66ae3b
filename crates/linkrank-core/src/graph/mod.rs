//! Link graph module.
//!
//! # Overview
//!
//! Turns the crawler's adjacency relation into the immutable directed graph
//! that the transition model, the sampler and the power-iteration solver all
//! read.
//!
//! ```text
//! crawler adjacency (page → {targets})
//!        ↓  build::LinkGraph::from_adjacency()
//! LinkGraph (DiGraph, closed corpus, no self-links)
//!        ↓
//! transition / sample / iterate
//! ```

pub mod build;

pub use build::{Adjacency, LinkGraph};
