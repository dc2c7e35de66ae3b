//! Result presentation: human-readable listing or a single JSON document.
//!
//! Human output lists every page sorted by identifier with four decimals,
//! first the sampling estimate, then the iterated one. JSON output carries
//! the same ranks plus graph and run metadata.

use std::io::{self, Write};
use std::path::Path;

use linkrank_core::distribution::max_abs_difference;
use linkrank_core::{Distribution, LinkGraph, RankConfig, RankReport};
use serde::Serialize;

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// One ranking section per estimator.
    Human,
    /// Machine-readable JSON.
    Json,
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    corpus: String,
    pages: usize,
    links: usize,
    graph_hash: &'a str,
    damping: f64,
    seed: u64,
    sampling: JsonSampling<'a>,
    iteration: JsonIteration<'a>,
    max_difference: f64,
}

#[derive(Debug, Serialize)]
struct JsonSampling<'a> {
    samples: usize,
    chains: usize,
    ranks: &'a Distribution,
}

#[derive(Debug, Serialize)]
struct JsonIteration<'a> {
    iterations: usize,
    delta: f64,
    ranks: &'a Distribution,
}

/// Write `report` to `w` in the requested mode.
///
/// # Errors
///
/// Returns an error if writing fails or JSON serialization fails.
pub fn render(
    w: &mut dyn Write,
    mode: OutputMode,
    corpus: &Path,
    graph: &LinkGraph,
    config: &RankConfig,
    report: &RankReport,
) -> anyhow::Result<()> {
    match mode {
        OutputMode::Human => {
            write_section(
                w,
                &format!("PageRank Results from Sampling (n = {})", config.samples),
                &report.sampled,
            )?;
            write_section(w, "PageRank Results from Iteration", &report.iterated.scores)?;
        }
        OutputMode::Json => {
            let doc = JsonReport {
                corpus: corpus.display().to_string(),
                pages: graph.node_count(),
                links: graph.edge_count(),
                graph_hash: graph.content_hash(),
                damping: config.damping,
                seed: report.seed,
                sampling: JsonSampling {
                    samples: config.samples,
                    chains: config.chains,
                    ranks: &report.sampled,
                },
                iteration: JsonIteration {
                    iterations: report.iterated.iterations,
                    delta: report.iterated.delta,
                    ranks: &report.iterated.scores,
                },
                max_difference: max_abs_difference(&report.sampled, &report.iterated.scores),
            };
            serde_json::to_writer_pretty(&mut *w, &doc)?;
            writeln!(w)?;
        }
    }
    Ok(())
}

/// Heading followed by `  page: rank` lines in identifier order.
fn write_section(w: &mut dyn Write, heading: &str, ranks: &Distribution) -> io::Result<()> {
    writeln!(w, "{heading}")?;
    for (page, rank) in ranks {
        writeln!(w, "  {page}: {rank:.4}")?;
    }
    Ok(())
}
