#![forbid(unsafe_code)]

mod crawl;
mod output;

use std::env;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use linkrank_core::{LinkGraph, RankConfig, rank};
use output::OutputMode;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "linkrank: rank a directory of hyperlinked HTML pages",
    long_about = None,
    after_help = "EXAMPLES:\n    # Rank a corpus with default settings\n    linkrank corpus0\n\n    # Reproducible run with four sampling chains\n    linkrank corpus0 --chains 4 --seed 7\n\n    # Emit machine-readable output\n    linkrank corpus0 --json"
)]
struct Cli {
    /// Directory containing the `.html` pages to rank.
    corpus: PathBuf,

    /// Damping factor: probability of following a link instead of jumping.
    #[arg(long)]
    damping: Option<f64>,

    /// Number of surfer steps for the sampling estimate.
    #[arg(long)]
    samples: Option<usize>,

    /// Convergence tolerance for power iteration.
    #[arg(long)]
    tolerance: Option<f64>,

    /// Give up power iteration after this many iterations.
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Number of independent sampling chains run in parallel.
    #[arg(long)]
    chains: Option<usize>,

    /// Seed for the sampler (random when omitted).
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with default tunables; flags override it.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit JSON output instead of human-readable text.
    #[arg(long)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Derive the output mode from flags.
    const fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }

    /// Defaults, then the config file, then flags.
    fn rank_config(&self) -> Result<RankConfig> {
        let mut config = match &self.config {
            Some(path) => RankConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RankConfig::default(),
        };
        if let Some(damping) = self.damping {
            config.damping = damping;
        }
        if let Some(samples) = self.samples {
            config.samples = samples;
        }
        if let Some(tolerance) = self.tolerance {
            config.tolerance = tolerance;
        }
        if let Some(max_iterations) = self.max_iterations {
            config.max_iterations = max_iterations;
        }
        if let Some(chains) = self.chains {
            config.chains = chains;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(config)
    }
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_env("LINKRANK_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if verbose || env::var("DEBUG").is_ok() {
            "linkrank=debug,linkrank_core=debug,info"
        } else {
            "linkrank=info,linkrank_core=info,warn"
        })
    });

    let format = env::var("LINKRANK_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry
                .with(fmt::layer().json().with_ansi(false).with_writer(io::stderr))
                .init();
        }
        _ => {
            registry
                .with(fmt::layer().compact().with_writer(io::stderr))
                .init();
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.rank_config()?;
    config.validate().context("invalid ranking parameters")?;

    let adjacency = crawl::crawl(&cli.corpus)?;
    if adjacency.is_empty() {
        bail!("no .html pages found in {}", cli.corpus.display());
    }

    let graph = LinkGraph::from_adjacency(&adjacency);
    info!(
        pages = graph.node_count(),
        links = graph.edge_count(),
        "loaded corpus"
    );

    let report = rank(&graph, &config).context("ranking failed")?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    output::render(
        &mut out,
        cli.output_mode(),
        &cli.corpus,
        &graph,
        &config,
        &report,
    )
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    run(&cli)
}
