use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use phaethon::config::{OutputFormat, SnapshotConfig, load_config};
use phaethon::importer::CatalogSource;
use phaethon::pipeline::{PrecomputeRequest, precompute};

/// Compute heliocentric positions and anomalies for every record of an element catalog.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Heliocentric snapshot precompute (two-body Keplerian)"
)]
struct Cli {
    /// Catalog JSON: local path or http(s) URL
    #[arg(long)]
    input: String,

    /// Output path (`-` for stdout)
    #[arg(long, default_value = "precomputed_kepler_data.json")]
    output: PathBuf,

    /// Optional TOML/YAML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format (overrides config)
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Write a JSON report of records that could not be computed.
    /// Without it, skipped records are only logged as warnings.
    #[arg(long)]
    failures: Option<PathBuf>,

    /// Newton-Raphson step tolerance in radians (overrides config)
    #[arg(long)]
    tolerance: Option<f64>,

    /// Newton-Raphson iteration cap (overrides config)
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Evaluate records on a single thread
    #[arg(long, default_value_t = false)]
    sequential: bool,

    /// Omit the heliocentric distance column `r`
    #[arg(long, default_value_t = false)]
    no_distance: bool,
}

#[derive(Copy, Clone, ValueEnum, Debug)]
enum FormatArg {
    Json,
    Csv,
}

impl From<FormatArg> for OutputFormat {
    fn from(value: FormatArg) -> Self {
        match value {
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Csv => OutputFormat::Csv,
        }
    }
}

fn main() -> anyhow::Result<()> {
    phaethon_cli::init_tracing();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => SnapshotConfig::default(),
    };
    if let Some(tolerance) = cli.tolerance {
        config.solver.tolerance = tolerance;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.solver.max_iterations = max_iterations;
    }
    if let Some(format) = cli.format {
        config.output.format = format.into();
    }
    if cli.sequential {
        config.batch.parallel = false;
    }
    if cli.no_distance {
        config.output.include_distance = false;
    }
    config.validate()?;

    let source = CatalogSource::parse(&cli.input);
    let mut request = PrecomputeRequest::from_config(source, cli.output.clone(), &config);
    request.failures = cli.failures.clone();

    let summary = precompute(&request).with_context(|| format!("precomputing {}", cli.input))?;
    eprintln!("{summary}");
    Ok(())
}
