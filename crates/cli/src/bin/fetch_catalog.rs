//! Download a remote element catalog so later runs can work from a local file.

use std::path::PathBuf;

use clap::Parser;
use phaethon::importer::{self, CatalogSource};
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about = "Fetch an orbital element catalog over HTTP")]
struct Cli {
    /// Catalog URL
    #[arg(long)]
    url: String,

    /// Destination file
    #[arg(long, default_value = "data/csvjson.json")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    phaethon_cli::init_tracing();
    let cli = Cli::parse();

    let bytes = importer::download_catalog(&cli.url, &cli.output)?;
    let records = importer::load_catalog(&CatalogSource::File(cli.output.clone()))?;
    info!(records = records.len(), "catalog parsed");
    println!(
        "[downloaded] {} ({}, {} records)",
        cli.output.display(),
        format_size(bytes),
        records.len()
    );
    Ok(())
}

fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit_idx = 0;
    while value >= 1024.0 && unit_idx < UNITS.len() - 1 {
        value /= 1024.0;
        unit_idx += 1;
    }
    if unit_idx == 0 {
        format!("{bytes} {}", UNITS[unit_idx])
    } else {
        format!("{value:.1} {}", UNITS[unit_idx])
    }
}
