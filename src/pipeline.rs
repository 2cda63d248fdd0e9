//! End-to-end precompute run: load a catalog, evaluate it, write the enriched table.

use std::io::Write;
use std::path::PathBuf;

use phaethon_config::{OutputFormat, SnapshotConfig};
use phaethon_export::{ColumnOptions, ExportError, enriched, failures, table, writer_for_path};
use phaethon_importer::{CatalogSource, ImportError, load_catalog};
use phaethon_orbits::OrbitError;
use phaethon_snapshot::{Snapshot, SnapshotOptions, SnapshotSummary, compute_snapshot};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("catalog import failed: {0}")]
    Import(#[from] ImportError),
    #[error("solver configuration rejected: {0}")]
    Solver(#[from] OrbitError),
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
    #[error("failed to open output: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything one precompute run needs.
#[derive(Debug, Clone)]
pub struct PrecomputeRequest {
    pub source: CatalogSource,
    /// Destination for the computed table; `-` writes to stdout.
    pub output: PathBuf,
    /// Optional JSON report of records that could not be computed.
    pub failures: Option<PathBuf>,
    pub options: SnapshotOptions,
    pub format: OutputFormat,
    pub columns: ColumnOptions,
}

impl PrecomputeRequest {
    /// Build a request whose solver, scheduling and output settings come from `config`.
    pub fn from_config(source: CatalogSource, output: PathBuf, config: &SnapshotConfig) -> Self {
        Self {
            source,
            output,
            failures: None,
            options: SnapshotOptions::from(config),
            format: config.output.format,
            columns: ColumnOptions {
                include_distance: config.output.include_distance,
            },
        }
    }
}

/// Write the computed records of a snapshot in the requested format.
pub fn write_snapshot(
    writer: &mut dyn Write,
    snapshot: &Snapshot,
    format: OutputFormat,
    columns: ColumnOptions,
) -> Result<(), ExportError> {
    match format {
        OutputFormat::Json => enriched::write_enriched(writer, snapshot, columns),
        OutputFormat::Csv => table::write_states(writer, snapshot, columns),
    }
}

/// Run a precompute request, returning the record counts.
///
/// Per-record failures are reported, not raised; only I/O, parse and settings problems
/// end the run with an error.
pub fn precompute(request: &PrecomputeRequest) -> Result<SnapshotSummary, PipelineError> {
    let records = load_catalog(&request.source)?;
    let snapshot = compute_snapshot(records, &request.options)?;

    let mut writer = writer_for_path(&request.output)?;
    write_snapshot(&mut *writer, &snapshot, request.format, request.columns)?;

    if let Some(path) = &request.failures {
        let mut report = writer_for_path(path)?;
        failures::write_failures(&mut *report, &snapshot)?;
        info!(path = %path.display(), "wrote failure report");
    }

    Ok(snapshot.summary())
}
