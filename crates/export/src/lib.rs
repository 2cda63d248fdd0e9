//! Export helpers for enriched JSON catalogs, CSV tables, and failure reports.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Which derived columns are appended to each computed record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnOptions {
    pub include_distance: bool,
}

impl Default for ColumnOptions {
    fn default() -> Self {
        Self {
            include_distance: true,
        }
    }
}

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod enriched {
    use std::io::Write;

    use phaethon_snapshot::Snapshot;
    use serde_json::{Map, Value};

    use super::{ColumnOptions, ExportError};

    /// Build the enriched rows: each computed input object plus its derived columns.
    ///
    /// Existing keys with the same names are overwritten, so re-running on an enriched
    /// catalog replaces the previous snapshot.
    pub fn enriched_rows(snapshot: &Snapshot, columns: ColumnOptions) -> Vec<Value> {
        snapshot
            .computed()
            .map(|(record, state)| {
                let mut row: Map<String, Value> = record.fields().cloned().unwrap_or_default();
                row.insert("x".into(), state.x().into());
                row.insert("y".into(), state.y().into());
                row.insert("z".into(), state.z().into());
                row.insert(
                    "eccentric_anomaly".into(),
                    state.eccentric_anomaly_deg.into(),
                );
                row.insert("true_anomaly".into(), state.true_anomaly_deg.into());
                if columns.include_distance {
                    row.insert("r".into(), state.distance_au.into());
                }
                Value::Object(row)
            })
            .collect()
    }

    /// Write the enriched catalog as a compact JSON array of records.
    pub fn write_enriched(
        writer: &mut dyn Write,
        snapshot: &Snapshot,
        columns: ColumnOptions,
    ) -> Result<(), ExportError> {
        serde_json::to_writer(&mut *writer, &enriched_rows(snapshot, columns))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}

pub mod table {
    use std::io::Write;

    use phaethon_snapshot::Snapshot;

    use super::{ColumnOptions, ExportError};

    /// Write one CSV row per computed record, in input order.
    pub fn write_states(
        writer: &mut dyn Write,
        snapshot: &Snapshot,
        columns: ColumnOptions,
    ) -> Result<(), ExportError> {
        let mut out = csv::Writer::from_writer(writer);
        let mut header = vec!["index", "full_name", "x", "y", "z"];
        if columns.include_distance {
            header.push("r");
        }
        header.extend(["eccentric_anomaly", "true_anomaly"]);
        out.write_record(&header)?;

        for (record, state) in snapshot.computed() {
            let mut row = vec![
                record.index.to_string(),
                record.full_name().unwrap_or_default().to_string(),
                state.x().to_string(),
                state.y().to_string(),
                state.z().to_string(),
            ];
            if columns.include_distance {
                row.push(state.distance_au.to_string());
            }
            row.push(state.eccentric_anomaly_deg.to_string());
            row.push(state.true_anomaly_deg.to_string());
            out.write_record(&row)?;
        }
        out.flush()?;
        Ok(())
    }
}

pub mod failures {
    use std::io::Write;

    use phaethon_snapshot::Snapshot;
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    use super::ExportError;

    /// One entry of the failure report.
    #[derive(Debug, Serialize)]
    pub struct FailureEntry<'a> {
        pub index: usize,
        pub full_name: Option<&'a str>,
        pub kind: &'static str,
        pub error: String,
    }

    pub fn failure_entries(snapshot: &Snapshot) -> Vec<FailureEntry<'_>> {
        snapshot
            .failures()
            .map(|(record, failure)| FailureEntry {
                index: record.index,
                full_name: record.full_name(),
                kind: failure.kind(),
                error: failure.to_string(),
            })
            .collect()
    }

    /// Write every failed record as `{index, full_name, kind, error}`.
    pub fn write_failures(writer: &mut dyn Write, snapshot: &Snapshot) -> Result<(), ExportError> {
        to_writer_pretty(&mut *writer, &failure_entries(snapshot))?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }
}
