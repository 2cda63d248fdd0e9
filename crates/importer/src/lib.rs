//! Orbital element catalog import: local JSON files and HTTP documents.

pub mod record;

use reqwest::blocking::Client;
use serde_json::Value;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufReader, copy};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub use record::{CatalogRecord, ELEMENT_KEYS, MalformedInput};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("filesystem error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON catalog: {0}")]
    Json(#[from] serde_json::Error),
    #[error("catalog document must be a JSON array of records")]
    NotAnArray,
}

/// Where a catalog document comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    /// `http://` and `https://` prefixes select a URL, anything else is a file path.
    pub fn parse(input: &str) -> Self {
        let lower = input.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            Self::Url(input.to_string())
        } else {
            Self::File(PathBuf::from(input))
        }
    }
}

impl fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Load and split a catalog document into records, in document order.
pub fn load_catalog(source: &CatalogSource) -> Result<Vec<CatalogRecord>, ImportError> {
    let document: Value = match source {
        CatalogSource::File(path) => {
            let reader = BufReader::new(File::open(path)?);
            serde_json::from_reader(reader)?
        }
        CatalogSource::Url(url) => {
            let client = Client::builder().build()?;
            let body = client.get(url).send()?.error_for_status()?.text()?;
            serde_json::from_str(&body)?
        }
    };
    let records = parse_catalog(document)?;
    info!(source = %source, records = records.len(), "loaded catalog");
    Ok(records)
}

/// Split an already-parsed JSON document into indexed records.
pub fn parse_catalog(document: Value) -> Result<Vec<CatalogRecord>, ImportError> {
    match document {
        Value::Array(rows) => Ok(rows
            .into_iter()
            .enumerate()
            .map(|(index, raw)| CatalogRecord::new(index, raw))
            .collect()),
        _ => Err(ImportError::NotAnArray),
    }
}

/// Download a remote catalog document to `dest`, returning the number of bytes written.
pub fn download_catalog(url: &str, dest: &Path) -> Result<u64, ImportError> {
    if let Some(parent) = dest.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let client = Client::builder().build()?;
    let mut response = client.get(url).send()?.error_for_status()?;
    let mut file = File::create(dest)?;
    let bytes = copy(&mut response, &mut file)?;
    debug!(url, bytes, dest = %dest.display(), "downloaded catalog");
    Ok(bytes)
}
