//! Configuration models and loaders for Phaethon snapshot runs.

use std::fs::File;
use std::path::Path;

use phaethon_core::constants::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use serde::Deserialize;
use thiserror::Error;

/// Top-level settings for one snapshot run.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct SnapshotConfig {
    pub solver: SolverConfig,
    pub batch: BatchConfig,
    pub output: OutputConfig,
}

/// Newton-Raphson stopping rules.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// How records are scheduled.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct BatchConfig {
    pub parallel: bool,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Output table shape.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub include_distance: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Json,
            include_distance: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(&'static str),
}

impl SnapshotConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.solver.tolerance.is_finite() || self.solver.tolerance <= 0.0 {
            return Err(ConfigError::Invalid(
                "solver.tolerance must be a positive finite number",
            ));
        }
        if self.solver.max_iterations == 0 {
            return Err(ConfigError::Invalid("solver.max_iterations must be at least 1"));
        }
        Ok(())
    }
}

/// Load a snapshot configuration; `.toml` files use TOML, everything else YAML.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<SnapshotConfig, ConfigError> {
    let path = path.as_ref();
    let config: SnapshotConfig = if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)?
    } else {
        let reader = File::open(path)?;
        serde_yaml::from_reader(reader)?
    };
    config.validate()?;
    Ok(config)
}
