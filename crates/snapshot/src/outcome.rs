use std::fmt;

use phaethon_importer::{CatalogRecord, MalformedInput};
use phaethon_orbits::{OrbitError, OrbitState};
use thiserror::Error;

/// Why a single record produced no state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordFailure {
    #[error("malformed input: {0}")]
    Malformed(#[from] MalformedInput),
    #[error("{0}")]
    Orbit(#[from] OrbitError),
}

impl RecordFailure {
    /// Stable snake_case label for reports.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Malformed(_) => "malformed_input",
            Self::Orbit(OrbitError::InvalidEccentricity { .. }) => "invalid_eccentricity",
            Self::Orbit(OrbitError::InvalidSemiMajorAxis { .. }) => "invalid_semi_major_axis",
            Self::Orbit(OrbitError::NonFinite { .. }) => "non_finite",
            Self::Orbit(OrbitError::NonConvergence { .. }) => "solver_non_convergence",
            Self::Orbit(OrbitError::InvalidSettings { .. }) => "invalid_settings",
        }
    }
}

/// Explicit success or failure for one input record.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordOutcome {
    Computed {
        record: CatalogRecord,
        state: OrbitState,
    },
    Failed {
        record: CatalogRecord,
        failure: RecordFailure,
    },
}

impl RecordOutcome {
    pub fn record(&self) -> &CatalogRecord {
        match self {
            Self::Computed { record, .. } | Self::Failed { record, .. } => record,
        }
    }

    pub fn state(&self) -> Option<&OrbitState> {
        match self {
            Self::Computed { state, .. } => Some(state),
            Self::Failed { .. } => None,
        }
    }

    pub fn failure(&self) -> Option<&RecordFailure> {
        match self {
            Self::Computed { .. } => None,
            Self::Failed { failure, .. } => Some(failure),
        }
    }
}

/// All outcomes of one batch, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub outcomes: Vec<RecordOutcome>,
}

impl Snapshot {
    pub fn new(outcomes: Vec<RecordOutcome>) -> Self {
        Self { outcomes }
    }

    pub fn computed(&self) -> impl Iterator<Item = (&CatalogRecord, &OrbitState)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            RecordOutcome::Computed { record, state } => Some((record, state)),
            RecordOutcome::Failed { .. } => None,
        })
    }

    pub fn failures(&self) -> impl Iterator<Item = (&CatalogRecord, &RecordFailure)> {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            RecordOutcome::Failed { record, failure } => Some((record, failure)),
            RecordOutcome::Computed { .. } => None,
        })
    }

    pub fn summary(&self) -> SnapshotSummary {
        let computed = self.computed().count();
        SnapshotSummary {
            total: self.outcomes.len(),
            computed,
            failed: self.outcomes.len() - computed,
        }
    }
}

/// Record counts for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotSummary {
    pub total: usize,
    pub computed: usize,
    pub failed: usize,
}

impl fmt::Display for SnapshotSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "computed {} of {} records ({} failed)",
            self.computed, self.total, self.failed
        )
    }
}
