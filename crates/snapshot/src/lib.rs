//! Snapshot façade: evaluate every catalog record independently and keep per-record outcomes.

mod outcome;

pub use outcome::{RecordFailure, RecordOutcome, Snapshot, SnapshotSummary};

use phaethon_config::SnapshotConfig;
use phaethon_importer::CatalogRecord;
use phaethon_orbits::{OrbitError, OrbitState, OrbitalElements, SolverSettings, heliocentric_state};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Scheduling and solver options for one batch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapshotOptions {
    pub solver: SolverSettings,
    pub parallel: bool,
}

impl Default for SnapshotOptions {
    fn default() -> Self {
        Self {
            solver: SolverSettings::default(),
            parallel: true,
        }
    }
}

impl From<&SnapshotConfig> for SnapshotOptions {
    fn from(config: &SnapshotConfig) -> Self {
        Self {
            solver: SolverSettings {
                tolerance: config.solver.tolerance,
                max_iterations: config.solver.max_iterations,
            },
            parallel: config.batch.parallel,
        }
    }
}

/// Map `f` over `items`, in parallel when requested; output order always matches input order.
fn map_ordered<T, U, F>(items: Vec<T>, parallel: bool, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    if parallel {
        items.into_par_iter().map(f).collect()
    } else {
        items.into_iter().map(f).collect()
    }
}

/// Compute states for bare element sets, one result per input.
pub fn compute_states(
    elements: &[OrbitalElements],
    options: &SnapshotOptions,
) -> Vec<Result<OrbitState, OrbitError>> {
    let solver = options.solver;
    map_ordered(elements.to_vec(), options.parallel, |el| {
        heliocentric_state(&el, &solver)
    })
}

fn evaluate(record: CatalogRecord, solver: &SolverSettings) -> RecordOutcome {
    let result = record
        .elements()
        .map_err(RecordFailure::from)
        .and_then(|elements| heliocentric_state(&elements, solver).map_err(RecordFailure::from));
    match result {
        Ok(state) => {
            debug!(
                index = record.index,
                iterations = state.solver_iterations,
                "solved record"
            );
            RecordOutcome::Computed { record, state }
        }
        Err(failure) => {
            warn!(
                index = record.index,
                name = record.full_name().unwrap_or("<unnamed>"),
                error = %failure,
                "record skipped"
            );
            RecordOutcome::Failed { record, failure }
        }
    }
}

/// Evaluate a catalog. A failing record never aborts the batch.
///
/// Returns an error only when the solver settings themselves are unusable.
pub fn compute_snapshot(
    records: Vec<CatalogRecord>,
    options: &SnapshotOptions,
) -> Result<Snapshot, OrbitError> {
    options.solver.validate()?;
    let solver = options.solver;
    let outcomes = map_ordered(records, options.parallel, |record| {
        evaluate(record, &solver)
    });
    let snapshot = Snapshot::new(outcomes);
    let summary = snapshot.summary();
    info!(
        total = summary.total,
        computed = summary.computed,
        failed = summary.failed,
        parallel = options.parallel,
        "snapshot complete"
    );
    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use phaethon_importer::MalformedInput;
    use serde_json::json;

    fn catalog() -> Vec<CatalogRecord> {
        let rows = vec![
            json!({"full_name": "Earth-like", "a": 1.0, "e": 0.0167, "i": 0, "node": 0, "peri": 0, "M": 0}),
            json!({"full_name": "Comet", "a": 10.0, "e": 1.2, "i": 5, "node": 10, "peri": 20, "M": 30}),
            json!({"full_name": "Broken", "a": 1.0, "e": 0.1, "i": 0, "node": 0, "peri": 0}),
            json!({"full_name": "Inclined", "a": 1.5, "e": 0.1, "i": 10, "node": 30, "peri": 60, "M": 90}),
        ];
        rows.into_iter()
            .enumerate()
            .map(|(index, raw)| CatalogRecord::new(index, raw))
            .collect()
    }

    #[test]
    fn failures_are_isolated_per_record() {
        let snapshot = compute_snapshot(catalog(), &SnapshotOptions::default()).unwrap();
        let summary = snapshot.summary();
        assert_eq!(summary.total, 4);
        assert_eq!(summary.computed, 2);
        assert_eq!(summary.failed, 2);

        let indices: Vec<usize> = snapshot.outcomes.iter().map(|o| o.record().index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);

        assert_eq!(
            snapshot.outcomes[1].failure(),
            Some(&RecordFailure::Orbit(OrbitError::InvalidEccentricity {
                eccentricity: 1.2
            }))
        );
        assert_eq!(
            snapshot.outcomes[2].failure(),
            Some(&RecordFailure::Malformed(MalformedInput::MissingField {
                field: "M"
            }))
        );
        assert!(snapshot.outcomes[3].state().is_some());
    }

    #[test]
    fn parallel_and_sequential_runs_agree() {
        let parallel = compute_snapshot(catalog(), &SnapshotOptions::default()).unwrap();
        let sequential = compute_snapshot(
            catalog(),
            &SnapshotOptions {
                parallel: false,
                ..SnapshotOptions::default()
            },
        )
        .unwrap();
        assert_eq!(parallel, sequential);
    }

    #[test]
    fn bare_elements_keep_order() {
        let elements: Vec<OrbitalElements> = (0..64)
            .map(|k| {
                let k = k as f64;
                OrbitalElements::new(1.0 + k * 0.1, 0.2, 3.0, 40.0, 50.0, k * 5.0)
            })
            .collect();
        let states = compute_states(&elements, &SnapshotOptions::default());
        assert_eq!(states.len(), elements.len());
        for (el, state) in elements.iter().zip(&states) {
            let expected = heliocentric_state(el, &SolverSettings::default()).unwrap();
            assert_eq!(state.as_ref().unwrap(), &expected);
        }
    }

    #[test]
    fn unusable_settings_fail_the_batch_up_front() {
        let options = SnapshotOptions {
            solver: SolverSettings {
                tolerance: 0.0,
                max_iterations: 10,
            },
            parallel: false,
        };
        assert!(matches!(
            compute_snapshot(catalog(), &options),
            Err(OrbitError::InvalidSettings { .. })
        ));
    }

    #[test]
    fn options_follow_config() {
        let mut config = SnapshotConfig::default();
        config.solver.max_iterations = 7;
        config.batch.parallel = false;
        let options = SnapshotOptions::from(&config);
        assert_eq!(options.solver.max_iterations, 7);
        assert!(!options.parallel);
    }
}
