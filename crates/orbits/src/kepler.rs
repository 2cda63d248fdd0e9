//! Newton-Raphson solution of Kepler's equation `E - e·sin(E) = M` for closed orbits.

use std::f64::consts::PI;

use phaethon_core::angles::reduce_radians;
use phaethon_core::constants::{DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE};
use phaethon_core::units::deg_to_rad;

use crate::error::OrbitError;

/// Stopping rules for the Newton iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Convergence threshold on the step `|E_{n+1} - E_n|` (radians).
    pub tolerance: f64,
    /// Hard cap on Newton steps; exceeding it is reported as non-convergence.
    pub max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverSettings {
    pub fn validate(&self) -> Result<(), OrbitError> {
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(OrbitError::InvalidSettings {
                reason: "tolerance must be a positive finite number",
            });
        }
        if self.max_iterations == 0 {
            return Err(OrbitError::InvalidSettings {
                reason: "max_iterations must be at least 1",
            });
        }
        Ok(())
    }
}

/// Converged eccentric anomaly with solver diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KeplerSolution {
    /// Eccentric anomaly in radians, within `[0, 2π)` up to the solver tolerance.
    pub eccentric_anomaly_rad: f64,
    pub iterations: usize,
    /// `|E - e·sin(E) - M|` at the returned E.
    pub residual: f64,
}

/// Reject eccentricities outside the elliptical regime.
pub fn check_eccentricity(eccentricity: f64) -> Result<(), OrbitError> {
    if !eccentricity.is_finite() {
        return Err(OrbitError::NonFinite {
            field: "e",
            value: eccentricity,
        });
    }
    if !(0.0..1.0).contains(&eccentricity) {
        return Err(OrbitError::InvalidEccentricity { eccentricity });
    }
    Ok(())
}

#[inline]
fn kepler_residual(eccentric_anomaly: f64, eccentricity: f64, mean_anomaly: f64) -> f64 {
    eccentric_anomaly - eccentricity * eccentric_anomaly.sin() - mean_anomaly
}

/// Run Newton-Raphson from `start`, returning `(E, steps)` or the last residual on failure.
fn newton_pass(
    start: f64,
    eccentricity: f64,
    mean_anomaly: f64,
    settings: &SolverSettings,
) -> Result<(f64, usize), f64> {
    let mut ea = start;
    for iteration in 1..=settings.max_iterations {
        let f = kepler_residual(ea, eccentricity, mean_anomaly);
        // 1 - e·cos(E) >= 1 - e > 0 on the validated domain
        let fp = 1.0 - eccentricity * ea.cos();
        let delta = f / fp;
        if !delta.is_finite() {
            break;
        }
        ea -= delta;
        if delta.abs() < settings.tolerance {
            return Ok((ea, iteration));
        }
    }
    Err(kepler_residual(ea, eccentricity, mean_anomaly).abs())
}

/// Solve Kepler's equation for a mean anomaly given in degrees.
///
/// The mean anomaly may be any finite real; it is reduced to `[0, 2π)` before iterating.
/// The first pass starts from the reduced mean anomaly. Near-parabolic orbits can make that
/// start overshoot, so a failed pass is retried once from `E = π`, where the iteration
/// converges for every `e < 1`. `iterations` counts the steps of the pass that converged.
pub fn solve_eccentric_anomaly(
    mean_anomaly_deg: f64,
    eccentricity: f64,
    settings: &SolverSettings,
) -> Result<KeplerSolution, OrbitError> {
    settings.validate()?;
    check_eccentricity(eccentricity)?;
    if !mean_anomaly_deg.is_finite() {
        return Err(OrbitError::NonFinite {
            field: "M",
            value: mean_anomaly_deg,
        });
    }

    let mean_anomaly = reduce_radians(deg_to_rad(mean_anomaly_deg));
    if eccentricity == 0.0 {
        return Ok(KeplerSolution {
            eccentric_anomaly_rad: mean_anomaly,
            iterations: 0,
            residual: 0.0,
        });
    }

    let (ea, iterations) = newton_pass(mean_anomaly, eccentricity, mean_anomaly, settings)
        .or_else(|_| newton_pass(PI, eccentricity, mean_anomaly, settings))
        .map_err(|residual| OrbitError::NonConvergence {
            iterations: settings.max_iterations,
            residual,
        })?;

    Ok(KeplerSolution {
        eccentric_anomaly_rad: ea,
        iterations,
        residual: kepler_residual(ea, eccentricity, mean_anomaly).abs(),
    })
}

/// Solve independent `(mean_anomaly_deg, eccentricity)` pairs, preserving input order.
pub fn solve_batch(
    pairs: &[(f64, f64)],
    settings: &SolverSettings,
) -> Vec<Result<KeplerSolution, OrbitError>> {
    pairs
        .iter()
        .map(|&(mean_anomaly_deg, eccentricity)| {
            solve_eccentric_anomaly(mean_anomaly_deg, eccentricity, settings)
        })
        .collect()
}
