use thiserror::Error;

/// Failures raised while solving or transforming a single orbit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OrbitError {
    #[error("eccentricity {eccentricity} is outside the elliptical range [0, 1)")]
    InvalidEccentricity { eccentricity: f64 },
    #[error("semi-major axis {semi_major_axis_au} AU must be positive")]
    InvalidSemiMajorAxis { semi_major_axis_au: f64 },
    #[error("element `{field}` is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("Kepler solver did not converge after {iterations} iterations (residual {residual:e})")]
    NonConvergence { iterations: usize, residual: f64 },
    #[error("invalid solver settings: {reason}")]
    InvalidSettings { reason: &'static str },
}
