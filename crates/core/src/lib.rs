//! Core constants, unit conversions, and shared primitives for the Phaethon workspace.

/// Numeric constants shared by the solver and the frame transform.
pub mod constants {
    /// One full turn in radians.
    pub const TAU: f64 = std::f64::consts::TAU;
    /// Default Newton-Raphson step tolerance on the eccentric anomaly (radians).
    pub const DEFAULT_TOLERANCE: f64 = 1e-8;
    /// Default Newton-Raphson iteration cap.
    pub const DEFAULT_MAX_ITERATIONS: usize = 50;
}

/// Basic unit conversion helpers.
pub mod units {
    /// Convert degrees to radians.
    #[inline]
    pub fn deg_to_rad(v: f64) -> f64 {
        v.to_radians()
    }

    /// Convert radians to degrees.
    #[inline]
    pub fn rad_to_deg(v: f64) -> f64 {
        v.to_degrees()
    }
}

/// Angle reduction helpers.
pub mod angles {
    use super::constants::TAU;

    /// Reduce an angle in radians into `[0, 2π)`.
    #[inline]
    pub fn reduce_radians(angle: f64) -> f64 {
        let reduced = angle.rem_euclid(TAU);
        // rem_euclid can round up to exactly TAU for tiny negative inputs
        if reduced >= TAU { 0.0 } else { reduced }
    }

    /// Reduce an angle in degrees into `[0, 360)`.
    #[inline]
    pub fn reduce_degrees(angle: f64) -> f64 {
        let reduced = angle.rem_euclid(360.0);
        if reduced >= 360.0 { 0.0 } else { reduced }
    }
}

/// Minimal vector helpers to avoid ad-hoc `[f64; 3]` math everywhere.
pub mod vector {
    /// Alias for a 3D vector, in AU unless stated otherwise.
    pub type Vector3 = [f64; 3];

    /// Euclidean norm of a vector.
    #[inline]
    pub fn norm(v: &Vector3) -> f64 {
        dot(v, v).sqrt()
    }

    /// Dot product of two vectors.
    #[inline]
    pub fn dot(a: &Vector3, b: &Vector3) -> f64 {
        a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
    }
}
