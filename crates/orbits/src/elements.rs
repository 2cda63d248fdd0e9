//! Input element sets and the derived heliocentric state.

use phaethon_core::vector::Vector3;
use serde::{Deserialize, Serialize};

use crate::error::OrbitError;

/// Classical Keplerian elements of one body, angles in degrees.
///
/// Field names deserialize from the short catalog keys (`a`, `e`, `i`, `node`, `peri`, `M`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrbitalElements {
    #[serde(rename = "a")]
    pub semi_major_axis_au: f64,
    #[serde(rename = "e")]
    pub eccentricity: f64,
    #[serde(rename = "i")]
    pub inclination_deg: f64,
    #[serde(rename = "node")]
    pub ascending_node_deg: f64,
    #[serde(rename = "peri")]
    pub periapsis_arg_deg: f64,
    #[serde(rename = "M")]
    pub mean_anomaly_deg: f64,
}

impl OrbitalElements {
    pub fn new(
        semi_major_axis_au: f64,
        eccentricity: f64,
        inclination_deg: f64,
        ascending_node_deg: f64,
        periapsis_arg_deg: f64,
        mean_anomaly_deg: f64,
    ) -> Self {
        Self {
            semi_major_axis_au,
            eccentricity,
            inclination_deg,
            ascending_node_deg,
            periapsis_arg_deg,
            mean_anomaly_deg,
        }
    }

    /// Check the element set lies in the closed-ellipse domain before any solving happens.
    pub fn validate(&self) -> Result<(), OrbitError> {
        let fields = [
            ("a", self.semi_major_axis_au),
            ("e", self.eccentricity),
            ("i", self.inclination_deg),
            ("node", self.ascending_node_deg),
            ("peri", self.periapsis_arg_deg),
            ("M", self.mean_anomaly_deg),
        ];
        if let Some((field, value)) = fields.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(OrbitError::NonFinite { field, value });
        }
        // hyperbolic catalog rows carry a < 0, so report the eccentricity first
        crate::kepler::check_eccentricity(self.eccentricity)?;
        if self.semi_major_axis_au <= 0.0 {
            return Err(OrbitError::InvalidSemiMajorAxis {
                semi_major_axis_au: self.semi_major_axis_au,
            });
        }
        Ok(())
    }
}

/// Heliocentric ecliptic snapshot of one body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OrbitState {
    pub position_au: Vector3,
    pub distance_au: f64,
    pub eccentric_anomaly_deg: f64,
    pub true_anomaly_deg: f64,
    pub solver_iterations: usize,
}

impl OrbitState {
    pub fn x(&self) -> f64 {
        self.position_au[0]
    }

    pub fn y(&self) -> f64 {
        self.position_au[1]
    }

    pub fn z(&self) -> f64 {
        self.position_au[2]
    }
}
