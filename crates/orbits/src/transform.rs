//! Eccentric anomaly and elements to heliocentric ecliptic position.
//!
//! The rotation is the usual `R_z(Ω)·R_x(i)·R_z(ω)` composition written out in closed form,
//! applied to the orbital-plane point `(r·cos ν, r·sin ν, 0)`.

use phaethon_core::angles::{reduce_degrees, reduce_radians};
use phaethon_core::units::{deg_to_rad, rad_to_deg};
use phaethon_core::vector::{Vector3, dot};

use crate::elements::{OrbitState, OrbitalElements};
use crate::error::OrbitError;
use crate::kepler::{SolverSettings, solve_eccentric_anomaly};

/// Row-major 3×3 rotation from the perifocal frame to the ecliptic frame.
pub type RotationMatrix = [[f64; 3]; 3];

/// True anomaly (radians) from the eccentric anomaly, using the half-angle atan2 form.
#[inline]
pub fn true_anomaly(eccentric_anomaly_rad: f64, eccentricity: f64) -> f64 {
    let half = 0.5 * eccentric_anomaly_rad;
    2.0 * ((1.0 + eccentricity).sqrt() * half.sin())
        .atan2((1.0 - eccentricity).sqrt() * half.cos())
}

/// Distance from the focus (same unit as `semi_major_axis`).
#[inline]
pub fn heliocentric_distance(
    semi_major_axis: f64,
    eccentricity: f64,
    true_anomaly_rad: f64,
) -> f64 {
    semi_major_axis * (1.0 - eccentricity * eccentricity)
        / (1.0 + eccentricity * true_anomaly_rad.cos())
}

/// Position in the orbital plane with the x' axis pointing at periapsis.
#[inline]
pub fn orbital_plane_position(distance: f64, true_anomaly_rad: f64) -> [f64; 2] {
    [
        distance * true_anomaly_rad.cos(),
        distance * true_anomaly_rad.sin(),
    ]
}

/// Perifocal-to-ecliptic rotation for angles in radians.
///
/// Columns are the periapsis direction, the in-plane normal to it, and the orbit normal.
pub fn rotation_matrix(
    inclination: f64,
    ascending_node: f64,
    periapsis_arg: f64,
) -> RotationMatrix {
    let (sin_i, cos_i) = inclination.sin_cos();
    let (sin_node, cos_node) = ascending_node.sin_cos();
    let (sin_peri, cos_peri) = periapsis_arg.sin_cos();

    [
        [
            cos_node * cos_peri - sin_node * sin_peri * cos_i,
            -cos_node * sin_peri - sin_node * cos_peri * cos_i,
            sin_node * sin_i,
        ],
        [
            sin_node * cos_peri + cos_node * sin_peri * cos_i,
            -sin_node * sin_peri + cos_node * cos_peri * cos_i,
            -cos_node * sin_i,
        ],
        [sin_i * sin_peri, sin_i * cos_peri, cos_i],
    ]
}

/// Rotate an orbital-plane point into the heliocentric ecliptic frame (angles in radians).
pub fn rotate_to_ecliptic(
    plane: [f64; 2],
    inclination: f64,
    ascending_node: f64,
    periapsis_arg: f64,
) -> Vector3 {
    let m = rotation_matrix(inclination, ascending_node, periapsis_arg);
    let perifocal = [plane[0], plane[1], 0.0];
    m.map(|row| dot(&row, &perifocal))
}

/// Solve Kepler's equation for one element set and place the body in the ecliptic frame.
pub fn heliocentric_state(
    elements: &OrbitalElements,
    settings: &SolverSettings,
) -> Result<OrbitState, OrbitError> {
    elements.validate()?;
    let e = elements.eccentricity;
    let solution = solve_eccentric_anomaly(elements.mean_anomaly_deg, e, settings)?;

    // a converged E can land a hair outside [0, 2π) when M sits next to the wrap
    let ea = reduce_radians(solution.eccentric_anomaly_rad);
    let nu = reduce_radians(true_anomaly(ea, e));
    let distance = heliocentric_distance(elements.semi_major_axis_au, e, nu);
    let plane = orbital_plane_position(distance, nu);
    let position_au = rotate_to_ecliptic(
        plane,
        deg_to_rad(elements.inclination_deg),
        deg_to_rad(elements.ascending_node_deg),
        deg_to_rad(elements.periapsis_arg_deg),
    );

    Ok(OrbitState {
        position_au,
        distance_au: distance,
        eccentric_anomaly_deg: reduce_degrees(rad_to_deg(ea)),
        true_anomaly_deg: reduce_degrees(rad_to_deg(nu)),
        solver_iterations: solution.iterations,
    })
}
