//! Two-body orbit helpers: Kepler's equation and the orbital-plane to ecliptic transform.
//!
//! Everything here is a pure function of its inputs. Batch orchestration, I/O and logging
//! live in the outer crates.

pub mod elements;
pub mod error;
pub mod kepler;
pub mod transform;

pub use elements::{OrbitState, OrbitalElements};
pub use error::OrbitError;
pub use kepler::{KeplerSolution, SolverSettings, solve_batch, solve_eccentric_anomaly};
pub use transform::heliocentric_state;
