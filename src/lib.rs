//! Heliocentric snapshots of minor bodies from classical orbital elements.
//!
//! The numerical core lives in [`orbits`]: a Newton-Raphson Kepler solver and the
//! orbital-plane to ecliptic rotation. The other crates wrap it with catalog import,
//! batch scheduling and export so the binaries share one entry point.

pub mod pipeline;

pub use phaethon_config as config;
pub use phaethon_export as export;
pub use phaethon_importer as importer;
pub use phaethon_core as numerics;
pub use phaethon_orbits as orbits;
pub use phaethon_snapshot as snapshot;
