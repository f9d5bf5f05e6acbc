//! Geometry and magnetic coordinate tooling for drawing SuperDARN convection maps.
//!
//! The core is the map-potential model in [`potential`]: a spherical harmonic fit of the
//! high-latitude electrostatic potential, from which potential grids and fitted drift vectors are
//! derived. [`convert`] handles magnetic coordinates and local time, [`utils`] the spherical and
//! planar geometry, and [`overlay`] prepares everything else that goes on a plot.
pub mod convert;
pub mod error;
pub mod overlay;
pub mod potential;
pub mod record;
pub mod utils;

#[cfg(feature = "python")]
mod python;

pub use convert::{DipoleOracle, MagneticConverter, MltStrategy};
pub use error::PlotdarnError;
pub use potential::{ModelConfig, PotentialModel};
