//! Map-potential model: a spherical harmonic expansion of the ionospheric electrostatic potential,
//! and the electric field and plasma drift derived from it.
pub mod config;
pub mod error;
pub mod fitted;
pub mod grid;
pub mod harmonics;
pub mod model;

pub use config::ModelConfig;
pub use error::MapPotentialError;
pub use fitted::FittedVectors;
pub use harmonics::{associated_legendre, real_harmonic};
pub use model::{coefficient_index, Components, FittedVector, PotentialModel};
