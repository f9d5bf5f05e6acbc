//! Conversion between geographic and magnetic frames, magnetic local time, and the polar plot
//! projection.
pub mod dipole;
pub mod error;
pub mod magnetic;
pub mod mlt;
pub mod oracle;
pub mod projection;
pub mod time;

pub use dipole::DipoleOracle;
pub use error::ConvertError;
pub use magnetic::MagneticConverter;
pub use mlt::{approximate_mlt, MltStrategy};
pub use oracle::{CoordinateOracle, Direction};
pub use projection::{polar_projection, reproject_angle_to_origin, DEFAULT_MIN_LAT};
pub use time::{parse_time, TimeInput};
