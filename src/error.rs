use crate::convert::error::ConvertError;
use crate::potential::error::MapPotentialError;
use crate::record::RecordError;
use crate::utils::geometry::GeometryError;
use crate::utils::location::LocationError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PlotdarnError {
    /// Represents an out of range latitude or longitude
    #[error("{0}")]
    Location(#[from] LocationError),

    #[error("{0}")]
    Geometry(#[from] GeometryError),

    /// Unable to convert coordinates or times
    #[error("{0}")]
    Convert(#[from] ConvertError),

    #[error("{0}")]
    MapPotential(#[from] MapPotentialError),

    /// Represents a bad convection map record
    #[error("{0}")]
    Record(#[from] RecordError),
}
