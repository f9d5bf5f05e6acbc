use crate::utils::location::LocationError;
use thiserror::Error;

/// Enum of the possible error variants encountered while converting coordinates
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    /// A time string matching none of the accepted formats
    #[error("Unable to parse time '{0}', expected 'YYYY-MM-DD HH:MM' with an optional UTC offset")]
    Time(String),

    /// An array input which is not a flat list of points
    #[error("{name} must be one-dimensional, got {ndim} dimension(s)")]
    Shape { name: &'static str, ndim: usize },

    #[error("{name} has {found} elements but {expected} were expected")]
    LengthMismatch {
        name: &'static str,
        found: usize,
        expected: usize,
    },

    /// Represents a failure inside the coordinate oracle
    #[error("Coordinate oracle failed: {0}")]
    Oracle(String),

    #[error("{0}")]
    Location(#[from] LocationError),
}
