use crate::convert::error::ConvertError;
use thiserror::Error;

/// Enum of the possible error variants that may be encountered while evaluating the model
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapPotentialError {
    /// Represents a coefficient vector too short for the configured order
    #[error("Expected at least {expected} coefficients for the model order, got {found}")]
    Coefficients { found: usize, expected: usize },

    #[error("{name} has {found} elements but {expected} were expected")]
    LengthMismatch {
        name: &'static str,
        found: usize,
        expected: usize,
    },

    /// Unable to derive magnetic local time
    #[error("{0}")]
    Convert(#[from] ConvertError),
}
