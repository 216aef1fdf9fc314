//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while constructing or stepping a simulation.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Dimension mismatch for {what}: expected {expected}, got {got}")]
    DimensionMismatch {
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Singular mass matrix: {what}")]
    SingularMassMatrix { what: &'static str },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<ms_core::CoreError> for SimError {
    fn from(e: ms_core::CoreError) -> Self {
        match e {
            ms_core::CoreError::InvalidArg { what } => SimError::InvalidArg { what },
            ms_core::CoreError::NonFinite { what, .. } => SimError::InvalidArg { what },
            ms_core::CoreError::DimensionMismatch {
                what,
                expected,
                got,
            } => SimError::DimensionMismatch {
                what,
                expected,
                got,
            },
        }
    }
}
