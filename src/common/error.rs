//! Error types for corridor_gen

use thiserror::Error;

/// Main error type for corridor generation
#[derive(Debug, Error)]
pub enum CorridorError {
    /// Malformed generator parameters, missing constraints or pose dimensionality problems
    #[error("Configuration error: {0}")]
    Configuration(String),
    /// Point, transform or line dimensions disagree
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    /// Numerical computation failed (matrix inversion, etc.)
    #[error("Numerical error: {0}")]
    Numerical(String),
    /// Node graph search was driven incorrectly
    #[error("Planning error: {0}")]
    Planning(String),
}

impl CorridorError {
    pub(crate) fn configuration(msg: impl Into<String>) -> Self {
        CorridorError::Configuration(msg.into())
    }

    /// Fails with `DimensionMismatch` unless `found == expected`
    pub(crate) fn check_dimension(expected: usize, found: usize) -> CorridorResult<()> {
        if expected == found {
            Ok(())
        } else {
            Err(CorridorError::DimensionMismatch { expected, found })
        }
    }
}

/// Result type alias for corridor operations
pub type CorridorResult<T> = Result<T, CorridorError>;
