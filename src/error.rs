//! Error types for additive DEA.

use crate::solver::LpFailure;
use thiserror::Error;

/// Result type alias for additive DEA operations.
pub type Result<T> = std::result::Result<T, AdditiveDeaError>;

/// Errors that can occur while building or solving additive DEA models.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AdditiveDeaError {
    /// Two arrays that must agree in shape do not.
    #[error("Shape mismatch in {context}: expected {expected_shape}, got {actual_shape}")]
    ShapeMismatch {
        context: String,
        expected_shape: String,
        actual_shape: String,
    },
    /// Invalid input data.
    #[error("Invalid input data: {0}")]
    InvalidInput(String),
    /// Unknown weighting scheme, or a scheme used without what it needs.
    #[error("Invalid model: {0}")]
    InvalidModel(String),
    /// Unknown returns-to-scale regime.
    #[error("Invalid returns to scale: {0}")]
    InvalidReturnsToScale(String),
    /// Unknown orientation.
    #[error("Invalid orientation: {0}")]
    InvalidOrientation(String),
    /// The objective weights of a DMU contain an infinite or NaN entry.
    #[error("Weights for DMU {dmu} are not finite")]
    NonFiniteWeights { dmu: usize },
    /// The LP of a DMU did not reach an optimum.
    #[error("Solving DMU {dmu} failed: {reason}")]
    SolveFailed { dmu: usize, reason: LpFailure },
    /// The dedicated thread pool could not be created.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
    /// An IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// A serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl AdditiveDeaError {
    pub(crate) fn shape(
        context: impl Into<String>,
        expected: (usize, usize),
        actual: (usize, usize),
    ) -> Self {
        AdditiveDeaError::ShapeMismatch {
            context: context.into(),
            expected_shape: format!("{}x{}", expected.0, expected.1),
            actual_shape: format!("{}x{}", actual.0, actual.1),
        }
    }
}

impl From<std::io::Error> for AdditiveDeaError {
    fn from(err: std::io::Error) -> Self {
        AdditiveDeaError::IoError(err.to_string())
    }
}

impl From<rayon::ThreadPoolBuildError> for AdditiveDeaError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        AdditiveDeaError::ThreadPool(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_message() {
        let err = AdditiveDeaError::shape("Y rows", (11, 1), (10, 1));
        assert_eq!(
            err.to_string(),
            "Shape mismatch in Y rows: expected 11x1, got 10x1"
        );
    }

    #[test]
    fn test_solve_failed_message() {
        let err = AdditiveDeaError::SolveFailed {
            dmu: 3,
            reason: LpFailure::Infeasible,
        };
        assert_eq!(err.to_string(), "Solving DMU 3 failed: problem is infeasible");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.bin");
        assert!(matches!(
            AdditiveDeaError::from(io),
            AdditiveDeaError::IoError(msg) if msg.contains("missing.bin")
        ));
    }
}
