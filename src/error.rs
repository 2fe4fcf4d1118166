//! Error types for cvxatoms.

use thiserror::Error;

use crate::expr::ExprId;

/// Error type for cvxatoms operations.
#[derive(Debug, Error)]
pub enum CvxError {
    /// An atom factory was handed an argument whose shape it cannot dispatch on.
    #[error("{0}")]
    InvalidArgumentShape(String),

    /// Shape mismatch.
    #[error("Shape mismatch: expected {expected}, got {got}")]
    ShapeMismatch { expected: String, got: String },

    /// Wrong number of arguments passed to an atom operation.
    #[error("{atom} expects {expected} argument(s), got {got}")]
    ArgumentCount {
        atom: &'static str,
        expected: usize,
        got: usize,
    },

    /// A variable was evaluated without an assigned value.
    #[error("No value assigned to variable {0:?}")]
    MissingValue(ExprId),

    /// Numerical error.
    #[error("Numerical error: {0}")]
    NumericalError(String),
}

impl CvxError {
    pub(crate) fn shape_mismatch(expected: impl Into<String>, got: impl ToString) -> Self {
        CvxError::ShapeMismatch {
            expected: expected.into(),
            got: got.to_string(),
        }
    }
}

/// Result type for cvxatoms operations.
pub type Result<T> = std::result::Result<T, CvxError>;
