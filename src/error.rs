use thiserror::Error;

/// Top-level error type for the mathgd library.
#[derive(Debug, Error)]
pub enum MathgdError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

/// Errors raised by vector, matrix and quaternion math.
#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("matrix is not invertible, determinant is zero")]
    SingularMatrix,

    #[error("{what} must be normalized (length squared = {length_squared})")]
    NotNormalized {
        what: &'static str,
        length_squared: f64,
    },
}

/// Errors related to geometry operations such as offsetting.
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("operation failed: {0}")]
    Failed(String),
}

/// Convenience type alias for results using [`MathgdError`].
pub type Result<T> = std::result::Result<T, MathgdError>;
