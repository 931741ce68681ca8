//! # Geometry Errors
//!
//! Failures raised by the pure core. No I/O happens here, so every variant
//! describes a bad argument or a missing member.

use super::Uid;
use thiserror::Error;

/// Result type for core operations
pub type GeometryResult<T> = Result<T, GeometryError>;

/// Errors produced by vector algebra and contour management
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Operands do not share the same dimension
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },

    /// An object of the wrong kind was supplied
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The operation is not defined for these operands
    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// No member carries this uid
    #[error("Not found: {0}")]
    NotFound(Uid),

    /// The text is not a uid
    #[error("Invalid uid: {0:?}")]
    InvalidUid(String),
}

impl GeometryError {
    pub(crate) fn dimension(expected: usize, found: usize) -> Self {
        GeometryError::DimensionMismatch { expected, found }
    }
}
