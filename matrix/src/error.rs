//! Error types for sparse matrix operations.

use thiserror::Error;

use crate::Dimensions;

/// Errors reported by sparse matrix operations.
///
/// Every error is detected before any output buffer is allocated, so operands are left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MatrixError {
    /// The operand shapes are incompatible for `op`.
    ///
    /// Addition and subtraction need equal shapes; multiplication needs `lhs.width == rhs.height`.
    #[error("dimension mismatch in {op}: {lhs} and {rhs}")]
    DimensionMismatch {
        /// The operation that was attempted.
        op: &'static str,
        lhs: Dimensions,
        rhs: Dimensions,
    },

    /// Raw buffers handed to `CsrMatrix::from_parts` do not form a canonical CSR layout.
    #[error("invalid CSR layout: {reason}")]
    InvalidLayout { reason: &'static str },
}

impl MatrixError {
    pub(crate) const fn mismatch(op: &'static str, lhs: Dimensions, rhs: Dimensions) -> Self {
        Self::DimensionMismatch { op, lhs, rhs }
    }
}

/// Result type alias for sparse matrix operations.
pub type MatrixResult<T> = core::result::Result<T, MatrixError>;
