//! Doolittle LU factorization and triangular solves that explain themselves.
//!
//! Every entry of `L`, `U`, `y` and `x` comes with a [`DerivationRecord`] showing the arithmetic
//! that produced it. All arithmetic is done in floating point; the records render values through a
//! [`Render`] implementation, normally [`rational::Formatter`].
//!
//! Factoring an n×n matrix costs O(n³) time and O(n²) space for the factors, plus O(n²) records.
mod doolittle;
mod record;
mod traits;
mod triangular;

pub use doolittle::{factorize, Factorization};
pub use record::{DerivationRecord, Entry};
pub use traits::Render;
pub use triangular::{solve_lower, solve_upper, PivotPolicy, Solution, DEFAULT_PIVOT_EPSILON};

use nalgebra::{DMatrix, Scalar};
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum Error {
    #[error("The matrix must be square to be factored (got {nrows}x{ncols})")]
    NotSquare { nrows: usize, ncols: usize },

    #[error("The right-hand side has {got} entries but the matrix has order {expected}")]
    RhsLength { expected: usize, got: usize },

    /// A pivot required by the recursion was exactly zero.
    #[error("A singular matrix was encountered during the LU factorization (U[{index},{index}] = 0)")]
    SingularMatrix { index: usize },

    /// Only raised under [`PivotPolicy::Strict`].
    #[error("A near-zero pivot was encountered during back substitution (U[{index},{index}] = {pivot:e})")]
    SingularPivot { index: usize, pivot: f64 },

    #[error("The matrix order {order} exceeds the configured limit of {limit}")]
    OrderTooLarge { order: usize, limit: usize },
}

/// Machine-readable classification of an [`Error`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    DimensionMismatch,
    SingularMatrix,
    OrderTooLarge,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotSquare { .. } | Self::RhsLength { .. } => ErrorKind::DimensionMismatch,
            Self::SingularMatrix { .. } | Self::SingularPivot { .. } => ErrorKind::SingularMatrix,
            Self::OrderTooLarge { .. } => ErrorKind::OrderTooLarge,
        }
    }
}

/// Returns the order of `mat_a`, or `Error::NotSquare`.
pub fn ensure_square<T: Scalar>(mat_a: &DMatrix<T>) -> Result<usize, Error> {
    let (nrows, ncols) = mat_a.shape();
    if nrows != ncols {
        return Err(Error::NotSquare { nrows, ncols });
    }
    Ok(nrows)
}

/// Checks that a right-hand side of length `got` fits a matrix of order `expected`.
pub fn ensure_rhs_len(expected: usize, got: usize) -> Result<(), Error> {
    if expected != got {
        return Err(Error::RhsLength { expected, got });
    }
    Ok(())
}
