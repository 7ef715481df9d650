use thiserror::Error;

pub use linear::ErrorKind;

#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// The matrix text does not contain the declared number of rows.
    #[error("Expected {expected} rows but the matrix text contains {got}")]
    RowCount { expected: usize, got: usize },

    /// A row of the matrix text does not contain the declared number of columns.
    #[error("Row {row} has {got} columns, expected {expected}")]
    ColumnCount {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error(transparent)]
    Linear(#[from] linear::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::RowCount { .. } | Self::ColumnCount { .. } => ErrorKind::DimensionMismatch,
            Self::Linear(err) => err.kind(),
        }
    }
}
