//! Parsing of the plain-text notation used to enter a system, e.g. `"4, 3; 6, 3"` for a matrix
//! and `"7, 9"` for a vector.
//!
//! Cells that are not numbers are read as 0 (and logged), so a typo shows up in the rendered
//! matrix instead of rejecting the whole input.
use log::warn;
use nalgebra::{DMatrix, DVector};

use crate::Error;

pub const ROW_SEPARATOR: char = ';';
pub const COLUMN_SEPARATOR: char = ',';

fn cell(text: &str) -> f64 {
    let text = text.trim();
    text.parse().unwrap_or_else(|_| {
        warn!("could not read {:?} as a number, using 0", text);
        0.0
    })
}

/// Parses a `rows` × `cols` matrix.
///
/// # Errors
///
/// * `Error::RowCount` when the text holds a different number of rows.
/// * `Error::ColumnCount` for the first row (0-based) with a different number of columns.
pub fn matrix(text: &str, rows: usize, cols: usize) -> Result<DMatrix<f64>, Error> {
    let lines = text.trim().split(ROW_SEPARATOR).collect::<Vec<_>>();
    if lines.len() != rows {
        return Err(Error::RowCount {
            expected: rows,
            got: lines.len(),
        });
    }

    let mut data = Vec::with_capacity(rows * cols);
    for (row, line) in lines.iter().enumerate() {
        let cells = line
            .trim()
            .split(COLUMN_SEPARATOR)
            .map(cell)
            .collect::<Vec<_>>();
        if cells.len() != cols {
            return Err(Error::ColumnCount {
                row,
                expected: cols,
                got: cells.len(),
            });
        }
        data.extend(cells);
    }

    Ok(DMatrix::from_row_slice(rows, cols, &data))
}

/// Parses a vector, or returns `None` for blank text (no right-hand side given).
pub fn vector(text: &str) -> Option<DVector<f64>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(DVector::from_vec(
        text.split(COLUMN_SEPARATOR).map(cell).collect(),
    ))
}
