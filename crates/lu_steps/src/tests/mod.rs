use nalgebra::*;

use crate::DerivationRecord;

mod scenarios;

/// Diagonally dominant, so every leading principal minor is non-singular.
fn dominant(n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |i, j| {
        if i == j {
            2.0 * n as f64
        } else {
            ((i * 7 + j * 3) % 5) as f64 - 2.0
        }
    })
}

fn latex(records: &[DerivationRecord]) -> Vec<&str> {
    records.iter().map(|r| r.latex()).collect()
}
