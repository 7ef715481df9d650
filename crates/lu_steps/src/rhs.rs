use nalgebra::{DMatrix, DVector, RealField};

/// Synthesizes a right-hand side with a known solution.
///
/// Returns `(b, x)` where `x` is all ones and `b = A x`, so a full forward and backward
/// substitution can be shown, and checked, even when no `b` was supplied.
pub fn generate<T>(mat_a: &DMatrix<T>) -> (DVector<T>, DVector<T>)
where
    T: RealField + Copy,
{
    let x = DVector::<T>::from_element(mat_a.ncols(), nalgebra::one());
    let b = mat_a * &x;
    (b, x)
}
