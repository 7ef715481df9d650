//! Doolittle LU factorization without pivoting.
//!
use log::{debug, trace};
use nalgebra::{DMatrix, RealField};
use num_traits::{One, Zero};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    ensure_square,
    record::{sum_terms, DerivationRecord, Entry},
    Error, Render,
};

/// Result of [`factorize`]: `A = L U` together with the derivation of every entry.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(bound(
        serialize = "DMatrix<T>: Serialize",
        deserialize = "DMatrix<T>: Deserialize<'de>"
    ))
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Factorization<T>
where
    T: RealField + Copy,
{
    /// Unit lower triangular factor.
    pub l: DMatrix<T>,
    /// Upper triangular factor.
    pub u: DMatrix<T>,
    /// `L[i,i] = 1` followed by the column below it, for each `i` in turn.
    pub l_steps: Vec<DerivationRecord>,
    /// Row `i` of `U`, for each `i` in turn.
    pub u_steps: Vec<DerivationRecord>,
}

/// Performs the Doolittle LU factorization of the square matrix A.
///
/// For each `i = 0..n` this computes row `i` of U,
///
/// ```math
/// U[i,j] = A[i,j] - sum_{k<i} L[i,k] U[k,j],   j = i, ..., n-1
/// ```
///
/// sets `L[i,i] = 1`, and then column `i` of L,
///
/// ```math
/// L[j,i] = (A[j,i] - sum_{k<i} L[j,k] U[k,i]) / U[i,i],   j = i+1, ..., n-1
/// ```
///
/// No rows are exchanged, so the records read exactly like the textbook recursion and agree with
/// the returned factors.
///
/// # Errors
///
/// * `Error::NotSquare` before any computation when A is not square.
/// * `Error::SingularMatrix` as soon as a diagonal entry `U[i,i]` comes out exactly zero. The
///     records accumulated so far are dropped.
pub fn factorize<T, F>(mat_a: &DMatrix<T>, fmt: &F) -> Result<Factorization<T>, Error>
where
    T: RealField + Copy,
    F: Render<T>,
{
    let n = ensure_square(mat_a)?;
    debug!("factorize: order {}", n);

    let mut l = DMatrix::<T>::zeros(n, n);
    let mut u = DMatrix::<T>::zeros(n, n);
    let mut l_steps = Vec::with_capacity(n * (n + 1) / 2);
    let mut u_steps = Vec::with_capacity(n * (n + 1) / 2);

    for i in 0..n {
        for j in i..n {
            let sum = (0..i).fold(T::zero(), |acc, k| acc + l[(i, k)] * u[(k, j)]);
            let terms = sum_terms(fmt, (0..i).map(|k| (l[(i, k)], u[(k, j)])), "\\times");
            u[(i, j)] = mat_a[(i, j)] - sum;

            u_steps.push(DerivationRecord::new(
                Entry::U(i, j),
                format!(
                    "U_{{{r},{c}}} = A_{{{r},{c}}} - ({terms}) = {a} - ({sum}) = {value}",
                    r = i + 1,
                    c = j + 1,
                    a = fmt.render(mat_a[(i, j)]),
                    sum = fmt.render(sum),
                    value = fmt.render(u[(i, j)]),
                ),
            ));
            trace!("U[{},{}] = {}", i, j, fmt.render(u[(i, j)]));
        }

        // checked for the last row too
        let pivot = u[(i, i)];
        if pivot.is_zero() {
            debug!("factorize: zero pivot at U[{},{}]", i, i);
            return Err(Error::SingularMatrix { index: i });
        }

        l[(i, i)] = T::one();
        l_steps.push(DerivationRecord::new(
            Entry::L(i, i),
            format!("L_{{{r},{r}}} = 1", r = i + 1),
        ));

        for j in (i + 1)..n {
            let sum = (0..i).fold(T::zero(), |acc, k| acc + l[(j, k)] * u[(k, i)]);
            let terms = sum_terms(fmt, (0..i).map(|k| (l[(j, k)], u[(k, i)])), "\\times");
            l[(j, i)] = (mat_a[(j, i)] - sum) / pivot;

            l_steps.push(DerivationRecord::new(
                Entry::L(j, i),
                format!(
                    "L_{{{r},{c}}} = \\frac{{A_{{{r},{c}}} - ({terms})}}{{{p}}} = \\frac{{{a} - ({sum})}}{{{p}}} = {value}",
                    r = j + 1,
                    c = i + 1,
                    p = fmt.render(pivot),
                    a = fmt.render(mat_a[(j, i)]),
                    sum = fmt.render(sum),
                    value = fmt.render(l[(j, i)]),
                ),
            ));
            trace!("L[{},{}] = {}", j, i, fmt.render(l[(j, i)]));
        }
    }

    Ok(Factorization {
        l,
        u,
        l_steps,
        u_steps,
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::dmatrix;
    use rational::Formatter;

    use super::*;

    #[test]
    fn test_factorize_2x2() {
        let mat_a = dmatrix![
            4.0, 3.0;
            6.0, 3.0;
        ];
        let fact = factorize(&mat_a, &Formatter::default()).unwrap();

        assert_eq!(fact.l, dmatrix![1.0, 0.0; 1.5, 1.0]);
        assert_eq!(fact.u, dmatrix![4.0, 3.0; 0.0, -1.5]);

        let u_steps = fact.u_steps.iter().map(|r| r.latex()).collect::<Vec<_>>();
        assert_eq!(
            u_steps,
            vec![
                "U_{1,1} = A_{1,1} - (0) = 4 - (0) = 4",
                "U_{1,2} = A_{1,2} - (0) = 3 - (0) = 3",
                "U_{2,2} = A_{2,2} - (3/2 \\times 3) = 3 - (9/2) = -3/2",
            ]
        );

        let l_steps = fact.l_steps.iter().map(|r| r.latex()).collect::<Vec<_>>();
        assert_eq!(
            l_steps,
            vec![
                "L_{1,1} = 1",
                "L_{2,1} = \\frac{A_{2,1} - (0)}{4} = \\frac{6 - (0)}{4} = 3/2",
                "L_{2,2} = 1",
            ]
        );
    }

    #[test]
    fn test_record_order() {
        let mat_a = dmatrix![
            2.0, 1.0, 1.0;
            4.0, 3.0, 3.0;
            8.0, 7.0, 9.0;
        ];
        let fact = factorize(&mat_a, &Formatter::default()).unwrap();

        let u_entries = fact.u_steps.iter().map(|r| r.entry()).collect::<Vec<_>>();
        assert_eq!(
            u_entries,
            vec![
                Entry::U(0, 0),
                Entry::U(0, 1),
                Entry::U(0, 2),
                Entry::U(1, 1),
                Entry::U(1, 2),
                Entry::U(2, 2),
            ]
        );

        let l_entries = fact.l_steps.iter().map(|r| r.entry()).collect::<Vec<_>>();
        assert_eq!(
            l_entries,
            vec![
                Entry::L(0, 0),
                Entry::L(1, 0),
                Entry::L(2, 0),
                Entry::L(1, 1),
                Entry::L(2, 1),
                Entry::L(2, 2),
            ]
        );
    }

    #[test]
    fn test_factors_reproduce_matrix() {
        let mat_a = dmatrix![
            4.0, 1.0, 2.0, 0.5;
            1.0, 5.0, 1.0, 2.0;
            2.0, 1.0, 6.0, 1.0;
            0.5, 2.0, 1.0, 7.0;
        ];
        let fact = factorize(&mat_a, &Formatter::default()).unwrap();

        for i in 0..4 {
            assert_eq!(fact.l[(i, i)], 1.0);
            for j in (i + 1)..4 {
                assert_eq!(fact.l[(i, j)], 0.0);
                assert_eq!(fact.u[(j, i)], 0.0);
            }
        }
        assert_relative_eq!(&fact.l * &fact.u, mat_a, epsilon = 1e-12);
    }

    #[test]
    fn test_singular_pivot() {
        let mat_a = dmatrix![
            2.0, 1.0;
            4.0, 2.0;
        ];
        let err = factorize(&mat_a, &Formatter::default()).unwrap_err();
        assert_eq!(err, Error::SingularMatrix { index: 1 });
    }

    #[test]
    fn test_singular_leading_pivot() {
        let mat_a = dmatrix![
            0.0, 1.0;
            1.0, 0.0;
        ];
        let err = factorize(&mat_a, &Formatter::default()).unwrap_err();
        assert_eq!(err, Error::SingularMatrix { index: 0 });
    }

    #[test]
    fn test_not_square() {
        let mat_a = dmatrix![
            1.0, 2.0, 3.0;
            4.0, 5.0, 6.0;
        ];
        let err = factorize(&mat_a, &Formatter::default()).unwrap_err();
        assert_eq!(err, Error::NotSquare { nrows: 2, ncols: 3 });
    }

    #[test]
    fn test_empty() {
        let mat_a = DMatrix::<f64>::zeros(0, 0);
        let fact = factorize(&mat_a, &Formatter::default()).unwrap();
        assert!(fact.l_steps.is_empty());
        assert!(fact.u_steps.is_empty());
    }
}
