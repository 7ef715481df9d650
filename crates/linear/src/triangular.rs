//! Forward and backward substitution with a derivation record per solved entry.
//!
use log::{debug, trace, warn};
use nalgebra::{DMatrix, DVector, RealField};
use num_traits::Zero;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::{
    ensure_rhs_len, ensure_square,
    record::{sum_terms, DerivationRecord, Entry},
    Error, Render,
};

/// Pivots smaller than this in magnitude are treated as zero by back substitution.
pub const DEFAULT_PIVOT_EPSILON: f64 = 1e-10;

/// What [`solve_upper`] does with a pivot `|U[i,i]| < epsilon`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PivotPolicy {
    /// Divide by `epsilon` instead and flag the pivot in the record.
    Regularize { epsilon: f64 },
    /// Fail with `Error::SingularPivot`.
    Strict { epsilon: f64 },
}

impl PivotPolicy {
    pub fn epsilon(&self) -> f64 {
        match *self {
            Self::Regularize { epsilon } | Self::Strict { epsilon } => epsilon,
        }
    }
}

impl Default for PivotPolicy {
    fn default() -> Self {
        Self::Regularize {
            epsilon: DEFAULT_PIVOT_EPSILON,
        }
    }
}

/// Solution vector of a triangular solve and the records explaining it, in the order the entries
/// were computed.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(bound(
        serialize = "DVector<T>: Serialize",
        deserialize = "DVector<T>: Deserialize<'de>"
    ))
)]
#[derive(Clone, Debug, PartialEq)]
pub struct Solution<T>
where
    T: RealField + Copy,
{
    pub values: DVector<T>,
    pub steps: Vec<DerivationRecord>,
    /// Rows whose pivot was replaced by epsilon. Always empty for forward substitution.
    pub regularized: Vec<usize>,
}

/// Solves `L y = b` by forward substitution.
///
/// `L` is taken to be unit lower triangular: its diagonal is never read, and nothing above the
/// diagonal is used.
///
/// ```math
/// y[i] = b[i] - sum_{k<i} L[i,k] y[k],   i = 0, ..., n-1
/// ```
pub fn solve_lower<T, F>(
    mat_l: &DMatrix<T>,
    b: &DVector<T>,
    fmt: &F,
) -> Result<Solution<T>, Error>
where
    T: RealField + Copy,
    F: Render<T>,
{
    let n = ensure_square(mat_l)?;
    ensure_rhs_len(n, b.len())?;
    debug!("solve_lower: order {}", n);

    let mut y = DVector::<T>::zeros(n);
    let mut steps = Vec::with_capacity(n);

    for i in 0..n {
        let sum = (0..i).fold(T::zero(), |acc, k| acc + mat_l[(i, k)] * y[k]);
        let terms = sum_terms(fmt, (0..i).map(|k| (mat_l[(i, k)], y[k])), "\\cdot");
        y[i] = b[i] - sum;

        steps.push(DerivationRecord::new(
            Entry::Y(i),
            format!(
                "y_{{{r}}} = b_{{{r}}} - ({terms}) = {b} - ({sum}) = {value}",
                r = i + 1,
                b = fmt.render(b[i]),
                sum = fmt.render(sum),
                value = fmt.render(y[i]),
            ),
        ));
        trace!("y[{}] = {}", i, fmt.render(y[i]));
    }

    Ok(Solution {
        values: y,
        steps,
        regularized: Vec::new(),
    })
}

/// Solves `U x = y` by backward substitution.
///
/// ```math
/// x[i] = (y[i] - sum_{k>i} U[i,k] x[k]) / U[i,i],   i = n-1, ..., 0
/// ```
///
/// A pivot with `|U[i,i]| < epsilon` is handled according to `policy`. Under
/// [`PivotPolicy::Regularize`] it is replaced by `+epsilon` (whatever its sign), the row is listed
/// in [`Solution::regularized`], and the record shows `\varepsilon` as the divisor. Nothing in
/// `mat_u` is modified.
///
/// Records are emitted bottom row first, in the order the entries are solved.
pub fn solve_upper<T, F>(
    mat_u: &DMatrix<T>,
    y: &DVector<T>,
    policy: PivotPolicy,
    fmt: &F,
) -> Result<Solution<T>, Error>
where
    T: RealField + Copy,
    F: Render<T>,
{
    let n = ensure_square(mat_u)?;
    ensure_rhs_len(n, y.len())?;
    debug!("solve_upper: order {}", n);

    let epsilon: T = nalgebra::convert(policy.epsilon());

    let mut x = DVector::<T>::zeros(n);
    let mut steps = Vec::with_capacity(n);
    let mut regularized = Vec::new();

    for i in (0..n).rev() {
        let sum = ((i + 1)..n).fold(T::zero(), |acc, k| acc + mat_u[(i, k)] * x[k]);
        let terms = sum_terms(fmt, ((i + 1)..n).map(|k| (mat_u[(i, k)], x[k])), "\\cdot");

        let mut pivot = mat_u[(i, i)];
        let tiny = pivot.abs() < epsilon;
        if tiny {
            match policy {
                PivotPolicy::Strict { .. } => {
                    return Err(Error::SingularPivot {
                        index: i,
                        pivot: nalgebra::try_convert(pivot).unwrap_or(f64::NAN),
                    });
                }
                PivotPolicy::Regularize { epsilon: eps } => {
                    warn!(
                        "solve_upper: pivot U[{},{}] = {} is below {:e}, regularizing",
                        i,
                        i,
                        fmt.render(pivot),
                        eps
                    );
                    pivot = epsilon;
                    regularized.push(i);
                }
            }
        }

        x[i] = (y[i] - sum) / pivot;

        let divisor = if tiny {
            "\\varepsilon".to_owned()
        } else {
            fmt.render(pivot)
        };
        let mut latex = format!(
            "x_{{{r}}} = \\frac{{y_{{{r}}} - ({terms})}}{{{p}}} = \\frac{{{y} - ({sum})}}{{{p}}} = {value}",
            r = i + 1,
            p = divisor,
            y = fmt.render(y[i]),
            sum = fmt.render(sum),
            value = fmt.render(x[i]),
        );
        if tiny {
            latex.push_str(&format!(
                " \\quad (U_{{{r},{r}}} \\approx 0,\\ \\varepsilon = {eps:e})",
                r = i + 1,
                eps = policy.epsilon(),
            ));
        }
        steps.push(DerivationRecord::new(Entry::X(i), latex));
        trace!("x[{}] = {}", i, fmt.render(x[i]));
    }

    Ok(Solution {
        values: x,
        steps,
        regularized,
    })
}
