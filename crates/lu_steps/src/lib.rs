//! Step-by-step LU factorization and solution of `A x = b`.
//!
//! [`explain`] factors a square matrix with the Doolittle recursion, solves `L y = b` and then
//! `U x = y`, and returns every intermediate value together with a derivation record for each
//! computed entry. Values are rendered as fractions (`-3/2` rather than `-1.5`).
//!
//! ```
//! use lu_steps::{explain, Options};
//! use nalgebra::dmatrix;
//!
//! let a = dmatrix![4.0, 3.0; 6.0, 3.0];
//! let explanation = explain(&a, None, &Options::default()).unwrap();
//!
//! assert_eq!(explanation.rendered.u, vec![vec!["4", "3"], vec!["0", "-3/2"]]);
//! assert_eq!(explanation.rendered.x, vec!["1", "1"]);
//! ```
use log::debug;
use nalgebra::{DMatrix, DVector};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

mod config;
mod error;
pub mod parse;
pub mod rhs;
#[cfg(test)]
mod tests;

pub use config::{Options, DISPLAY_DECIMALS_DEFAULT};
pub use error::{Error, ErrorKind};
pub use linear::{DerivationRecord, Entry, PivotPolicy};
pub use rational::{DenominatorBound, Formatter};

/// Display strings for every matrix and vector of an [`Explanation`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Rendered {
    pub a: Vec<Vec<String>>,
    /// Rounded to [`Options::display_decimals`] before rendering.
    pub l: Vec<Vec<String>>,
    /// Rounded to [`Options::display_decimals`] before rendering.
    pub u: Vec<Vec<String>>,
    pub b: Vec<String>,
    pub y: Vec<String>,
    pub x: Vec<String>,
    pub reference: Option<Vec<String>>,
}

/// Everything produced by one call to [`explain`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Explanation {
    pub l: DMatrix<f64>,
    pub u: DMatrix<f64>,
    /// The right-hand side that was solved, supplied or synthesized.
    pub b: DVector<f64>,
    pub y: DVector<f64>,
    pub x: DVector<f64>,
    /// The all-ones solution `b` was built from, when no right-hand side was supplied.
    pub reference: Option<DVector<f64>>,

    pub u_steps: Vec<DerivationRecord>,
    pub l_steps: Vec<DerivationRecord>,
    pub y_steps: Vec<DerivationRecord>,
    pub x_steps: Vec<DerivationRecord>,

    /// Rows whose back substitution pivot was regularized.
    pub regularized: Vec<usize>,

    pub rendered: Rendered,
}

impl Explanation {
    /// All records in presentation order: U, L, y, then x.
    pub fn records(&self) -> impl Iterator<Item = &DerivationRecord> {
        self.u_steps
            .iter()
            .chain(&self.l_steps)
            .chain(&self.y_steps)
            .chain(&self.x_steps)
    }
}

/// Factors `mat_a` and solves `A x = b`, explaining every step.
///
/// When `b` is `None` a right-hand side is synthesized from the all-ones solution (see
/// [`rhs::generate`]) and reported in [`Explanation::reference`].
///
/// # Errors
///
/// * `ErrorKind::DimensionMismatch` if A is not square or `b` does not match its order. Raised
///     before any computation.
/// * `ErrorKind::OrderTooLarge` if the order exceeds [`Options::max_order`].
/// * `ErrorKind::SingularMatrix` if the factorization meets an exactly zero pivot, or if back
///     substitution meets a near-zero pivot under [`PivotPolicy::Strict`].
pub fn explain(
    mat_a: &DMatrix<f64>,
    b: Option<&DVector<f64>>,
    options: &Options,
) -> Result<Explanation, Error> {
    let n = linear::ensure_square(mat_a)?;
    options.check_order(n)?;
    if let Some(b) = b {
        linear::ensure_rhs_len(n, b.len())?;
    }
    debug!("explain: order {}, rhs supplied: {}", n, b.is_some());

    let fmt = options.formatter();

    let linear::Factorization {
        l,
        u,
        l_steps,
        u_steps,
    } = linear::factorize(mat_a, &fmt)?;

    let (b, reference) = match b {
        Some(b) => (b.clone(), None),
        None => {
            let (b, reference) = rhs::generate(mat_a);
            (b, Some(reference))
        }
    };

    let forward = linear::solve_lower(&l, &b, &fmt)?;
    let backward = linear::solve_upper(&u, &forward.values, options.back_substitution, &fmt)?;

    let rendered = Rendered {
        a: render_grid(mat_a, |v| fmt.format(v)),
        l: render_grid(&l, |v| fmt.format(options.round_for_display(v))),
        u: render_grid(&u, |v| fmt.format(options.round_for_display(v))),
        b: render_vector(&b, &fmt),
        y: render_vector(&forward.values, &fmt),
        x: render_vector(&backward.values, &fmt),
        reference: reference.as_ref().map(|r| render_vector(r, &fmt)),
    };

    Ok(Explanation {
        l,
        u,
        b,
        y: forward.values,
        x: backward.values,
        reference,
        u_steps,
        l_steps,
        y_steps: forward.steps,
        x_steps: backward.steps,
        regularized: backward.regularized,
        rendered,
    })
}

fn render_grid<F>(mat: &DMatrix<f64>, render: F) -> Vec<Vec<String>>
where
    F: Fn(f64) -> String,
{
    mat.row_iter()
        .map(|row| row.iter().map(|&v| render(v)).collect())
        .collect()
}

fn render_vector(v: &DVector<f64>, fmt: &Formatter) -> Vec<String> {
    v.iter().map(|&v| fmt.format(v)).collect()
}
