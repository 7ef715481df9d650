use std::fmt;

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::Render;

/// The matrix or vector entry a [`DerivationRecord`] explains. Indices are 0-based.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Entry {
    L(usize, usize),
    U(usize, usize),
    Y(usize),
    X(usize),
}

impl Entry {
    /// `(row, column)` of the entry; vector entries live in column 0.
    pub fn position(&self) -> (usize, usize) {
        match *self {
            Self::L(i, j) | Self::U(i, j) => (i, j),
            Self::Y(i) | Self::X(i) => (i, 0),
        }
    }
}

/// One step of a derivation, as a LaTeX fragment with 1-based subscripts.
///
/// `Display` wraps the fragment in display-math delimiters, ready to drop into a MathJax page.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct DerivationRecord {
    entry: Entry,
    latex: String,
}

impl DerivationRecord {
    pub(crate) fn new(entry: Entry, latex: String) -> Self {
        DerivationRecord { entry, latex }
    }

    pub fn entry(&self) -> Entry {
        self.entry
    }

    pub fn latex(&self) -> &str {
        &self.latex
    }
}

impl fmt::Display for DerivationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\\[ {} \\]", self.latex)
    }
}

/// Joins the rendered products `a op b` with `+`, or `0` when there are none.
pub(crate) fn sum_terms<T, F, I>(fmt: &F, terms: I, op: &str) -> String
where
    F: Render<T>,
    I: IntoIterator<Item = (T, T)>,
{
    let terms = terms
        .into_iter()
        .map(|(a, b)| fmt.render_product(a, b, op))
        .collect::<Vec<_>>();
    if terms.is_empty() {
        "0".to_owned()
    } else {
        terms.join(" + ")
    }
}
