use linear::PivotPolicy;
use rational::{DenominatorBound, Formatter};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

use crate::Error;

/// L and U are rounded to this many decimals before being rendered.
pub const DISPLAY_DECIMALS_DEFAULT: i32 = 10;

/// Knobs for [`crate::explain`].
///
/// The defaults reproduce the classroom behaviour: fractions with denominators up to 10 000,
/// values within `1e-9` of an integer shown as integers, near-zero back substitution pivots
/// regularized to `1e-10`, and no limit on the matrix order.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct Options {
    /// Largest denominator of a rendered fraction.
    pub denominator: DenominatorBound,
    /// Values with `|v - round(v)| <= snap_tolerance` render as integers.
    pub snap_tolerance: f64,
    /// Treatment of near-zero pivots during back substitution.
    pub back_substitution: PivotPolicy,
    /// Matrices of a larger order are rejected before any work is done.
    pub max_order: Option<usize>,
    /// Rounding applied to the rendered L and U grids (never to the derivation records).
    pub display_decimals: Option<i32>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            denominator: DenominatorBound::default(),
            snap_tolerance: rational::DEFAULT_SNAP_TOLERANCE,
            back_substitution: PivotPolicy::default(),
            max_order: None,
            display_decimals: Some(DISPLAY_DECIMALS_DEFAULT),
        }
    }
}

impl Options {
    pub fn with_denominator(mut self, denominator: DenominatorBound) -> Self {
        self.denominator = denominator;
        self
    }

    pub fn with_snap_tolerance(mut self, snap_tolerance: f64) -> Self {
        self.snap_tolerance = snap_tolerance;
        self
    }

    pub fn with_back_substitution(mut self, policy: PivotPolicy) -> Self {
        self.back_substitution = policy;
        self
    }

    pub fn with_max_order(mut self, max_order: usize) -> Self {
        self.max_order = Some(max_order);
        self
    }

    pub fn with_display_decimals(mut self, decimals: Option<i32>) -> Self {
        self.display_decimals = decimals;
        self
    }

    /// The formatter every rendered value goes through.
    pub fn formatter(&self) -> Formatter {
        Formatter::new(self.denominator, self.snap_tolerance)
    }

    /// Rejects an order above `max_order`.
    pub fn check_order(&self, order: usize) -> Result<(), Error> {
        match self.max_order {
            Some(limit) if order > limit => {
                Err(linear::Error::OrderTooLarge { order, limit }.into())
            }
            _ => Ok(()),
        }
    }

    /// Rounds `value` the way the L and U grids are displayed.
    pub(crate) fn round_for_display(&self, value: f64) -> f64 {
        match self.display_decimals {
            Some(decimals) => {
                let scale = 10f64.powi(decimals);
                let rounded = (value * scale).round() / scale;
                if rounded.is_finite() {
                    rounded
                } else {
                    value
                }
            }
            None => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = Options::default();
        assert_eq!(options.denominator, DenominatorBound::Limited(10_000));
        assert_eq!(
            options.back_substitution,
            PivotPolicy::Regularize { epsilon: 1e-10 }
        );
        assert_eq!(options.formatter(), Formatter::default());
        assert!(options.check_order(1_000).is_ok());
    }

    #[test]
    fn test_max_order() {
        let options = Options::default().with_max_order(3);
        assert!(options.check_order(3).is_ok());
        let err = options.check_order(4).unwrap_err();
        assert_eq!(err.kind(), linear::ErrorKind::OrderTooLarge);
    }

    #[test]
    fn test_round_for_display() {
        let options = Options::default().with_display_decimals(Some(2));
        assert_eq!(options.round_for_display(1.234), 1.23);
        assert_eq!(options.round_for_display(-0.005001), -0.01);

        let raw = Options::default().with_display_decimals(None);
        assert_eq!(raw.round_for_display(1.234), 1.234);
    }
}
