//! Rendering of floating point values as fractions.
//!
//! The fractions produced here are only ever used for display: every computation upstream stays
//! in floating point. A value is rendered either as a plain integer (when it lies within the snap
//! tolerance of one) or as the best rational approximation whose denominator does not exceed the
//! configured bound.
//!
//! ```
//! use rational::Formatter;
//!
//! let fmt = Formatter::default();
//! assert_eq!(fmt.format(1.5), "3/2");
//! assert_eq!(fmt.format(-4.0), "-4");
//! ```

use num_bigint::BigInt;
use num_rational::Rational64;
use num_traits::{Float, Signed, ToPrimitive};

#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Default upper bound on the denominator of a rendered fraction.
pub const DEFAULT_MAX_DENOMINATOR: u64 = 10_000;

/// Default distance from an integer under which a value is rendered as that integer.
pub const DEFAULT_SNAP_TOLERANCE: f64 = 1e-9;

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DenominatorBound {
    /// Denominators never exceed the given value. A bound of 0 behaves like 1.
    Limited(u64),
    /// The continued fraction is expanded until the value is reproduced exactly, or until the
    /// denominator would leave the `i64` range.
    Unbounded,
}

impl DenominatorBound {
    fn max_denominator(&self) -> u128 {
        match *self {
            Self::Limited(max) => max.clamp(1, i64::MAX as u64) as u128,
            Self::Unbounded => i64::MAX as u128,
        }
    }
}

impl Default for DenominatorBound {
    fn default() -> Self {
        Self::Limited(DEFAULT_MAX_DENOMINATOR)
    }
}

/// Converts scalars to display strings such as `"7"`, `"-3/2"` or `"355/113"`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Formatter {
    bound: DenominatorBound,
    snap_tolerance: f64,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DenominatorBound::default(), DEFAULT_SNAP_TOLERANCE)
    }
}

impl Formatter {
    /// Creates a formatter.
    ///
    /// ## Arguments
    /// * `bound` the largest denominator a rendered fraction may have.
    /// * `snap_tolerance` values with `|v - round(v)| <= snap_tolerance` render as integers. A
    ///     tolerance of `0.0` only snaps values that are exactly integral.
    pub fn new(bound: DenominatorBound, snap_tolerance: f64) -> Self {
        Formatter {
            bound,
            snap_tolerance,
        }
    }

    pub fn bound(&self) -> DenominatorBound {
        self.bound
    }

    pub fn snap_tolerance(&self) -> f64 {
        self.snap_tolerance
    }

    /// Returns the nearest integer when `value` is within the snap tolerance of it and that
    /// integer fits in an `i64`.
    pub fn snap(&self, value: f64) -> Option<i64> {
        if !value.is_finite() {
            return None;
        }
        let nearest = value.round();
        if (value - nearest).abs() <= self.snap_tolerance {
            nearest.to_i64()
        } else {
            None
        }
    }

    /// The fraction `format` would display, or `None` for values that cannot be expressed as an
    /// `i64` ratio (non-finite, or too large in magnitude).
    pub fn approximate(&self, value: f64) -> Option<Rational64> {
        match self.snap(value) {
            Some(int) => Some(Rational64::from_integer(int)),
            None => limit_denominator(value, self.bound),
        }
    }

    /// Renders `value`, falling back to the decimal representation when no fraction exists.
    pub fn format(&self, value: f64) -> String {
        match self.approximate(value) {
            Some(ratio) => ratio.to_string(),
            None => value.to_string(),
        }
    }
}

/// Finds the fraction closest to `value` among all fractions whose denominator respects `bound`.
///
/// The value is first taken apart into its exact binary ratio, and the continued fraction
/// expansion of that ratio is walked until the next convergent would exceed the bound. The answer
/// is then either the last convergent or the largest admissible semiconvergent, whichever is
/// closer to the exact ratio. Ties go to the convergent.
pub fn limit_denominator(value: f64, bound: DenominatorBound) -> Option<Rational64> {
    if !value.is_finite() {
        return None;
    }
    if value.fract() == 0.0 {
        return value.to_i64().map(Rational64::from_integer);
    }

    let (mantissa, exponent, sign) = value.integer_decode();
    let sign = i64::from(sign);

    // Not an integer, so the exponent is negative and stays negative after reduction.
    let shift = mantissa.trailing_zeros().min(u32::from(exponent.unsigned_abs()));
    let mantissa = mantissa >> shift;
    let exponent = u32::from(exponent.unsigned_abs()) - shift;

    if exponent > 126 {
        // |value| < 2^-73, far closer to 0 than to 1/i64::MAX.
        return Some(Rational64::from_integer(0));
    }

    let (numer, denom) = best_approximation(
        mantissa as u128,
        1u128 << exponent,
        bound.max_denominator(),
    )?;

    let numer = i64::try_from(numer).ok()?;
    let denom = i64::try_from(denom).ok()?;
    Some(Rational64::new(sign * numer, denom))
}

/// Best approximation of the reduced, non-negative ratio `numer / denom` with a denominator no
/// larger than `max`.
fn best_approximation(numer: u128, denom: u128, max: u128) -> Option<(u128, u128)> {
    if denom <= max {
        return Some((numer, denom));
    }

    let (mut p0, mut q0, mut p1, mut q1) = (0u128, 1u128, 1u128, 0u128);
    let (mut n, mut d) = (numer, denom);

    while d != 0 {
        let a = n / d;
        let q2 = match a.checked_mul(q1).and_then(|aq| aq.checked_add(q0)) {
            Some(q2) if q2 <= max => q2,
            _ => break,
        };
        let p2 = a.checked_mul(p1)?.checked_add(p0)?;
        (p0, q0, p1, q1) = (p1, q1, p2, q2);
        (n, d) = (d, n - a * d);
    }

    let k = (max - q0) / q1;
    let semi = (
        k.checked_mul(p1)?.checked_add(p0)?,
        k.checked_mul(q1)?.checked_add(q0)?,
    );
    let convergent = (p1, q1);

    if closer_or_equal(convergent, semi, numer, denom) {
        Some(convergent)
    } else {
        Some(semi)
    }
}

/// Whether `a` is at least as close to `numer / denom` as `b`, compared exactly.
///
/// `|pa/qa - n/d| <= |pb/qb - n/d|` is `|pa d - n qa| qb <= |pb d - n qb| qa`; the products exceed
/// 128 bits, hence `BigInt`.
fn closer_or_equal(a: (u128, u128), b: (u128, u128), numer: u128, denom: u128) -> bool {
    let (numer, denom) = (BigInt::from(numer), BigInt::from(denom));
    let error = |(p, q): (u128, u128)| (BigInt::from(p) * &denom - &numer * BigInt::from(q)).abs();
    error(a) * BigInt::from(b.1) <= error(b) * BigInt::from(a.1)
}
