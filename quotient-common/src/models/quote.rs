use std::fmt;

use chrono::NaiveDateTime;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::display::format_units;

/// A raw amount returned by a pricing backend for one trade.
///
/// `raw_amount` is expressed in the backend's native integer precision of
/// `decimals` fractional digits. Produced once per backend call and never
/// mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    /// Label of the backend that produced this quote.
    pub source: String,
    pub raw_amount: BigUint,
    pub decimals: u32,
}

impl Quote {
    pub fn new(source: impl Into<String>, raw_amount: BigUint, decimals: u32) -> Self {
        Self { source: source.into(), raw_amount, decimals }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.source, format_units(&self.raw_amount, self.decimals))
    }
}

/// A quote rescaled to the common decimal base of a comparison.
///
/// All quotes entering a convergence check must share the same `scale`;
/// rescaling only ever multiplies, so the value is exactly the source
/// integer in a finer unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedQuote {
    pub source: String,
    pub amount: BigUint,
    pub scale: u32,
}

impl fmt::Display for NormalizedQuote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", format_units(&self.amount, self.scale))
    }
}

/// Relative deviation between two amounts, kept as the exact fraction
/// `(max - min) / min`.
///
/// A fraction is used instead of a float so the tolerance decision is free
/// of rounding: both sides of the comparison stay in integer arithmetic.
/// Rendering as a percentage happens only for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deviation {
    pub numerator: BigUint,
    pub denominator: BigUint,
}

impl Deviation {
    /// The zero deviation, used when all compared amounts are identical
    /// (including the all-zero case).
    pub fn zero() -> Self {
        Self { numerator: BigUint::ZERO, denominator: BigUint::from(1u32) }
    }

    /// Deviation of `maximum` relative to a nonzero `minimum` baseline.
    pub fn between(minimum: &BigUint, maximum: &BigUint) -> Self {
        debug_assert!(*minimum != BigUint::ZERO, "deviation baseline must be nonzero");
        Self { numerator: maximum - minimum, denominator: minimum.clone() }
    }

    /// Whether this deviation is strictly below the tolerance.
    ///
    /// Decided by cross-multiplication: `num / den < bps / 10_000` iff
    /// `num * 10_000 < den * bps`.
    pub fn within(&self, tolerance: Tolerance) -> bool {
        &self.numerator * 10_000u32 < &self.denominator * tolerance.bps()
    }

    /// Deviation in basis points, rounded towards zero. Display only.
    pub fn bps(&self) -> BigUint {
        &self.numerator * 10_000u32 / &self.denominator
    }
}

impl fmt::Display for Deviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bps = self.bps();
        let whole = &bps / 100u32;
        let frac = (&bps % 100u32).to_string();
        write!(f, "{whole}.{frac:0>2}%")
    }
}

/// Maximum allowed relative deviation for two quotes to count as
/// equivalent, in basis points (100 bps = 1%).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tolerance {
    bps: u32,
}

impl Tolerance {
    pub fn from_bps(bps: u32) -> Self {
        Self { bps }
    }

    pub fn bps(&self) -> u32 {
        self.bps
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        // 1%, the reference scenario's tolerance.
        Self { bps: 100 }
    }
}

impl fmt::Display for Tolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}%", self.bps / 100, self.bps % 100)
    }
}

/// Outcome of one convergence check. Derived and ephemeral.
#[derive(Debug, Clone)]
pub struct ComparisonResult {
    pub minimum: NormalizedQuote,
    pub maximum: NormalizedQuote,
    pub deviation: Deviation,
    pub tolerance: Tolerance,
    pub passed: bool,
    /// When the check ran. The oracle is a point-in-time consistency
    /// check, so results are only meaningful together with this stamp.
    pub checked_at: NaiveDateTime,
}

impl fmt::Display for ComparisonResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "min {} ({}), max {} ({}), deviation {} vs tolerance {}",
            self.minimum,
            self.minimum.source,
            self.maximum,
            self.maximum.source,
            self.deviation,
            self.tolerance,
        )
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case::one_percent_exact(100u32, 10_000u32, "1.00%")]
    #[case::five_percent(105u32, 2_100u32, "5.00%")]
    #[case::sub_percent(3u32, 1_000u32, "0.30%")]
    #[case::floors_remainder(1u32, 3u32, "33.33%")]
    fn test_deviation_display(#[case] num: u32, #[case] den: u32, #[case] expected: &str) {
        let deviation =
            Deviation { numerator: BigUint::from(num), denominator: BigUint::from(den) };
        assert_eq!(deviation.to_string(), expected);
    }

    #[rstest]
    #[case::well_within(50u32, 10_000u32, true)]
    #[case::exactly_at_tolerance_fails(100u32, 10_000u32, false)]
    #[case::above(101u32, 10_000u32, false)]
    fn test_within_is_strict(#[case] num: u32, #[case] den: u32, #[case] expected: bool) {
        let deviation =
            Deviation { numerator: BigUint::from(num), denominator: BigUint::from(den) };
        assert_eq!(deviation.within(Tolerance::default()), expected);
    }

    #[test]
    fn test_zero_deviation_is_within_any_tolerance() {
        assert!(Deviation::zero().within(Tolerance::from_bps(1)));
        assert_eq!(Deviation::zero().to_string(), "0.00%");
    }

    #[test]
    fn test_between_keeps_exact_integers() {
        // 2^128 scale amounts survive untouched, no intermediate rounding.
        let minimum = BigUint::from(u128::MAX);
        let maximum = &minimum + BigUint::from(1u32);

        let deviation = Deviation::between(&minimum, &maximum);
        assert_eq!(deviation.numerator, BigUint::from(1u32));
        assert_eq!(deviation.denominator, minimum);
        assert!(deviation.within(Tolerance::from_bps(1)));
    }

    #[test]
    fn test_tolerance_default_is_one_percent() {
        assert_eq!(Tolerance::default().bps(), 100);
        assert_eq!(Tolerance::default().to_string(), "1.00%");
    }

    #[test]
    fn test_quote_displays_in_units() {
        let quote = Quote::new("lens", BigUint::from(3_057_857_924u64), 6);
        assert_eq!(quote.to_string(), "lens: 3057.857924");
    }
}
