use chrono::Utc;
use num_bigint::BigUint;
use quotient_common::{
    models::{ComparisonResult, Deviation, NormalizedQuote, Tolerance},
    OracleError,
};
use tracing::debug;

/// Decides whether a set of normalized quotes agree within a tolerance.
///
/// Stateless pure computation: takes overall min/max across all quotes,
/// forms the exact fraction `(max - min) / min` and compares it against
/// the tolerance by cross-multiplication, so no precision is lost beyond
/// the source integers' own.
pub struct ConvergenceChecker {
    tolerance: Tolerance,
}

impl ConvergenceChecker {
    pub fn new(tolerance: Tolerance) -> Self {
        Self { tolerance }
    }

    pub fn tolerance(&self) -> Tolerance {
        self.tolerance
    }

    /// Runs the check. Inputs must all share the same scale (the
    /// normalizer guarantees this for quotes it produced together).
    ///
    /// Edge cases:
    /// - fewer than two quotes cannot be compared;
    /// - all-zero quotes are trivially equal (deviation 0);
    /// - a zero minimum against a nonzero maximum has no defined relative
    ///   deviation and is reported as a degenerate comparison.
    pub fn check(&self, quotes: &[NormalizedQuote]) -> Result<ComparisonResult, OracleError> {
        if quotes.len() < 2 {
            return Err(OracleError::NotEnoughQuotes(quotes.len()));
        }
        debug_assert!(
            quotes
                .iter()
                .all(|quote| quote.scale == quotes[0].scale),
            "quotes must be normalized to one scale before comparison"
        );

        let mut minimum = &quotes[0];
        let mut maximum = &quotes[0];
        for quote in &quotes[1..] {
            if quote.amount < minimum.amount {
                minimum = quote;
            }
            if quote.amount > maximum.amount {
                maximum = quote;
            }
        }

        let deviation = if minimum.amount == BigUint::ZERO {
            if maximum.amount == BigUint::ZERO {
                Deviation::zero()
            } else {
                return Err(OracleError::DegenerateComparison {
                    backend: maximum.source.clone(),
                    amount: maximum.amount.clone(),
                });
            }
        } else {
            Deviation::between(&minimum.amount, &maximum.amount)
        };

        let passed = deviation.within(self.tolerance);
        debug!(%deviation, tolerance = %self.tolerance, passed, "convergence check");

        Ok(ComparisonResult {
            minimum: minimum.clone(),
            maximum: maximum.clone(),
            deviation,
            tolerance: self.tolerance,
            passed,
            checked_at: Utc::now().naive_utc(),
        })
    }
}
