use std::{sync::Arc, time::Duration};

use quotient_common::{
    models::{ComparisonResult, Tolerance, TradeSpec},
    OracleError, QuoteBackend,
};
use tracing::{error, info};

use crate::{collector::QuoteCollector, convergence::ConvergenceChecker, normalize::normalize};

/// A named equivalence check: one trade, identified by its pair label.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: String,
    pub trade: TradeSpec,
}

impl Scenario {
    /// Builds a scenario named after the trade's pair, the way runs are
    /// reported ("WBTC -> USDT").
    pub fn for_pair(trade: TradeSpec) -> Self {
        Self { name: trade.pair(), trade }
    }
}

/// Outcome of one scenario run, with a human-readable message.
#[derive(Debug)]
pub struct ScenarioReport {
    pub name: String,
    pub outcome: Result<ComparisonResult, OracleError>,
}

impl ScenarioReport {
    pub fn passed(&self) -> bool {
        matches!(&self.outcome, Ok(result) if result.passed)
    }

    pub fn message(&self) -> String {
        match &self.outcome {
            Ok(result) if result.passed => {
                format!("quotes agree: {result}")
            }
            Ok(result) => format!("Oracle price mismatch: {result}"),
            Err(err) => format!("scenario aborted: {err}"),
        }
    }
}

/// The equivalence oracle: collector, normalizer and convergence checker
/// run in sequence against a fixed backend set.
///
/// One instance is immutable and can be reused across scenarios; nothing
/// is shared between invocations beyond the read-only backends.
pub struct EquivalenceOracle {
    collector: QuoteCollector,
    checker: ConvergenceChecker,
    timeout: Duration,
}

impl EquivalenceOracle {
    pub fn new(
        backends: Vec<Arc<dyn QuoteBackend>>,
        tolerance: Tolerance,
        timeout: Duration,
    ) -> Self {
        Self {
            collector: QuoteCollector::new(backends),
            checker: ConvergenceChecker::new(tolerance),
            timeout,
        }
    }

    /// Collects, normalizes and checks quotes for one trade.
    pub async fn compare(&self, trade: &TradeSpec) -> Result<ComparisonResult, OracleError> {
        let quotes = self.collector.collect(trade).await?;
        let normalized = normalize(&quotes);
        self.checker.check(&normalized)
    }

    /// Runs a named scenario under the oracle's deadline and reports the
    /// outcome. Never panics; every failure mode ends up in the report.
    pub async fn run_scenario(&self, scenario: &Scenario) -> ScenarioReport {
        let outcome = match tokio::time::timeout(self.timeout, self.compare(&scenario.trade)).await
        {
            Ok(outcome) => outcome,
            Err(_) => Err(OracleError::Timeout {
                scenario: scenario.name.clone(),
                after_secs: self.timeout.as_secs(),
            }),
        };

        let report = ScenarioReport { name: scenario.name.clone(), outcome };
        if report.passed() {
            info!(scenario = %report.name, "{}", report.message());
        } else {
            error!(scenario = %report.name, "{}", report.message());
        }
        report
    }
}
