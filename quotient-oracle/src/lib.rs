//! # Quotient Oracle
//!
//! A one-shot price-equivalence oracle: collect swap quotes for the same
//! trade from two or more independent backends, normalize them to a common
//! decimal base, and check that they agree within a configured tolerance.
//!
//! The flow per trade is strictly sequential — collect, normalize, check —
//! with no retries and no shared state between invocations. Backends are
//! opaque [`quotient_common::QuoteBackend`] implementations; the engine
//! never looks behind that seam.

pub mod backends;
pub mod cli;
pub mod collector;
pub mod config;
pub mod convergence;
pub mod normalize;
pub mod scenario;

pub use collector::QuoteCollector;
pub use config::OracleConfig;
pub use convergence::ConvergenceChecker;
pub use normalize::normalize;
pub use scenario::{EquivalenceOracle, Scenario, ScenarioReport};
