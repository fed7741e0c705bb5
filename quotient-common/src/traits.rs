use async_trait::async_trait;

use crate::{
    errors::QuoteError,
    models::{Quote, TradeSpec},
};

/// An opaque pricing service the oracle can ask for quotes.
///
/// Implementations are read-only and side-effect free: quoting the same
/// trade against an unchanged backend must return the same amount. The
/// oracle treats every backend identically and never retries a failed
/// call.
#[cfg_attr(feature = "test-utils", mockall::automock)]
#[async_trait]
pub trait QuoteBackend: Send + Sync {
    /// Stable label identifying this backend in quotes, logs and reports.
    fn label(&self) -> &str;

    /// Quote the amount of `trade.token_out` received for the trade.
    async fn quote(&self, trade: &TradeSpec) -> Result<Quote, QuoteError>;
}
