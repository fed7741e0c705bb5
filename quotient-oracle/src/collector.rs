use std::sync::Arc;

use quotient_common::{
    display::format_units,
    models::{Quote, TradeSpec},
    OracleError, QuoteBackend,
};
use tracing::info;

/// Collects quotes for one trade from every configured backend.
///
/// Backends are invoked sequentially in registration order so log output
/// is deterministic. The first failing backend aborts the collection;
/// the failure is wrapped with the backend's label and nothing after it
/// is invoked.
pub struct QuoteCollector {
    backends: Vec<Arc<dyn QuoteBackend>>,
}

impl QuoteCollector {
    pub fn new(backends: Vec<Arc<dyn QuoteBackend>>) -> Self {
        Self { backends }
    }

    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }

    /// Invokes each backend's `quote` with the identical trade and returns
    /// the quotes in backend order.
    pub async fn collect(&self, trade: &TradeSpec) -> Result<Vec<Quote>, OracleError> {
        let mut quotes = Vec::with_capacity(self.backends.len());
        for backend in &self.backends {
            let quote = backend
                .quote(trade)
                .await
                .map_err(|source| OracleError::Backend {
                    backend: backend.label().to_string(),
                    source,
                })?;
            info!(
                backend = backend.label(),
                pair = %trade,
                amount = %format_units(&quote.raw_amount, quote.decimals),
                "collected quote"
            );
            quotes.push(quote);
        }
        Ok(quotes)
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use pretty_assertions::assert_eq;
    use quotient_common::{
        models::{Address, FeeTier, Token},
        traits::MockQuoteBackend,
        QuoteError,
    };

    use super::*;

    fn wbtc_usdt() -> TradeSpec {
        TradeSpec::new(
            Token::new(Address::repeat_byte(0xb7), "WBTC", 8),
            Token::new(Address::repeat_byte(0x07), "USDT", 6),
            BigUint::from(100_000_000u32),
            FeeTier::Medium,
        )
    }

    fn quoting_backend(label: &'static str, amount: u64) -> MockQuoteBackend {
        let mut backend = MockQuoteBackend::new();
        backend.expect_label().return_const(label.to_string());
        backend
            .expect_quote()
            .returning(move |_| Ok(Quote::new(label, BigUint::from(amount), 6)));
        backend
    }

    #[tokio::test]
    async fn test_collects_in_backend_order() {
        let collector = QuoteCollector::new(vec![
            Arc::new(quoting_backend("lens", 3_057_857_924)),
            Arc::new(quoting_backend("quoter", 3_060_000_000)),
        ]);

        let quotes = collector.collect(&wbtc_usdt()).await.unwrap();

        assert_eq!(quotes.len(), 2);
        assert_eq!(quotes[0].source, "lens");
        assert_eq!(quotes[1].source, "quoter");
    }

    #[tokio::test]
    async fn test_collection_is_idempotent() {
        let collector = QuoteCollector::new(vec![
            Arc::new(quoting_backend("lens", 3_057_857_924)),
            Arc::new(quoting_backend("quoter", 3_060_000_000)),
        ]);
        let trade = wbtc_usdt();

        let first = collector.collect(&trade).await.unwrap();
        let second = collector.collect(&trade).await.unwrap();

        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_failure_aborts_and_names_the_backend() {
        let mut failing = MockQuoteBackend::new();
        failing
            .expect_label()
            .return_const("lens".to_string());
        failing.expect_quote().returning(|_| {
            Err(QuoteError::BackendUnavailable("connection reset".to_string()))
        });

        // The backend after the failing one must never be invoked.
        let mut untouched = MockQuoteBackend::new();
        untouched
            .expect_label()
            .return_const("quoter".to_string());
        untouched.expect_quote().times(0);

        let collector = QuoteCollector::new(vec![Arc::new(failing), Arc::new(untouched)]);

        let err = collector
            .collect(&wbtc_usdt())
            .await
            .unwrap_err();
        match err {
            OracleError::Backend { backend, source } => {
                assert_eq!(backend, "lens");
                assert!(matches!(source, QuoteError::BackendUnavailable(_)));
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
