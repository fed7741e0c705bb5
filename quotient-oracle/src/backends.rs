use std::collections::HashMap;

use async_trait::async_trait;
use num_bigint::BigUint;
use quotient_common::{
    models::{Address, FeeTier, Quote, TradeSpec},
    QuoteBackend, QuoteError,
};
use serde::Deserialize;

/// Configuration of one table-driven backend: a label, the decimal
/// precision its amounts are expressed in, and the quotes it knows.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticBackendConfig {
    pub label: String,
    pub decimals: u32,
    pub quotes: Vec<StaticQuoteEntry>,
}

/// One entry of a static quote table, pair given by token symbol.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticQuoteEntry {
    pub from: String,
    pub to: String,
    #[serde(default)]
    pub fee: FeeTier,
    pub amount_out: u128,
}

/// A [`QuoteBackend`] answering from a fixed in-memory table.
///
/// This is the fixture implementation used by the CLI and tests; live
/// contract or RPC backends plug in behind the same trait.
pub struct StaticQuoteBackend {
    label: String,
    decimals: u32,
    quotes: HashMap<(Address, Address, FeeTier), BigUint>,
}

impl StaticQuoteBackend {
    pub fn new(label: impl Into<String>, decimals: u32) -> Self {
        Self { label: label.into(), decimals, quotes: HashMap::new() }
    }

    pub fn with_quote(
        mut self,
        from: Address,
        to: Address,
        fee: FeeTier,
        amount_out: BigUint,
    ) -> Self {
        self.quotes
            .insert((from, to, fee), amount_out);
        self
    }
}

#[async_trait]
impl QuoteBackend for StaticQuoteBackend {
    fn label(&self) -> &str {
        &self.label
    }

    async fn quote(&self, trade: &TradeSpec) -> Result<Quote, QuoteError> {
        let key = (trade.token_in.address, trade.token_out.address, trade.fee);
        match self.quotes.get(&key) {
            Some(amount) => Ok(Quote::new(self.label.clone(), amount.clone(), self.decimals)),
            None => Err(QuoteError::InvalidTrade(format!(
                "no quote table entry for {} at fee tier {}",
                trade, trade.fee
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use num_bigint::BigUint;
    use pretty_assertions::assert_eq;
    use quotient_common::models::Token;

    use super::*;

    fn wbtc() -> Token {
        Token::new(Address::repeat_byte(0xb7), "WBTC", 8)
    }

    fn usdt() -> Token {
        Token::new(Address::repeat_byte(0x07), "USDT", 6)
    }

    fn trade(fee: FeeTier) -> TradeSpec {
        TradeSpec::new(wbtc(), usdt(), BigUint::from(100_000_000u32), fee)
    }

    #[tokio::test]
    async fn test_answers_from_the_table() {
        let backend = StaticQuoteBackend::new("fixture", 6).with_quote(
            wbtc().address,
            usdt().address,
            FeeTier::Medium,
            BigUint::from(3_057_857_924u64),
        );

        let quote = backend
            .quote(&trade(FeeTier::Medium))
            .await
            .unwrap();

        assert_eq!(quote.source, "fixture");
        assert_eq!(quote.raw_amount, BigUint::from(3_057_857_924u64));
        assert_eq!(quote.decimals, 6);
    }

    #[tokio::test]
    async fn test_unknown_fee_tier_is_an_invalid_trade() {
        let backend = StaticQuoteBackend::new("fixture", 6).with_quote(
            wbtc().address,
            usdt().address,
            FeeTier::Medium,
            BigUint::from(3_057_857_924u64),
        );

        let err = backend
            .quote(&trade(FeeTier::High))
            .await
            .unwrap_err();

        assert!(matches!(err, QuoteError::InvalidTrade(_)));
        assert!(err.to_string().contains("WBTC -> USDT"));
    }

    #[test]
    fn test_backend_config_deserializes() {
        let config: StaticBackendConfig = serde_json::from_str(
            r#"{
                "label": "lens",
                "decimals": 6,
                "quotes": [
                    {"from": "WBTC", "to": "USDT", "fee": 3000, "amount_out": 3057857924}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.label, "lens");
        assert_eq!(config.quotes[0].fee, FeeTier::Medium);
        assert_eq!(config.quotes[0].amount_out, 3_057_857_924);
    }
}
