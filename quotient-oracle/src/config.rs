use std::{fs, sync::Arc, time::Duration};

use anyhow::Context;
use num_bigint::BigUint;
use quotient_common::{
    models::{FeeTier, Token, Tolerance, TradeSpec},
    OracleError, QuoteBackend,
};
use serde::Deserialize;

use crate::{
    backends::{StaticBackendConfig, StaticQuoteBackend},
    scenario::Scenario,
};

fn default_timeout_secs() -> u64 {
    60
}

/// A pair of token symbols to run one equivalence scenario for.
#[derive(Debug, Clone, Deserialize)]
pub struct PairConfig {
    pub from: String,
    pub to: String,
}

/// Static configuration of an oracle run.
///
/// Everything the oracle needs is supplied up front — the known token
/// table, the pairs to check, trade size, fee tier, tolerance, deadline
/// and the backend quote tables. The structure is immutable once loaded;
/// no runtime discovery, no module-level state.
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    pub tokens: Vec<Token>,
    pub pairs: Vec<PairConfig>,
    /// Raw input amount, in `from`-token precision.
    pub amount_in: u128,
    #[serde(default)]
    pub fee: FeeTier,
    #[serde(default, rename = "tolerance_bps")]
    pub tolerance: Tolerance,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub backends: Vec<StaticBackendConfig>,
}

impl OracleConfig {
    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("failed to parse oracle config")
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read oracle config from {path}"))?;
        Self::from_json(&raw)
    }

    /// The reference configuration: the fixed mainnet token table with the
    /// WBTC -> USDT scenario at the 0.3% fee tier, 1 WBTC in, 1%
    /// tolerance and a 60s deadline. Carries no backend tables; those are
    /// deployment-specific.
    pub fn mainnet_defaults() -> Self {
        Self {
            tokens: vec![
                mainnet_token("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", "WETH", 18),
                mainnet_token("0x6B175474E89094C44Da98b954EedeAC495271d0F", "DAI", 18),
                mainnet_token("0x514910771AF9Ca656af840dff83E8264EcF986CA", "LINK", 18),
                mainnet_token("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984", "UNI", 18),
                mainnet_token("0xdAC17F958D2ee523a2206206994597C13D831ec7", "USDT", 6),
                mainnet_token("0x2260FAC5E5542a773Aa44fBCfeDf7C193bc2C599", "WBTC", 8),
            ],
            pairs: vec![PairConfig { from: "WBTC".to_string(), to: "USDT".to_string() }],
            amount_in: 100_000_000,
            fee: FeeTier::Medium,
            tolerance: Tolerance::default(),
            timeout_secs: default_timeout_secs(),
            backends: Vec::new(),
        }
    }

    /// Looks a token up by its configured symbol.
    pub fn token(&self, symbol: &str) -> Result<&Token, OracleError> {
        self.tokens
            .iter()
            .find(|token| token.symbol == symbol)
            .ok_or_else(|| OracleError::UnknownToken(symbol.to_string()))
    }

    /// Resolves the configured pairs into named scenarios.
    pub fn scenarios(&self) -> Result<Vec<Scenario>, OracleError> {
        self.pairs
            .iter()
            .map(|pair| {
                let trade = TradeSpec::new(
                    self.token(&pair.from)?.clone(),
                    self.token(&pair.to)?.clone(),
                    BigUint::from(self.amount_in),
                    self.fee,
                );
                Ok(Scenario::for_pair(trade))
            })
            .collect()
    }

    /// Builds the configured backend quote tables, resolving symbols
    /// against the token table.
    pub fn build_backends(&self) -> Result<Vec<Arc<dyn QuoteBackend>>, OracleError> {
        self.backends
            .iter()
            .map(|config| {
                let mut backend = StaticQuoteBackend::new(&config.label, config.decimals);
                for entry in &config.quotes {
                    backend = backend.with_quote(
                        self.token(&entry.from)?.address,
                        self.token(&entry.to)?.address,
                        entry.fee,
                        BigUint::from(entry.amount_out),
                    );
                }
                Ok(Arc::new(backend) as Arc<dyn QuoteBackend>)
            })
            .collect()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn mainnet_token(address: &str, symbol: &str, decimals: u32) -> Token {
    Token::new(address.parse().expect("static token address"), symbol, decimals)
}
