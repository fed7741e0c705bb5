use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

use super::Token;

/// Liquidity pool fee tier, in pips (3000 = 0.3%).
///
/// Selects which pool variant of a pair a backend quotes against,
/// analogous to a market/venue selector.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    Default,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum FeeTier {
    #[strum(serialize = "100")]
    Lowest,
    #[strum(serialize = "500")]
    Low,
    #[default]
    #[strum(serialize = "3000")]
    Medium,
    #[strum(serialize = "10000")]
    High,
}

impl FeeTier {
    /// Fee in pips, the unit pool contracts take the tier in.
    pub fn pips(&self) -> u32 {
        match self {
            Self::Lowest => 100,
            Self::Low => 500,
            Self::Medium => 3000,
            Self::High => 10000,
        }
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            100 => Ok(Self::Lowest),
            500 => Ok(Self::Low),
            3000 => Ok(Self::Medium),
            10000 => Ok(Self::High),
            other => Err(format!("unsupported fee tier: {other}")),
        }
    }
}

impl From<FeeTier> for u32 {
    fn from(value: FeeTier) -> Self {
        value.pips()
    }
}

/// A single trade to be quoted: sell `amount_in` of `token_in` for
/// `token_out` on the pool selected by `fee`.
///
/// Immutable once constructed; every backend participating in a comparison
/// is invoked with the identical spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeSpec {
    pub token_in: Token,
    pub token_out: Token,
    pub amount_in: BigUint,
    pub fee: FeeTier,
}

impl TradeSpec {
    pub fn new(token_in: Token, token_out: Token, amount_in: BigUint, fee: FeeTier) -> Self {
        Self { token_in, token_out, amount_in, fee }
    }

    /// Pair label used to name scenarios and reports.
    pub fn pair(&self) -> String {
        format!("{} -> {}", self.token_in.symbol, self.token_out.symbol)
    }
}

impl fmt::Display for TradeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.token_in.symbol, self.token_out.symbol)
    }
}
