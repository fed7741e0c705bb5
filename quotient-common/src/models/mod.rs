pub mod quote;
pub mod token;
pub mod trade;

/// Address literal type to uniquely identify tokens and contracts on a
/// blockchain.
pub type Address = alloy_primitives::Address;

pub use quote::{ComparisonResult, Deviation, NormalizedQuote, Quote, Tolerance};
pub use token::Token;
pub use trade::{FeeTier, TradeSpec};
