use std::hash::{Hash, Hasher};

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use super::Address;

/// An asset known to the oracle, defined at configuration time.
///
/// Two tokens are considered equal when their addresses match; symbol and
/// decimals are descriptive metadata carried along for normalization and
/// display.
#[derive(Debug, Clone, Deserialize, Serialize, Eq)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u32,
}

impl Token {
    pub fn new(address: Address, symbol: &str, decimals: u32) -> Self {
        Self { address, symbol: symbol.to_string(), decimals }
    }

    /// One whole unit of this token in its raw integer representation,
    /// i.e. `10^decimals`.
    pub fn one(&self) -> BigUint {
        BigUint::from(10u32).pow(self.decimals)
    }
}

impl PartialEq for Token {
    fn eq(&self, other: &Self) -> bool {
        self.address == other.address
    }
}

impl Hash for Token {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address.hash(state);
    }
}
