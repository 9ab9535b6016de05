//! Token decimal precision type

use serde::{Deserialize, Serialize};

/// ERC-20 token decimal precision
///
/// Liquidity valuations come out in raw token units; each side of a pool is
/// scaled down by its own precision (USDe uses 18, USDC 6).
///
/// # Examples
///
/// ```
/// use pointscan::TokenDecimals;
///
/// assert_eq!(TokenDecimals::STANDARD.as_u8(), 18);
/// assert_eq!(TokenDecimals::USDC.divisor(), 1_000_000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenDecimals(u8);

impl TokenDecimals {
    /// Standard decimals for ETH-like tokens, USDe and Hyperdrive shares (18)
    pub const STANDARD: Self = Self(18);

    /// USDC decimals (6)
    pub const USDC: Self = Self(6);

    pub const fn new(decimals: u8) -> Self {
        Self(decimals)
    }

    pub const fn as_u8(&self) -> u8 {
        self.0
    }

    /// `10^decimals` as a float, for scaling liquidity valuations
    pub fn divisor(&self) -> f64 {
        10_f64.powi(self.0 as i32)
    }
}

impl From<u8> for TokenDecimals {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for TokenDecimals {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} decimals", self.0)
    }
}
