// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Raw token amount type

use alloy_primitives::U256;
use bigdecimal::{
    num_bigint::{BigInt, Sign},
    BigDecimal,
};
use serde::{Deserialize, Serialize};
use std::ops::Add;

use super::decimals::TokenDecimals;

/// Raw token amount as stored on-chain, in the token's smallest unit
///
/// Balances read from chain-state readers (ERC-1155 `balanceOf`, vault share
/// balances, shorts outstanding) arrive as `TokenAmount` and are lifted into
/// [`BigDecimal`] for exact allocation arithmetic.
///
/// # Examples
///
/// ```
/// use alloy_primitives::U256;
/// use pointscan::{TokenAmount, TokenDecimals};
///
/// let amount = TokenAmount::new(U256::from(1_500_000_000_000_000_000u64));
/// assert_eq!(amount.normalize(TokenDecimals::STANDARD).to_string(), "1.5");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenAmount(U256);

impl TokenAmount {
    pub const ZERO: Self = Self(U256::ZERO);

    pub const fn new(amount: U256) -> Self {
        Self(amount)
    }

    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Exact integer value as a [`BigDecimal`]
    pub fn as_bigdecimal(&self) -> BigDecimal {
        BigDecimal::new(self.magnitude(), 0)
    }

    /// Human-readable amount: `amount / 10^decimals`, exact
    pub fn normalize(&self, decimals: TokenDecimals) -> BigDecimal {
        BigDecimal::new(self.magnitude(), decimals.as_u8() as i64).normalized()
    }

    fn magnitude(&self) -> BigInt {
        BigInt::from_bytes_be(Sign::Plus, &self.0.to_be_bytes::<32>())
    }

    /// Subtract, clamping at zero
    pub fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl From<u64> for TokenAmount {
    fn from(value: u64) -> Self {
        Self(U256::from(value))
    }
}

impl From<u128> for TokenAmount {
    fn from(value: u128) -> Self {
        Self(U256::from(value))
    }
}

impl From<U256> for TokenAmount {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl Add for TokenAmount {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_as_bigdecimal_handles_full_width() {
        let amount = TokenAmount::new(U256::MAX);
        assert_eq!(
            amount.as_bigdecimal(),
            BigDecimal::from_str(&U256::MAX.to_string()).unwrap()
        );
    }

    #[test]
    fn test_normalize_usdc() {
        let raw = TokenAmount::from(100_250_000u64);
        assert_eq!(
            raw.normalize(TokenDecimals::USDC),
            BigDecimal::from_str("100.25").unwrap()
        );
    }

    #[test]
    fn test_saturating_sub() {
        let a = TokenAmount::from(5u64);
        let b = TokenAmount::from(7u64);
        assert_eq!(a.saturating_sub(b), TokenAmount::ZERO);
        assert_eq!(b.saturating_sub(a), TokenAmount::from(2u64));
    }

    #[test]
    fn test_addition_saturates() {
        let total = TokenAmount::new(U256::MAX) + TokenAmount::from(1u64);
        assert_eq!(total.as_u256(), U256::MAX);
    }

    #[test]
    fn test_serialization() {
        let amount = TokenAmount::from(12345u64);
        let json = serde_json::to_string(&amount).unwrap();
        let deserialized: TokenAmount = serde_json::from_str(&json).unwrap();
        assert_eq!(amount, deserialized);
    }
}
