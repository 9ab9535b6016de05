// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Concentrated-liquidity position valuation
//!
//! Converts a position's liquidity and tick range into the two token amounts it
//! represents at the pool's current price, using the standard Uniswap V3/V4
//! range math:
//!
//! ```text
//! sl = sqrt(1.0001^tick_lower), su = sqrt(1.0001^tick_upper), sp = current sqrt price
//!
//! tick_lower < tick < tick_upper   amount0 = L (su - sp) / (sp su)   amount1 = L (sp - sl)
//! tick >= tick_upper               amount0 = 0                       amount1 = L (su - sl)
//! tick <= tick_lower               amount0 = L (su - sl) / (su sl)   amount1 = 0
//! ```
//!
//! Valuation never fails. A position that cannot be read at the query block, or
//! whose range is implausibly wide, is worth `(0, 0)`.
//!
//! # Example
//!
//! ```rust
//! use pointscan::value_position;
//!
//! let amounts = value_position(1_000_000, -100, 100, 0, 1.0);
//! assert!(amounts.amount0 > 0.0 && amounts.amount1 > 0.0);
//! ```

use alloy_primitives::{BlockNumber, U256};
use serde::{Deserialize, Serialize};
use tracing::{debug, Instrument};

use crate::errors::ValuationError;
use crate::source::LiquidityPositionReader;
use crate::tracing::spans;
use crate::types::tokens::TokenDecimals;

mod packed;
mod pool;
mod tick;

pub use packed::PackedPositionInfo;
pub use pool::PoolState;
pub use tick::{sqrt_ratio_at_tick, tick_at_sqrt_ratio, TickRange, MAX_TICK, MIN_TICK, TICK_BASE};

/// Token amounts represented by a position
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TokenPair {
    pub amount0: f64,
    pub amount1: f64,
}

impl TokenPair {
    pub const ZERO: Self = Self {
        amount0: 0.0,
        amount1: 0.0,
    };

    pub const fn new(amount0: f64, amount1: f64) -> Self {
        Self { amount0, amount1 }
    }

    /// Scale raw amounts down by each token's decimals
    pub fn scale(&self, decimals0: TokenDecimals, decimals1: TokenDecimals) -> Self {
        Self {
            amount0: self.amount0 / decimals0.divisor(),
            amount1: self.amount1 / decimals1.divisor(),
        }
    }

    /// `amount0 + amount1`; only meaningful once both sides share a unit
    pub fn total(&self) -> f64 {
        self.amount0 + self.amount1
    }

    pub fn is_zero(&self) -> bool {
        self.amount0 == 0.0 && self.amount1 == 0.0
    }
}

impl std::ops::Add for TokenPair {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            amount0: self.amount0 + rhs.amount0,
            amount1: self.amount1 + rhs.amount1,
        }
    }
}

impl std::ops::AddAssign for TokenPair {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

/// Liquidity and tick range of a position at one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPosition {
    pub liquidity: u128,
    pub range: TickRange,
}

impl LiquidityPosition {
    pub const fn new(liquidity: u128, range: TickRange) -> Self {
        Self { liquidity, range }
    }

    /// From a V4 `positionInfo` word and `getPositionLiquidity` result
    pub fn from_packed(info: PackedPositionInfo, liquidity: u128) -> Result<Self, ValuationError> {
        Ok(Self::new(liquidity, info.tick_range()?))
    }
}

/// Value a concentrated-liquidity position in raw token units
///
/// Returns `(0, 0)` for zero liquidity, for an inverted range or one reaching
/// outside [`MIN_TICK`]`..=`[`MAX_TICK`], for a non-positive or non-finite sqrt
/// price, and whenever the result is not finite. Amounts are absolute values.
pub fn value_position(
    liquidity: u128,
    tick_lower: i32,
    tick_upper: i32,
    current_tick: i32,
    current_sqrt_price: f64,
) -> TokenPair {
    if liquidity == 0 {
        return TokenPair::ZERO;
    }
    let Ok(range) = TickRange::new(tick_lower, tick_upper) else {
        return TokenPair::ZERO;
    };
    if !range.is_within_tick_bounds() {
        return TokenPair::ZERO;
    }
    if !current_sqrt_price.is_finite() || current_sqrt_price <= 0.0 {
        return TokenPair::ZERO;
    }

    let liquidity = liquidity as f64;
    let sqrt_lower = sqrt_ratio_at_tick(range.lower());
    let sqrt_upper = sqrt_ratio_at_tick(range.upper());
    let sqrt_price = current_sqrt_price;

    let (amount0, amount1) = if range.contains(current_tick) {
        (
            liquidity * (sqrt_upper - sqrt_price) / (sqrt_price * sqrt_upper),
            liquidity * (sqrt_price - sqrt_lower),
        )
    } else if current_tick >= range.upper() {
        (0.0, liquidity * (sqrt_upper - sqrt_lower))
    } else {
        (
            liquidity * (sqrt_upper - sqrt_lower) / (sqrt_upper * sqrt_lower),
            0.0,
        )
    };

    if !amount0.is_finite() || !amount1.is_finite() {
        return TokenPair::ZERO;
    }
    TokenPair::new(amount0.abs(), amount1.abs())
}

/// Values positions of one pool, applying the pool's decimals and range policy
///
/// # Example
///
/// ```rust
/// use pointscan::{LiquidityPosition, PoolState, PositionValuer, TickRange, TokenDecimals};
///
/// let valuer = PositionValuer::new(TokenDecimals::STANDARD, TokenDecimals::STANDARD)
///     .with_max_tick_magnitude(7000);
/// let pool = PoolState::new(0, 1.0).unwrap();
///
/// let wide = LiquidityPosition::new(10u128.pow(18), TickRange::new(-8000, 8000).unwrap());
/// assert!(valuer.value(&wide, &pool).is_zero());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionValuer {
    decimals0: TokenDecimals,
    decimals1: TokenDecimals,
    max_tick_magnitude: Option<u32>,
}

impl PositionValuer {
    pub const fn new(decimals0: TokenDecimals, decimals1: TokenDecimals) -> Self {
        Self {
            decimals0,
            decimals1,
            max_tick_magnitude: None,
        }
    }

    /// Treat positions with either bound beyond `max` ticks from zero as worthless
    pub const fn with_max_tick_magnitude(mut self, max: u32) -> Self {
        self.max_tick_magnitude = Some(max);
        self
    }

    pub const fn max_tick_magnitude(&self) -> Option<u32> {
        self.max_tick_magnitude
    }

    /// Raw token amounts of `position` at `pool`'s price
    pub fn value_raw(&self, position: &LiquidityPosition, pool: &PoolState) -> TokenPair {
        if let Some(max) = self.max_tick_magnitude {
            if position.range.exceeds_magnitude(max) {
                debug!(
                    range = %position.range,
                    max_tick_magnitude = max,
                    "Tick range exceeds configured maximum, valuing position at zero"
                );
                return TokenPair::ZERO;
            }
        }
        value_position(
            position.liquidity,
            position.range.lower(),
            position.range.upper(),
            pool.tick(),
            pool.sqrt_price(),
        )
    }

    /// Token amounts of `position` scaled to whole-token units
    pub fn value(&self, position: &LiquidityPosition, pool: &PoolState) -> TokenPair {
        self.value_raw(position, pool)
            .scale(self.decimals0, self.decimals1)
    }

    /// Resolve `token_id` through `reader` at `block` and value it
    ///
    /// A position that cannot be resolved (not yet minted, burned, or otherwise
    /// unreadable) is worth zero; the failure is logged, not returned.
    pub async fn value_token<R>(
        &self,
        reader: &R,
        token_id: U256,
        block: BlockNumber,
        pool: &PoolState,
    ) -> TokenPair
    where
        R: LiquidityPositionReader + ?Sized,
    {
        let span = spans::value_token(token_id, block);
        async {
            match reader.position(token_id, block).await {
                Ok(position) => self.value(&position, pool),
                Err(e) => {
                    debug!(error = %e, "Position unresolvable at block, valuing at zero");
                    TokenPair::ZERO
                }
            }
        }
        .instrument(span)
        .await
    }
}
