// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Tick ranges and tick/price conversions

use serde::{Deserialize, Serialize};

use crate::errors::ValuationError;

/// Price ratio between adjacent ticks: `price = 1.0001^tick`
pub const TICK_BASE: f64 = 1.0001;

/// Lowest tick a Uniswap V3/V4 pool can reach
pub const MIN_TICK: i32 = -887_272;

/// Highest tick a Uniswap V3/V4 pool can reach
pub const MAX_TICK: i32 = 887_272;

/// `sqrt(1.0001^tick)`
pub fn sqrt_ratio_at_tick(tick: i32) -> f64 {
    TICK_BASE.powi(tick).sqrt()
}

/// Greatest tick whose price does not exceed `sqrt_price^2`
///
/// Returns `None` for non-positive or non-finite inputs.
pub fn tick_at_sqrt_ratio(sqrt_price: f64) -> Option<i32> {
    if !sqrt_price.is_finite() || sqrt_price <= 0.0 {
        return None;
    }
    let price = sqrt_price * sqrt_price;
    let tick = (price.ln() / TICK_BASE.ln()).floor();
    if tick < i32::MIN as f64 || tick > i32::MAX as f64 {
        return None;
    }
    Some(tick as i32)
}

/// Inclusive tick bounds of a liquidity position, `lower <= upper`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TickRange {
    lower: i32,
    upper: i32,
}

impl TickRange {
    /// # Errors
    ///
    /// Returns [`ValuationError::InvertedRange`] when `lower > upper`.
    pub fn new(lower: i32, upper: i32) -> Result<Self, ValuationError> {
        if lower > upper {
            return Err(ValuationError::inverted_range(lower, upper));
        }
        Ok(Self { lower, upper })
    }

    pub const fn lower(&self) -> i32 {
        self.lower
    }

    pub const fn upper(&self) -> i32 {
        self.upper
    }

    /// Strictly inside the range; a tick sitting on either bound is out of range
    pub fn contains(&self, tick: i32) -> bool {
        self.lower < tick && tick < self.upper
    }

    /// Both bounds inside `MIN_TICK..=MAX_TICK`
    pub fn is_within_tick_bounds(&self) -> bool {
        self.lower >= MIN_TICK && self.upper <= MAX_TICK
    }

    /// Whether either bound is further than `max` ticks from zero
    pub fn exceeds_magnitude(&self, max: u32) -> bool {
        self.lower.unsigned_abs() > max || self.upper.unsigned_abs() > max
    }
}

impl std::fmt::Display for TickRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.lower, self.upper)
    }
}
