// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Pool price snapshot

use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

use super::tick::tick_at_sqrt_ratio;
use crate::errors::ValuationError;

/// Pool tick and sqrt price at one block
///
/// Only valid for the block it was read at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolState {
    tick: i32,
    sqrt_price: f64,
}

impl PoolState {
    /// # Errors
    ///
    /// Returns [`ValuationError::InvalidSqrtPrice`] unless `sqrt_price` is finite and positive.
    pub fn new(tick: i32, sqrt_price: f64) -> Result<Self, ValuationError> {
        if !sqrt_price.is_finite() || sqrt_price <= 0.0 {
            return Err(ValuationError::invalid_sqrt_price(sqrt_price));
        }
        Ok(Self { tick, sqrt_price })
    }

    /// From a `slot0` read that carries both the Q64.96 sqrt price and the tick
    /// (Uniswap V4 `StateView.getSlot0`).
    pub fn from_slot0(sqrt_price_x96: U256, tick: i32) -> Result<Self, ValuationError> {
        Self::new(tick, q96_to_f64(sqrt_price_x96))
    }

    /// From the Q64.96 sqrt price alone, deriving the tick from the price
    /// (Thruster pools are read this way).
    pub fn from_sqrt_price_x96(sqrt_price_x96: U256) -> Result<Self, ValuationError> {
        let sqrt_price = q96_to_f64(sqrt_price_x96);
        let tick = tick_at_sqrt_ratio(sqrt_price)
            .ok_or_else(|| ValuationError::invalid_sqrt_price(sqrt_price))?;
        Self::new(tick, sqrt_price)
    }

    pub const fn tick(&self) -> i32 {
        self.tick
    }

    pub const fn sqrt_price(&self) -> f64 {
        self.sqrt_price
    }

    /// `token1` per `token0`, in raw units
    pub fn price(&self) -> f64 {
        self.sqrt_price * self.sqrt_price
    }
}

/// Convert a Q64.96 fixed-point value to a float
fn q96_to_f64(value: U256) -> f64 {
    let mut out = 0.0;
    for (i, limb) in value.as_limbs().iter().enumerate() {
        out += (*limb as f64) * 2f64.powi(64 * i as i32);
    }
    out / 2f64.powi(96)
}
