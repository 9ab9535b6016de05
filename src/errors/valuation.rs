// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for concentrated-liquidity valuation.

/// Errors from constructing valuation inputs.
///
/// Valuation itself never fails: positions that cannot be resolved or that
/// carry implausible ranges are worth zero. These errors only surface when a
/// caller builds a [`crate::TickRange`] or [`crate::PoolState`] explicitly.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValuationError {
    /// The lower tick is above the upper tick.
    #[error("Inverted tick range: lower {lower} > upper {upper}")]
    InvertedRange {
        /// Lower tick
        lower: i32,
        /// Upper tick
        upper: i32,
    },

    /// The pool's sqrt price is zero, negative or not finite.
    #[error("Invalid sqrt price: {sqrt_price}")]
    InvalidSqrtPrice {
        /// The offending value
        sqrt_price: f64,
    },
}

impl ValuationError {
    pub fn inverted_range(lower: i32, upper: i32) -> Self {
        ValuationError::InvertedRange { lower, upper }
    }

    pub fn invalid_sqrt_price(sqrt_price: f64) -> Self {
        ValuationError::InvalidSqrtPrice { sqrt_price }
    }
}
