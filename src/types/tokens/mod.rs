// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for token-related values
//!
//! ```text
//! TokenAmount (U256, raw on-chain units)
//!     |
//!     | as_bigdecimal()          exact, used by the allocator
//!     | normalize(TokenDecimals) human units, used for reported balances
//!     ↓
//! BigDecimal
//! ```

mod amount;
mod decimals;

pub use amount::TokenAmount;
pub use decimals::TokenDecimals;
