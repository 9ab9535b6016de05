// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for rewardable-TVL allocation.

use bigdecimal::BigDecimal;

use crate::allocation::PositionCategory;

/// Errors from [`crate::allocate`] and its helpers.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AllocationError {
    /// A position carries a negative raw balance.
    #[error("Position {index} has negative balance {balance}")]
    NegativeBalance {
        /// Index of the position in the input sequence
        index: usize,
        /// The offending balance
        balance: BigDecimal,
    },

    /// A category total is negative or fractional.
    #[error("Total for {category} must be a non-negative integer, got {total}")]
    InvalidTotal {
        /// Category whose total is invalid
        category: PositionCategory,
        /// The offending total
        total: BigDecimal,
    },

    /// A category appears in more than one allocation group.
    #[error("{category} is listed in more than one allocation group")]
    OverlappingGroups {
        /// The duplicated category
        category: PositionCategory,
    },

    /// Shares checked against a different number of positions.
    #[error("Got {shares} shares for {positions} positions")]
    LengthMismatch {
        /// Number of positions
        positions: usize,
        /// Number of shares
        shares: usize,
    },

    /// Shares within a group do not sum to the group total.
    #[error("Shares for {group} sum to {allocated}, expected {expected}")]
    Unreconciled {
        /// Display form of the group
        group: String,
        /// Sum of shares
        allocated: BigDecimal,
        /// Group total
        expected: BigDecimal,
    },
}

impl AllocationError {
    pub fn negative_balance(index: usize, balance: BigDecimal) -> Self {
        AllocationError::NegativeBalance { index, balance }
    }

    pub fn invalid_total(category: PositionCategory, total: BigDecimal) -> Self {
        AllocationError::InvalidTotal { category, total }
    }
}
