// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Proportional rewardable-TVL allocation
//!
//! Apportions each group's rewardable TVL across the positions in that group in
//! proportion to their raw balances:
//!
//! 1. `share = group_total * balance / group_balance`, computed exactly and
//!    rounded to an integer, ties to even.
//! 2. Rounding leaves the group off by a small `diff`. The whole `diff` lands on
//!    the position with the largest share (first in input order on ties). A
//!    negative `diff` bigger than that share continues onto the next largest.
//! 3. Afterwards every group's shares sum to its total exactly;
//!    [`verify_reconciliation`] checks this.
//!
//! Groups come from a [`CategoryGroups`] table; a group's total is the sum of
//! its member categories' [`CategoryTotals`]. A group whose positions hold no
//! balance gets zero shares and is left unreconciled.
//!
//! # Example
//!
//! ```rust
//! use alloy_primitives::Address;
//! use bigdecimal::BigDecimal;
//! use pointscan::{allocate, CategoryGroups, CategoryTotals, Position, PositionCategory};
//!
//! let positions: Vec<_> = [1, 1, 1]
//!     .into_iter()
//!     .map(|b| Position::new(Address::ZERO, PositionCategory::Lp, b))
//!     .collect();
//! let totals = CategoryTotals::new().with(PositionCategory::Lp, 10);
//!
//! let shares = allocate(&positions, &totals, &CategoryGroups::separate()).unwrap();
//! let amounts: Vec<_> = shares.iter().map(|s| s.amount().clone()).collect();
//! assert_eq!(amounts, vec![BigDecimal::from(4), BigDecimal::from(3), BigDecimal::from(3)]);
//! ```

use alloy_primitives::Address;
use bigdecimal::BigDecimal;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AllocationError;
use crate::tracing::spans;
use crate::types::tokens::TokenDecimals;

mod asset_id;
mod category;
mod rounding;

pub use asset_id::AssetId;
pub use category::{AllocationGroup, CategoryGroups, CategoryTotals, PositionCategory};

use rounding::div_round_half_even;

/// A holder's balance in one category at one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub owner: Address,
    pub category: PositionCategory,
    /// Integer or fixed-point magnitude; must not be negative
    pub raw_balance: BigDecimal,
}

impl Position {
    pub fn new(owner: Address, category: PositionCategory, raw_balance: impl Into<BigDecimal>) -> Self {
        Self {
            owner,
            category,
            raw_balance: raw_balance.into(),
        }
    }

    /// Positive and strictly above `threshold`
    pub fn is_material(&self, threshold: &BigDecimal) -> bool {
        self.raw_balance.is_positive() && &self.raw_balance > threshold
    }
}

/// A position's allocated portion of its group's rewardable TVL
///
/// Always a non-negative integer in the total's base units.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Share(BigDecimal);

impl Share {
    pub fn zero() -> Self {
        Self(BigDecimal::zero())
    }

    pub fn amount(&self) -> &BigDecimal {
        &self.0
    }

    pub fn into_inner(self) -> BigDecimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// `amount / 10^decimals`
    pub fn normalize(&self, decimals: TokenDecimals) -> BigDecimal {
        let (digits, scale) = self.0.as_bigint_and_exponent();
        BigDecimal::new(digits, scale + decimals.as_u8() as i64).normalized()
    }
}

impl std::fmt::Display for Share {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Drop positions that should not participate in an allocation
///
/// Keeps only positions whose balance is positive and strictly above
/// `threshold`. Dust balances are treated as non-participating, not as zero.
pub fn retain_material(positions: Vec<Position>, threshold: &BigDecimal) -> Vec<Position> {
    positions
        .into_iter()
        .filter(|p| p.is_material(threshold))
        .collect()
}

/// Allocate each group's rewardable TVL across `positions`
///
/// Returns one share per position, in input order.
///
/// # Errors
///
/// - [`AllocationError::NegativeBalance`] if any position has a negative balance
/// - [`AllocationError::InvalidTotal`] if any total is negative or fractional
pub fn allocate(
    positions: &[Position],
    totals: &CategoryTotals,
    groups: &CategoryGroups,
) -> Result<Vec<Share>, AllocationError> {
    let span = spans::allocate(positions.len());
    let _guard = span.enter();

    validate(positions, totals)?;

    let mut shares = vec![BigDecimal::zero(); positions.len()];

    for group in groups.resolve() {
        let members: Vec<usize> = positions
            .iter()
            .enumerate()
            .filter(|(_, p)| group.contains(p.category))
            .map(|(i, _)| i)
            .collect();
        if members.is_empty() {
            continue;
        }

        let group_total = totals.group_total(&group);
        let group_balance = members
            .iter()
            .fold(BigDecimal::zero(), |acc, &i| acc + &positions[i].raw_balance);

        if group_balance.is_zero() {
            debug!(group = %group, "Group holds no balance, all shares zero");
            continue;
        }

        for &i in &members {
            let numerator = &group_total * &positions[i].raw_balance;
            shares[i] = div_round_half_even(&numerator, &group_balance);
        }

        let allocated = members
            .iter()
            .fold(BigDecimal::zero(), |acc, &i| acc + &shares[i]);
        let diff = &group_total - &allocated;
        if !diff.is_zero() {
            debug!(group = %group, diff = %diff, "Correcting rounding drift");
            apply_correction(&mut shares, &members, diff);
        }
    }

    Ok(shares.into_iter().map(Share).collect())
}

/// Check that every group holding a balance was allocated exactly its total
///
/// # Errors
///
/// Returns [`AllocationError::LengthMismatch`] unless there is exactly one
/// share per position, and [`AllocationError::Unreconciled`] for the first
/// group that is off.
pub fn verify_reconciliation(
    positions: &[Position],
    shares: &[Share],
    totals: &CategoryTotals,
    groups: &CategoryGroups,
) -> Result<(), AllocationError> {
    if positions.len() != shares.len() {
        return Err(AllocationError::LengthMismatch {
            positions: positions.len(),
            shares: shares.len(),
        });
    }
    for group in groups.resolve() {
        let mut balance = BigDecimal::zero();
        let mut allocated = BigDecimal::zero();
        for (position, share) in positions.iter().zip(shares) {
            if group.contains(position.category) {
                balance += &position.raw_balance;
                allocated += share.amount();
            }
        }
        if balance.is_zero() {
            continue;
        }
        let expected = totals.group_total(&group);
        if allocated != expected {
            return Err(AllocationError::Unreconciled {
                group: group.to_string(),
                allocated,
                expected,
            });
        }
    }
    Ok(())
}

fn validate(positions: &[Position], totals: &CategoryTotals) -> Result<(), AllocationError> {
    if let Some((index, position)) = positions
        .iter()
        .enumerate()
        .find(|(_, p)| p.raw_balance.is_negative())
    {
        return Err(AllocationError::negative_balance(
            index,
            position.raw_balance.clone(),
        ));
    }
    for (category, total) in totals.iter() {
        if total.is_negative() || !total.is_integer() {
            return Err(AllocationError::invalid_total(category, total.clone()));
        }
    }
    Ok(())
}

/// Land `diff` on the largest share of the group
///
/// A negative `diff` larger than that share spills onto the next-largest shares
/// so that no share goes below zero.
fn apply_correction(shares: &mut [BigDecimal], members: &[usize], diff: BigDecimal) {
    // Stable sort keeps input order among equal shares
    let mut by_size = members.to_vec();
    by_size.sort_by(|&a, &b| shares[b].cmp(&shares[a]));

    if diff.is_positive() {
        shares[by_size[0]] += diff;
        return;
    }

    let mut remaining = -diff;
    for i in by_size {
        if remaining.is_zero() {
            break;
        }
        let take = if shares[i] < remaining {
            shares[i].clone()
        } else {
            remaining.clone()
        };
        shares[i] -= &take;
        remaining -= take;
    }
}
