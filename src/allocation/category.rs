// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Position categories, per-category totals and allocation groups

use std::collections::{BTreeMap, BTreeSet};

use bigdecimal::BigDecimal;
use num_traits::Zero;
use serde::{Deserialize, Serialize};

use crate::errors::AllocationError;

/// Kind of position held in a Hyperdrive-style pool
///
/// The discriminant is the 8-bit prefix of the pool's ERC-1155 asset id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PositionCategory {
    Lp,
    Long,
    Short,
    WithdrawalShare,
}

impl PositionCategory {
    pub const ALL: [Self; 4] = [Self::Lp, Self::Long, Self::Short, Self::WithdrawalShare];

    pub const fn from_prefix(prefix: u8) -> Option<Self> {
        match prefix {
            0 => Some(Self::Lp),
            1 => Some(Self::Long),
            2 => Some(Self::Short),
            3 => Some(Self::WithdrawalShare),
            _ => None,
        }
    }

    pub const fn prefix(&self) -> u8 {
        match self {
            Self::Lp => 0,
            Self::Long => 1,
            Self::Short => 2,
            Self::WithdrawalShare => 3,
        }
    }
}

impl std::fmt::Display for PositionCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Lp => "LP",
            Self::Long => "LONG",
            Self::Short => "SHORT",
            Self::WithdrawalShare => "WITHDRAWAL_SHARE",
        };
        f.write_str(name)
    }
}

/// Rewardable TVL per category for one snapshot block
///
/// Categories without an entry have a total of zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryTotals(BTreeMap<PositionCategory, BigDecimal>);

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, category: PositionCategory, total: impl Into<BigDecimal>) -> Self {
        self.insert(category, total);
        self
    }

    pub fn insert(&mut self, category: PositionCategory, total: impl Into<BigDecimal>) {
        self.0.insert(category, total.into());
    }

    pub fn get(&self, category: PositionCategory) -> Option<&BigDecimal> {
        self.0.get(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = (PositionCategory, &BigDecimal)> {
        self.0.iter().map(|(category, total)| (*category, total))
    }

    /// Sum of the totals of every category in `group`
    pub fn group_total(&self, group: &AllocationGroup) -> BigDecimal {
        group
            .iter()
            .filter_map(|category| self.get(category))
            .fold(BigDecimal::zero(), |acc, total| acc + total)
    }
}

/// Categories that share one rewardable total
///
/// LP and withdrawal shares are economically the same claim on a Hyperdrive
/// pool's liquidity, so they are apportioned together.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationGroup(BTreeSet<PositionCategory>);

impl AllocationGroup {
    pub fn new(categories: impl IntoIterator<Item = PositionCategory>) -> Self {
        Self(categories.into_iter().collect())
    }

    pub fn single(category: PositionCategory) -> Self {
        Self::new([category])
    }

    pub fn contains(&self, category: PositionCategory) -> bool {
        self.0.contains(&category)
    }

    pub fn iter(&self) -> impl Iterator<Item = PositionCategory> + '_ {
        self.0.iter().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for AllocationGroup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

/// Grouping table used by the allocator
///
/// Any category not listed in a configured group is allocated on its own.
///
/// # Examples
///
/// ```rust
/// use pointscan::{AllocationGroup, CategoryGroups, PositionCategory};
///
/// let groups = CategoryGroups::hyperdrive();
/// assert_eq!(
///     groups.group_of(PositionCategory::WithdrawalShare),
///     AllocationGroup::new([PositionCategory::Lp, PositionCategory::WithdrawalShare])
/// );
/// assert_eq!(
///     groups.group_of(PositionCategory::Long),
///     AllocationGroup::single(PositionCategory::Long)
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryGroups {
    groups: Vec<AllocationGroup>,
}

impl CategoryGroups {
    /// Every category allocated on its own
    pub fn separate() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`AllocationError::OverlappingGroups`] if a category is listed twice.
    pub fn new(groups: impl IntoIterator<Item = AllocationGroup>) -> Result<Self, AllocationError> {
        let mut seen = BTreeSet::new();
        let mut out = Vec::new();
        for group in groups {
            if group.is_empty() {
                continue;
            }
            for category in group.iter() {
                if !seen.insert(category) {
                    return Err(AllocationError::OverlappingGroups { category });
                }
            }
            out.push(group);
        }
        Ok(Self { groups: out })
    }

    /// LP and withdrawal shares combined, shorts alone
    pub fn hyperdrive() -> Self {
        Self {
            groups: vec![
                AllocationGroup::new([PositionCategory::Lp, PositionCategory::WithdrawalShare]),
                AllocationGroup::single(PositionCategory::Short),
            ],
        }
    }

    /// Group containing `category`
    pub fn group_of(&self, category: PositionCategory) -> AllocationGroup {
        self.groups
            .iter()
            .find(|group| group.contains(category))
            .cloned()
            .unwrap_or_else(|| AllocationGroup::single(category))
    }

    /// Configured groups followed by a singleton group for every unlisted category
    pub fn resolve(&self) -> Vec<AllocationGroup> {
        let mut resolved = self.groups.clone();
        for category in PositionCategory::ALL {
            if !self.groups.iter().any(|group| group.contains(category)) {
                resolved.push(AllocationGroup::single(category));
            }
        }
        resolved
    }
}
