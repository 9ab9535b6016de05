// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Hyperdrive ERC-1155 asset ids
//!
//! ```text
//! | 8 bits | 248 bits                   |
//! | prefix | maturity (unix timestamp)  |
//! ```
//!
//! The prefix selects the [`PositionCategory`]. LP shares use a zero timestamp.

use alloy_primitives::U256;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::PositionCategory;

const PREFIX_SHIFT: usize = 248;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AssetId(U256);

impl AssetId {
    pub const fn new(id: U256) -> Self {
        Self(id)
    }

    pub fn encode(category: PositionCategory, maturity: u64) -> Self {
        Self((U256::from(category.prefix()) << PREFIX_SHIFT) | U256::from(maturity))
    }

    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn prefix(&self) -> u8 {
        (self.0 >> PREFIX_SHIFT).as_limbs()[0] as u8
    }

    /// Lower 248 bits
    pub fn timestamp(&self) -> U256 {
        let mask = (U256::from(1u8) << PREFIX_SHIFT) - U256::from(1u8);
        self.0 & mask
    }

    /// `None` for prefixes outside the known set
    pub fn category(&self) -> Option<PositionCategory> {
        PositionCategory::from_prefix(self.prefix())
    }

    /// Maturity as a UTC datetime, `None` if the timestamp is out of range
    pub fn maturity(&self) -> Option<DateTime<Utc>> {
        let secs: i64 = self.timestamp().try_into().ok()?;
        DateTime::from_timestamp(secs, 0)
    }
}

impl From<U256> for AssetId {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for AssetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_decodes_prefix_and_timestamp() {
        let id = AssetId::encode(PositionCategory::Short, 1_735_689_600);
        assert_eq!(id.prefix(), 2);
        assert_eq!(id.category(), Some(PositionCategory::Short));
        assert_eq!(id.timestamp(), U256::from(1_735_689_600u64));
        assert_eq!(
            id.maturity(),
            Some(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_lp_asset_id_is_zero() {
        let id = AssetId::encode(PositionCategory::Lp, 0);
        assert_eq!(id.as_u256(), U256::ZERO);
        assert_eq!(id.category(), Some(PositionCategory::Lp));
    }

    #[test]
    fn test_withdrawal_share_prefix_is_top_byte() {
        let id = AssetId::new(U256::from(3u8) << 248);
        assert_eq!(id.category(), Some(PositionCategory::WithdrawalShare));
        assert_eq!(id.timestamp(), U256::ZERO);
    }

    #[test]
    fn test_unknown_prefix() {
        let id = AssetId::new(U256::from(0xffu8) << 248);
        assert_eq!(id.category(), None);
        assert_eq!(id.prefix(), 0xff);
    }

    #[test]
    fn test_maturity_out_of_range() {
        let id = AssetId::new(U256::from(1u8) << 200);
        assert_eq!(id.maturity(), None);
    }
}
