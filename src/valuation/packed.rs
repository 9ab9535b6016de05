// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Uniswap V4 position-manager `positionInfo` decoding
//!
//! The position manager packs each position into one word:
//!
//! ```text
//! | 200 bits            | 24 bits   | 24 bits   | 8 bits        |
//! | truncated pool id   | tickUpper | tickLower | hasSubscriber |
//! ```
//!
//! Both ticks are `int24` and must be sign-extended.

use alloy_primitives::{B256, FixedBytes, U256};
use serde::{Deserialize, Serialize};

use super::tick::TickRange;
use crate::errors::ValuationError;

const TICK_MASK: u64 = (1 << 24) - 1;
const TICK_LOWER_OFFSET: usize = 8;
const TICK_UPPER_OFFSET: usize = 32;
const POOL_ID_BYTES: usize = 25;

/// Packed `positionInfo` word as returned by the V4 position manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackedPositionInfo(U256);

impl PackedPositionInfo {
    pub const fn new(word: U256) -> Self {
        Self(word)
    }

    /// Pack fields into a word, the inverse of the accessors below
    pub fn encode(pool_id: B256, tick_lower: i32, tick_upper: i32, has_subscriber: bool) -> Self {
        let mut bytes = [0u8; 32];
        bytes[..POOL_ID_BYTES].copy_from_slice(&pool_id[..POOL_ID_BYTES]);
        let mut word = U256::from_be_bytes(bytes);
        word |= U256::from(tick_lower as u32 as u64 & TICK_MASK) << TICK_LOWER_OFFSET;
        word |= U256::from(tick_upper as u32 as u64 & TICK_MASK) << TICK_UPPER_OFFSET;
        if has_subscriber {
            word |= U256::from(1u8);
        }
        Self(word)
    }

    pub const fn as_u256(&self) -> U256 {
        self.0
    }

    pub fn has_subscriber(&self) -> bool {
        self.0.as_limbs()[0] & 0xff != 0
    }

    pub fn tick_lower(&self) -> i32 {
        self.int24_at(TICK_LOWER_OFFSET)
    }

    pub fn tick_upper(&self) -> i32 {
        self.int24_at(TICK_UPPER_OFFSET)
    }

    /// First 25 bytes of the pool id the position belongs to
    pub fn pool_id_prefix(&self) -> FixedBytes<25> {
        let bytes = self.0.to_be_bytes::<32>();
        FixedBytes::from_slice(&bytes[..POOL_ID_BYTES])
    }

    /// Whether the position belongs to `pool_id`
    pub fn matches_pool(&self, pool_id: B256) -> bool {
        self.pool_id_prefix().as_slice() == &pool_id[..POOL_ID_BYTES]
    }

    /// Decoded tick range
    ///
    /// # Errors
    ///
    /// Returns [`ValuationError::InvertedRange`] if the word encodes `tickLower > tickUpper`.
    pub fn tick_range(&self) -> Result<TickRange, ValuationError> {
        TickRange::new(self.tick_lower(), self.tick_upper())
    }

    fn int24_at(&self, offset: usize) -> i32 {
        let raw = ((self.0 >> offset).as_limbs()[0] & TICK_MASK) as u32;
        // Shift the sign bit of the int24 into bit 31, then arithmetic-shift back
        ((raw << 8) as i32) >> 8
    }
}

impl From<U256> for PackedPositionInfo {
    fn from(value: U256) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::b256;

    const USDE_USDC_POOL: B256 =
        b256!("63bb22f47c7ede6578a25c873e77eb782ec8e4c19778e36ce64d37877b5bd1e7");

    #[test]
    fn test_decodes_negative_ticks() {
        let info = PackedPositionInfo::encode(USDE_USDC_POOL, -276_330, -276_300, false);
        assert_eq!(info.tick_lower(), -276_330);
        assert_eq!(info.tick_upper(), -276_300);
        assert!(!info.has_subscriber());
    }

    #[test]
    fn test_decodes_extreme_ticks() {
        let info = PackedPositionInfo::encode(B256::ZERO, -887_272, 887_272, true);
        assert_eq!(info.tick_lower(), -887_272);
        assert_eq!(info.tick_upper(), 887_272);
        assert!(info.has_subscriber());
    }

    #[test]
    fn test_decodes_raw_word() {
        // tickLower = -1 (0xffffff), tickUpper = 10, subscriber flag set
        let word = (U256::from(10u64) << 32) | (U256::from(0xff_ffffu64) << 8) | U256::from(1u8);
        let info = PackedPositionInfo::new(word);
        assert_eq!(info.tick_lower(), -1);
        assert_eq!(info.tick_upper(), 10);
        assert!(info.has_subscriber());
        assert_eq!(info.tick_range().unwrap(), TickRange::new(-1, 10).unwrap());
    }

    #[test]
    fn test_pool_id_prefix() {
        let info = PackedPositionInfo::encode(USDE_USDC_POOL, -10, 10, false);
        assert!(info.matches_pool(USDE_USDC_POOL));
        assert!(!info.matches_pool(B256::ZERO));
        assert_eq!(info.pool_id_prefix().as_slice(), &USDE_USDC_POOL[..25]);
    }

    #[test]
    fn test_inverted_range_is_reported() {
        let info = PackedPositionInfo::encode(B256::ZERO, 50, -50, false);
        assert!(info.tick_range().is_err());
    }
}
