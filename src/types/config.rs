// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types for configuration values
//!
//! These types keep paging parameters from being confused with block numbers.

use serde::{Deserialize, Serialize};

/// Maximum number of blocks requested from an event log source in one call
///
/// Participant discovery walks from an integration's start block to the
/// snapshot block; this bounds each page of that walk.
///
/// # Examples
///
/// ```
/// use pointscan::MaxBlockRange;
///
/// let range = MaxBlockRange::new(1000);
/// let pages: Vec<_> = range.chunk_range(0, 2500).collect();
/// assert_eq!(pages, vec![(0, 999), (1000, 1999), (2000, 2500)]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MaxBlockRange(u64);

impl MaxBlockRange {
    /// Page size used for Ethereum mainnet pool-manager scans
    pub const DEFAULT: Self = Self(1000);

    /// Page size used for Thruster scans on Blast
    pub const MODERATE: Self = Self(2000);

    /// Create a new max block range. A zero range is bumped to one block.
    pub const fn new(blocks: u64) -> Self {
        if blocks == 0 {
            Self(1)
        } else {
            Self(blocks)
        }
    }

    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Number of pages needed to cover `start..=end`
    pub fn chunks_needed(&self, start: u64, end: u64) -> usize {
        if end < start {
            return 0;
        }
        (end - start + 1).div_ceil(self.0) as usize
    }

    /// Split `start..=end` into inclusive `(from, to)` pages
    pub fn chunk_range(&self, start: u64, end: u64) -> ChunkIterator {
        ChunkIterator {
            current: start,
            end,
            chunk_size: self.0,
            done: end < start,
        }
    }
}

impl Default for MaxBlockRange {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<u64> for MaxBlockRange {
    fn from(value: u64) -> Self {
        Self::new(value)
    }
}

impl std::fmt::Display for MaxBlockRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} blocks", self.0)
    }
}

/// Iterator over inclusive block pages, created by [`MaxBlockRange::chunk_range`]
#[derive(Debug, Clone)]
pub struct ChunkIterator {
    current: u64,
    end: u64,
    chunk_size: u64,
    done: bool,
}

impl Iterator for ChunkIterator {
    type Item = (u64, u64);

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let chunk_start = self.current;
        let chunk_end = chunk_start
            .saturating_add(self.chunk_size - 1)
            .min(self.end);

        // u64::MAX as an end block would otherwise overflow the cursor
        if chunk_end == self.end {
            self.done = true;
        } else {
            self.current = chunk_end + 1;
        }

        Some((chunk_start, chunk_end))
    }
}
