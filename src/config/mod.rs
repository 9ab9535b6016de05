// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Configuration for pointscan operations
//!
//! Controls event-scan paging, the dust threshold for allocation inputs and the
//! allocator's category grouping table.
//!
//! # Example: Using defaults
//!
//! ```rust
//! use pointscan::PointscanConfig;
//!
//! let config = PointscanConfig::default();
//! ```
//!
//! # Example: Custom configuration
//!
//! ```rust
//! use alloy_chains::NamedChain;
//! use pointscan::{MaxBlockRange, PointscanConfigBuilder};
//!
//! let config = PointscanConfigBuilder::with_defaults()
//!     .chain_max_block_range(NamedChain::Mainnet, 1900)
//!     .build();
//! assert_eq!(config.get_max_block_range(NamedChain::Mainnet), MaxBlockRange::new(1900));
//! ```

use std::collections::HashMap;

use alloy_chains::NamedChain;
use bigdecimal::BigDecimal;

use crate::allocation::CategoryGroups;
use crate::types::config::MaxBlockRange;

pub mod constants;

/// Configuration for pointscan operations
///
/// Use [`PointscanConfigBuilder`] for a fluent API to construct instances.
#[derive(Debug, Clone)]
pub struct PointscanConfig {
    /// Blocks per event-source request
    /// Default: 1000
    pub max_block_range: MaxBlockRange,

    /// Balances at or below this are excluded from allocation
    /// Default: 1 base unit
    pub materiality_threshold: BigDecimal,

    /// Which categories share a rewardable total
    /// Default: LP with withdrawal shares, shorts alone
    pub category_groups: CategoryGroups,

    /// Chain-specific overrides
    pub chain_overrides: HashMap<NamedChain, ChainConfig>,
}

/// Chain-specific configuration overrides
#[derive(Debug, Clone, Default)]
pub struct ChainConfig {
    /// Override max block range for this chain
    pub max_block_range: Option<MaxBlockRange>,
}

impl Default for PointscanConfig {
    fn default() -> Self {
        Self::with_common_defaults()
    }
}

impl PointscanConfig {
    /// Defaults matching the bundled integrations
    ///
    /// Blast scans in 2000-block pages; every other chain uses 1000.
    pub fn with_common_defaults() -> Self {
        let mut config = Self::minimal();
        config.set_chain_override(
            NamedChain::Blast,
            ChainConfig {
                max_block_range: Some(MaxBlockRange::MODERATE),
            },
        );
        config
    }

    /// No chain overrides
    pub fn minimal() -> Self {
        Self {
            max_block_range: MaxBlockRange::DEFAULT,
            materiality_threshold: BigDecimal::from(
                constants::hyperdrive::MATERIALITY_THRESHOLD,
            ),
            category_groups: CategoryGroups::hyperdrive(),
            chain_overrides: HashMap::new(),
        }
    }

    /// Effective max block range for `chain`
    ///
    /// ```rust
    /// use alloy_chains::NamedChain;
    /// use pointscan::{MaxBlockRange, PointscanConfig};
    ///
    /// let config = PointscanConfig::default();
    /// assert_eq!(config.get_max_block_range(NamedChain::Blast), MaxBlockRange::new(2000));
    /// assert_eq!(config.get_max_block_range(NamedChain::Mainnet), MaxBlockRange::new(1000));
    /// ```
    pub fn get_max_block_range(&self, chain: NamedChain) -> MaxBlockRange {
        self.chain_overrides
            .get(&chain)
            .and_then(|c| c.max_block_range)
            .unwrap_or(self.max_block_range)
    }

    pub fn set_chain_override(&mut self, chain: NamedChain, config: ChainConfig) {
        self.chain_overrides.insert(chain, config);
    }
}

/// Builder for [`PointscanConfig`]
pub struct PointscanConfigBuilder {
    config: PointscanConfig,
}

impl Default for PointscanConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PointscanConfigBuilder {
    /// Start from [`PointscanConfig::minimal`]
    pub fn new() -> Self {
        Self {
            config: PointscanConfig::minimal(),
        }
    }

    /// Start from [`PointscanConfig::with_common_defaults`]
    pub fn with_defaults() -> Self {
        Self {
            config: PointscanConfig::with_common_defaults(),
        }
    }

    pub fn max_block_range(mut self, max: u64) -> Self {
        self.config.max_block_range = MaxBlockRange::new(max);
        self
    }

    pub fn chain_max_block_range(mut self, chain: NamedChain, max: u64) -> Self {
        self.config
            .chain_overrides
            .entry(chain)
            .or_default()
            .max_block_range = Some(MaxBlockRange::new(max));
        self
    }

    pub fn chain_config(mut self, chain: NamedChain, config: ChainConfig) -> Self {
        self.config.set_chain_override(chain, config);
        self
    }

    pub fn materiality_threshold(mut self, threshold: impl Into<BigDecimal>) -> Self {
        self.config.materiality_threshold = threshold.into();
        self
    }

    pub fn category_groups(mut self, groups: CategoryGroups) -> Self {
        self.config.category_groups = groups;
        self
    }

    pub fn build(self) -> PointscanConfig {
        self.config
    }
}
