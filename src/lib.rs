// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! pointscan: rewardable balances for DeFi liquidity positions
//!
//! - [`valuation`]: token amounts held by a concentrated-liquidity position
//! - [`allocation`]: exact proportional split of a pool's rewardable TVL
//! - [`integrations`]: participant discovery and per-user balances for
//!   Uniswap V4, Thruster and Hyperdrive pools
//!
//! Chain access is supplied by the caller through the traits in [`source`].

pub mod allocation;
pub mod config;
pub mod errors;
pub mod events;
pub mod integrations;
pub mod source;
mod tracing;
pub mod types;
pub mod valuation;

pub use allocation::{
    allocate, retain_material, verify_reconciliation, AllocationGroup, AssetId, CategoryGroups,
    CategoryTotals, Position, PositionCategory, Share,
};
pub use config::{ChainConfig, PointscanConfig, PointscanConfigBuilder};
pub use errors::{AllocationError, IntegrationError, PointscanError, SourceError, ValuationError};
pub use events::{fetch_events_chunked, IncreaseLiquidity, ModifyLiquidity, TransferSingle};
pub use integrations::{
    ConcentratedLiquidity, HyperdriveIntegration, HyperdriveParticipants, HyperdriveSnapshot,
    Participants, PoolTvl, ThrusterIntegration, UniswapV4Integration,
};
pub use source::{EventLogSource, LiquidityPositionReader, MultiTokenReader};
pub use types::config::{ChunkIterator, MaxBlockRange};
pub use types::tokens::{TokenAmount, TokenDecimals};
pub use valuation::{
    sqrt_ratio_at_tick, tick_at_sqrt_ratio, value_position, LiquidityPosition, PackedPositionInfo,
    PoolState, PositionValuer, TickRange, TokenPair, MAX_TICK, MIN_TICK,
};
