// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Protocol integrations
//!
//! Each integration discovers its participants from event logs and reports a
//! per-user balance at a snapshot block. All chain access goes through the
//! collaborator traits in [`crate::source`].
//!
//! - [`uniswap_v4`]: USDe liquidity in a Uniswap V4 pool
//! - [`thruster`]: USDe liquidity in a Thruster (Uniswap V3 style) pool on Blast
//! - [`hyperdrive`]: LP, short and withdrawal-share positions in a Hyperdrive pool

pub mod concentrated;
pub mod hyperdrive;
pub mod thruster;
pub mod uniswap_v4;

use std::collections::{BTreeMap, BTreeSet};

use alloy_primitives::{Address, U256};

pub use concentrated::ConcentratedLiquidity;
pub use hyperdrive::{HyperdriveIntegration, HyperdriveParticipants, HyperdriveSnapshot, PoolTvl};
pub use thruster::ThrusterIntegration;
pub use uniswap_v4::UniswapV4Integration;

/// Position owners and the NFT token ids each one holds
pub type Participants = BTreeMap<Address, BTreeSet<U256>>;
