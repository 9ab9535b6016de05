// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Well-known addresses and constants
//!
//! Deployed contracts and protocol parameters used by the bundled integrations.
//! Nothing here is read implicitly; integrations take these as constructor
//! arguments so tests and other deployments can substitute their own.

use alloy_primitives::{address, b256, Address, BlockNumber, B256};

/// Uniswap V4 on Ethereum mainnet
pub mod uniswap_v4 {
    use super::*;

    /// Singleton PoolManager emitting `ModifyLiquidity`
    pub const POOL_MANAGER: Address = address!("000000000004444c5dc75cb358380d2e3de08a90");

    /// Position manager (ERC-721 positions)
    pub const POSITION_MANAGER: Address = address!("bd216513d74c8cf14cf4747e6aaa6420ff64ee9e");

    /// USDe/USDC pool id
    pub const USDE_USDC_POOL_ID: B256 =
        b256!("63bb22f47c7ede6578a25c873e77eb782ec8e4c19778e36ce64d37877b5bd1e7");

    /// Block the USDe/USDC pool was created at; balances before it are zero
    pub const USDE_USDC_POOL_START_BLOCK: BlockNumber = 23_067_966;

    /// First block scanned for `ModifyLiquidity` events
    pub const SCAN_START_BLOCK: BlockNumber = 21_688_329;
}

/// Thruster on Blast
pub mod thruster {
    use super::*;

    /// USDe pool
    pub const USDE_POOL: Address = address!("8c1bb76510d6873a4a156a9cb394e74a3783bdb5");

    /// Non-fungible position manager emitting `IncreaseLiquidity`
    pub const POSITION_MANAGER: Address = address!("434575eaea081b735c985fa9bf63cd7b87e227f9");

    /// Hyperlock deposit contract; positions it holds are rewarded through Hyperlock
    pub const HYPERLOCK_DEPOSIT: Address = address!("c28effdfef75448243c1d9ba972b97e32df60d06");

    /// Juice USDe vault
    pub const JUICE_USDE_VAULT: Address = address!("c1b1ae2502d2cdef4772fb4a4a6fcbf4fd9c1b80");

    /// Particle leveraged pool; excluded from direct rewards
    pub const PARTICLE_LEVERAGED_POOL: Address =
        address!("121b5ac4de4a3e6f4171956bc26ceda40cb61a56");

    /// Juice's position, rewarded through Juice's own API
    pub const JUICE_TOKEN_ID: u64 = 111_969;

    /// Positions with a bound further than this from tick zero are ignored
    pub const MAX_TICK_RANGE: u32 = 7_000;

    /// Block the USDe pool was deployed at
    pub const USDE_POOL_START_BLOCK: BlockNumber = 4_025_647;
}

/// Hyperdrive on Ethereum mainnet
pub mod hyperdrive {
    use super::*;

    /// Balances at or below this many base units are dust
    pub const MATERIALITY_THRESHOLD: u64 = 1;
}
