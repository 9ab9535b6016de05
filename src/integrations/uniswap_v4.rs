// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Uniswap V4 liquidity positions
//!
//! V4 pools live inside one singleton PoolManager. Positions minted through the
//! position manager show up as `ModifyLiquidity` events whose `sender` is the
//! position manager and whose `salt` is the ERC-721 token id.
//!
//! # Example
//!
//! ```rust,ignore
//! use pointscan::{PointscanConfig, UniswapV4Integration};
//!
//! let v4 = UniswapV4Integration::from_config(&PointscanConfig::default());
//! let participants = v4.discover_participants(&source, &reader, head).await?;
//! for (user, token_ids) in &participants {
//!     let balance = v4.user_balance(&reader, *user, token_ids, head).await?;
//!     println!("{user}: {balance}");
//! }
//! ```

use std::collections::BTreeSet;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, BlockNumber, B256, U256};
use tracing::{info, Instrument};

use super::concentrated::{resolve_owners, ConcentratedLiquidity};
use super::Participants;
use crate::config::constants::uniswap_v4;
use crate::config::PointscanConfig;
use crate::errors::IntegrationError;
use crate::events::{fetch_events_chunked, ModifyLiquidity};
use crate::source::{EventLogSource, LiquidityPositionReader};
use crate::tracing::spans;
use crate::types::config::MaxBlockRange;
use crate::types::tokens::TokenDecimals;
use crate::valuation::PositionValuer;

#[derive(Debug, Clone)]
pub struct UniswapV4Integration {
    pool_manager: Address,
    position_manager: Address,
    pool_id: B256,
    scan_start_block: BlockNumber,
    max_block_range: MaxBlockRange,
    balances: ConcentratedLiquidity,
}

impl UniswapV4Integration {
    pub const NAME: &'static str = "uniswap_v4";

    pub fn new(
        pool_manager: Address,
        position_manager: Address,
        pool_id: B256,
        scan_start_block: BlockNumber,
        pool_start_block: BlockNumber,
        valuer: PositionValuer,
    ) -> Self {
        Self {
            pool_manager,
            position_manager,
            pool_id,
            scan_start_block,
            max_block_range: MaxBlockRange::DEFAULT,
            balances: ConcentratedLiquidity::new(Self::NAME, pool_start_block, valuer),
        }
    }

    /// The mainnet USDe/USDC pool (USDe is token0)
    pub fn usde_usdc() -> Self {
        Self::new(
            uniswap_v4::POOL_MANAGER,
            uniswap_v4::POSITION_MANAGER,
            uniswap_v4::USDE_USDC_POOL_ID,
            uniswap_v4::SCAN_START_BLOCK,
            uniswap_v4::USDE_USDC_POOL_START_BLOCK,
            PositionValuer::new(TokenDecimals::STANDARD, TokenDecimals::USDC),
        )
    }

    /// [`Self::usde_usdc`] paged with the configured mainnet block range
    pub fn from_config(config: &PointscanConfig) -> Self {
        Self::usde_usdc().with_max_block_range(config.get_max_block_range(NamedChain::Mainnet))
    }

    pub fn with_max_block_range(mut self, max_block_range: MaxBlockRange) -> Self {
        self.max_block_range = max_block_range;
        self
    }

    pub fn pool_id(&self) -> B256 {
        self.pool_id
    }

    pub fn start_block(&self) -> BlockNumber {
        self.balances.start_block()
    }

    /// Whether `event` is a position-manager change to the configured pool
    pub fn is_position_event(&self, event: &ModifyLiquidity) -> bool {
        event.id == self.pool_id && event.sender == self.position_manager
    }

    /// Every owner of a position in the pool as of `to_block`
    ///
    /// Scans `ModifyLiquidity` from the scan start block to `to_block` and
    /// resolves each token's owner at `to_block`. Tokens burned by then are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Fails if any log page cannot be fetched or decoded.
    pub async fn discover_participants<S, R>(
        &self,
        source: &S,
        reader: &R,
        to_block: BlockNumber,
    ) -> Result<Participants, IntegrationError>
    where
        S: EventLogSource + ?Sized,
        R: LiquidityPositionReader + ?Sized,
    {
        let span = spans::discover_participants(Self::NAME, self.scan_start_block, to_block);
        async {
            let events: Vec<ModifyLiquidity> = fetch_events_chunked(
                source,
                self.pool_manager,
                self.scan_start_block,
                to_block,
                self.max_block_range,
            )
            .await?;

            let token_ids: BTreeSet<U256> = events
                .iter()
                .filter(|event| self.is_position_event(event))
                .map(|event| U256::from_be_bytes(event.salt.0))
                .collect();

            let participants = resolve_owners(reader, token_ids.iter().copied(), to_block, &[]).await;
            info!(
                token_ids = token_ids.len(),
                participants = participants.len(),
                "Discovered Uniswap V4 participants"
            );
            Ok(participants)
        }
        .instrument(span)
        .await
    }

    /// Whole-token value of the positions in `token_ids` that `user` owns at `block`
    pub async fn user_balance<R>(
        &self,
        reader: &R,
        user: Address,
        token_ids: &BTreeSet<U256>,
        block: BlockNumber,
    ) -> Result<f64, IntegrationError>
    where
        R: LiquidityPositionReader + ?Sized,
    {
        self.balances.user_balance(reader, user, token_ids, block).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, aliases::I24, I256};

    fn event(id: B256, sender: Address, token_id: u64) -> ModifyLiquidity {
        ModifyLiquidity {
            id,
            sender,
            tickLower: I24::try_from(-10i32).unwrap(),
            tickUpper: I24::try_from(10i32).unwrap(),
            liquidityDelta: I256::ONE,
            salt: B256::from(U256::from(token_id)),
        }
    }

    #[test]
    fn test_position_event_filter() {
        let v4 = UniswapV4Integration::usde_usdc();
        let other_sender = address!("00000000000000000000000000000000000000aa");

        assert!(v4.is_position_event(&event(
            uniswap_v4::USDE_USDC_POOL_ID,
            uniswap_v4::POSITION_MANAGER,
            1
        )));
        assert!(!v4.is_position_event(&event(
            uniswap_v4::USDE_USDC_POOL_ID,
            other_sender,
            1
        )));
        assert!(!v4.is_position_event(&event(B256::ZERO, uniswap_v4::POSITION_MANAGER, 1)));
    }

    #[test]
    fn test_from_config_uses_mainnet_range() {
        let config = crate::config::PointscanConfigBuilder::new()
            .chain_max_block_range(NamedChain::Mainnet, 1900)
            .build();
        let v4 = UniswapV4Integration::from_config(&config);
        assert_eq!(v4.max_block_range, MaxBlockRange::new(1900));
        assert_eq!(v4.start_block(), uniswap_v4::USDE_USDC_POOL_START_BLOCK);
    }
}
