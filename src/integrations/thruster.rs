// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Thruster liquidity positions on Blast
//!
//! Thruster's position manager emits `IncreaseLiquidity` with the pool address,
//! so one scan of the manager covers every pool. Some positions are rewarded
//! elsewhere and never reported here:
//!
//! - the Juice vault's position ([`thruster::JUICE_TOKEN_ID`])
//! - positions deposited into Hyperlock
//! - positions held by Particle's leveraged pool or the Juice vault
//!
//! Positions with a bound more than [`thruster::MAX_TICK_RANGE`] ticks from zero
//! are valued at zero.

use std::collections::BTreeSet;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, BlockNumber, U256};
use tracing::{debug, info, Instrument};

use super::concentrated::{resolve_owners, ConcentratedLiquidity};
use super::Participants;
use crate::config::constants::thruster;
use crate::config::PointscanConfig;
use crate::errors::IntegrationError;
use crate::events::{fetch_events_chunked, IncreaseLiquidity};
use crate::source::{EventLogSource, LiquidityPositionReader};
use crate::tracing::spans;
use crate::types::config::MaxBlockRange;
use crate::types::tokens::TokenDecimals;
use crate::valuation::PositionValuer;

#[derive(Debug, Clone)]
pub struct ThrusterIntegration {
    pool: Address,
    position_manager: Address,
    excluded_token_ids: Vec<U256>,
    excluded_owners: Vec<Address>,
    max_block_range: MaxBlockRange,
    balances: ConcentratedLiquidity,
}

impl ThrusterIntegration {
    pub const NAME: &'static str = "thruster";

    /// No exclusions; use [`Self::excluding_token_id`] and [`Self::excluding_owner`]
    pub fn new(
        pool: Address,
        position_manager: Address,
        start_block: BlockNumber,
        valuer: PositionValuer,
    ) -> Self {
        Self {
            pool,
            position_manager,
            excluded_token_ids: Vec::new(),
            excluded_owners: Vec::new(),
            max_block_range: MaxBlockRange::MODERATE,
            balances: ConcentratedLiquidity::new(Self::NAME, start_block, valuer),
        }
    }

    /// The USDe pool with its standard exclusions
    pub fn usde() -> Self {
        let valuer = PositionValuer::new(TokenDecimals::STANDARD, TokenDecimals::STANDARD)
            .with_max_tick_magnitude(thruster::MAX_TICK_RANGE);
        Self::new(
            thruster::USDE_POOL,
            thruster::POSITION_MANAGER,
            thruster::USDE_POOL_START_BLOCK,
            valuer,
        )
        .excluding_token_id(U256::from(thruster::JUICE_TOKEN_ID))
        .excluding_owner(thruster::HYPERLOCK_DEPOSIT)
        .excluding_owner(thruster::PARTICLE_LEVERAGED_POOL)
        .excluding_owner(thruster::JUICE_USDE_VAULT)
    }

    /// [`Self::usde`] paged with the configured Blast block range
    pub fn from_config(config: &PointscanConfig) -> Self {
        Self::usde().with_max_block_range(config.get_max_block_range(NamedChain::Blast))
    }

    pub fn with_max_block_range(mut self, max_block_range: MaxBlockRange) -> Self {
        self.max_block_range = max_block_range;
        self
    }

    pub fn excluding_token_id(mut self, token_id: U256) -> Self {
        self.excluded_token_ids.push(token_id);
        self
    }

    pub fn excluding_owner(mut self, owner: Address) -> Self {
        self.excluded_owners.push(owner);
        self
    }

    pub fn pool(&self) -> Address {
        self.pool
    }

    pub fn start_block(&self) -> BlockNumber {
        self.balances.start_block()
    }

    /// Whether `event` is a deposit into the configured pool that is rewarded here
    pub fn is_rewarded_deposit(&self, event: &IncreaseLiquidity) -> bool {
        event.pool == self.pool && !self.excluded_token_ids.contains(&event.tokenId)
    }

    /// Every owner of a position in the pool as of `to_block`
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
        let from_block = self.balances.start_block();
        let span = spans::discover_participants(Self::NAME, from_block, to_block);
        async {
            let events: Vec<IncreaseLiquidity> = fetch_events_chunked(
                source,
                self.position_manager,
                from_block,
                to_block,
                self.max_block_range,
            )
            .await?;

            let mut token_ids = BTreeSet::new();
            for event in &events {
                if self.is_rewarded_deposit(event) {
                    token_ids.insert(event.tokenId);
                } else if event.pool == self.pool {
                    debug!(token_id = %event.tokenId, "Skipping excluded token id");
                }
            }

            let participants = resolve_owners(
                reader,
                token_ids.iter().copied(),
                to_block,
                &self.excluded_owners,
            )
            .await;
            info!(
                token_ids = token_ids.len(),
                participants = participants.len(),
                "Discovered Thruster participants"
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
