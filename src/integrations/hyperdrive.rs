// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Hyperdrive fixed-rate pool positions
//!
//! A Hyperdrive pool tracks positions as ERC-1155 balances. Rewards follow the
//! pool's vault shares:
//!
//! - shorts are backed by `shorts_outstanding` vault shares
//! - LPs and withdrawal-share holders split the rest
//! - longs earn nothing
//!
//! A snapshot reads every (participant, asset id) balance at one block and
//! apportions those two totals with [`crate::allocate`]. Balances of
//! [`HyperdriveIntegration::materiality_threshold`] or less are ignored.
//!
//! # Example
//!
//! ```rust,ignore
//! use pointscan::{HyperdriveIntegration, PointscanConfig};
//!
//! let hyperdrive = HyperdriveIntegration::from_config(pool, deployed_at, &PointscanConfig::default());
//! let participants = hyperdrive.discover_participants(&source, head).await?;
//! let snapshot = hyperdrive.snapshot(&reader, &participants, head).await?;
//! for user in &participants.users {
//!     println!("{user}: {}", snapshot.user_balance(*user));
//! }
//! ```

use std::collections::BTreeSet;

use alloy_chains::NamedChain;
use alloy_primitives::{Address, BlockNumber};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use num_traits::Zero;
use serde::{Deserialize, Serialize};
use tracing::{info, warn, Instrument};

use crate::allocation::{
    allocate, verify_reconciliation, AssetId, CategoryGroups, CategoryTotals, Position,
    PositionCategory, Share,
};
use crate::config::PointscanConfig;
use crate::errors::IntegrationError;
use crate::events::{fetch_events_chunked, TransferSingle};
use crate::source::{EventLogSource, MultiTokenReader};
use crate::tracing::spans;
use crate::types::config::MaxBlockRange;
use crate::types::tokens::{TokenAmount, TokenDecimals};

/// Vault-share holdings of a Hyperdrive pool at one block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolTvl {
    /// Vault shares held by the pool
    pub vault_shares: TokenAmount,
    /// Vault shares backing open shorts
    pub shorts_outstanding: TokenAmount,
}

impl PoolTvl {
    pub fn new(vault_shares: impl Into<TokenAmount>, shorts_outstanding: impl Into<TokenAmount>) -> Self {
        Self {
            vault_shares: vault_shares.into(),
            shorts_outstanding: shorts_outstanding.into(),
        }
    }

    /// Vault shares attributable to LPs and withdrawal shares
    pub fn lp_rewardable(&self) -> TokenAmount {
        self.vault_shares.saturating_sub(self.shorts_outstanding)
    }

    pub fn short_rewardable(&self) -> TokenAmount {
        self.shorts_outstanding
    }

    /// Allocator totals: LP and short rewardable TVL
    ///
    /// ```rust
    /// use bigdecimal::BigDecimal;
    /// use pointscan::{PoolTvl, PositionCategory};
    ///
    /// let totals = PoolTvl::new(1_000u64, 250u64).category_totals();
    /// assert_eq!(totals.get(PositionCategory::Lp), Some(&BigDecimal::from(750)));
    /// assert_eq!(totals.get(PositionCategory::Short), Some(&BigDecimal::from(250)));
    /// assert_eq!(totals.get(PositionCategory::Long), None);
    /// ```
    pub fn category_totals(&self) -> CategoryTotals {
        CategoryTotals::new()
            .with(PositionCategory::Lp, self.lp_rewardable().as_bigdecimal())
            .with(PositionCategory::Short, self.short_rewardable().as_bigdecimal())
    }
}

/// Everyone who has received a pool position and every asset id ever issued
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperdriveParticipants {
    pub users: BTreeSet<Address>,
    pub asset_ids: BTreeSet<AssetId>,
}

impl HyperdriveParticipants {
    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Record a transfer's recipient and asset id
    ///
    /// Burns (transfers to the zero address) add the asset id only.
    pub fn record(&mut self, transfer: &TransferSingle) {
        if transfer.to != Address::ZERO {
            self.users.insert(transfer.to);
        }
        self.asset_ids.insert(AssetId::new(transfer.id));
    }
}

/// One material position and its allocated share
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewardedPosition {
    pub owner: Address,
    pub asset_id: AssetId,
    pub category: PositionCategory,
    pub raw_balance: BigDecimal,
    pub share: Share,
}

impl RewardedPosition {
    pub fn maturity(&self) -> Option<DateTime<Utc>> {
        self.asset_id.maturity()
    }
}

/// Allocated Hyperdrive positions at one block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HyperdriveSnapshot {
    pub block: BlockNumber,
    pub tvl: PoolTvl,
    pub positions: Vec<RewardedPosition>,
}

impl HyperdriveSnapshot {
    pub fn user_positions(&self, user: Address) -> impl Iterator<Item = &RewardedPosition> + '_ {
        self.positions.iter().filter(move |p| p.owner == user)
    }

    /// Sum of `user`'s shares in whole vault-share units
    pub fn user_balance(&self, user: Address) -> BigDecimal {
        self.user_positions(user)
            .fold(BigDecimal::zero(), |acc, p| {
                acc + p.share.normalize(TokenDecimals::STANDARD)
            })
            .normalized()
    }

    /// Sum of every share, in base units
    pub fn total_allocated(&self) -> BigDecimal {
        self.positions
            .iter()
            .fold(BigDecimal::zero(), |acc, p| acc + p.share.amount())
    }
}

#[derive(Debug, Clone)]
pub struct HyperdriveIntegration {
    pool: Address,
    start_block: BlockNumber,
    max_block_range: MaxBlockRange,
    materiality_threshold: BigDecimal,
    category_groups: CategoryGroups,
}

impl HyperdriveIntegration {
    pub const NAME: &'static str = "hyperdrive";

    /// `pool` deployed at `start_block`, with [`PointscanConfig::minimal`] settings
    pub fn new(pool: Address, start_block: BlockNumber) -> Self {
        Self::from_config(pool, start_block, &PointscanConfig::minimal())
    }

    /// Uses the mainnet block range, materiality threshold and category groups
    /// from `config`
    pub fn from_config(pool: Address, start_block: BlockNumber, config: &PointscanConfig) -> Self {
        Self {
            pool,
            start_block,
            max_block_range: config.get_max_block_range(NamedChain::Mainnet),
            materiality_threshold: config.materiality_threshold.clone(),
            category_groups: config.category_groups.clone(),
        }
    }

    pub fn pool(&self) -> Address {
        self.pool
    }

    pub fn start_block(&self) -> BlockNumber {
        self.start_block
    }

    pub fn materiality_threshold(&self) -> &BigDecimal {
        &self.materiality_threshold
    }

    /// Recipients and asset ids of every `TransferSingle` up to `to_block`
    ///
    /// # Errors
    ///
    /// Fails if any log page cannot be fetched or decoded.
    pub async fn discover_participants<S>(
        &self,
        source: &S,
        to_block: BlockNumber,
    ) -> Result<HyperdriveParticipants, IntegrationError>
    where
        S: EventLogSource + ?Sized,
    {
        let span = spans::discover_participants(Self::NAME, self.start_block, to_block);
        async {
            let transfers: Vec<TransferSingle> = fetch_events_chunked(
                source,
                self.pool,
                self.start_block,
                to_block,
                self.max_block_range,
            )
            .await?;

            let mut participants = HyperdriveParticipants::default();
            for transfer in &transfers {
                participants.record(transfer);
            }
            info!(
                transfers = transfers.len(),
                users = participants.users.len(),
                asset_ids = participants.asset_ids.len(),
                "Discovered Hyperdrive participants"
            );
            Ok(participants)
        }
        .instrument(span)
        .await
    }

    /// Read every participant balance at `block` and allocate the pool's
    /// rewardable TVL across the material ones
    ///
    /// Asset ids with an unknown prefix are skipped.
    ///
    /// # Errors
    ///
    /// Fails if the pool TVL or any balance cannot be read, or if the
    /// allocator rejects the positions.
    pub async fn snapshot<R>(
        &self,
        reader: &R,
        participants: &HyperdriveParticipants,
        block: BlockNumber,
    ) -> Result<HyperdriveSnapshot, IntegrationError>
    where
        R: MultiTokenReader + ?Sized,
    {
        let span = spans::hyperdrive_snapshot(
            self.pool,
            block,
            participants.users.len(),
            participants.asset_ids.len(),
        );
        async {
            let tvl = reader.pool_tvl(block).await?;

            let known_ids: Vec<(AssetId, PositionCategory)> = participants
                .asset_ids
                .iter()
                .filter_map(|&asset_id| match asset_id.category() {
                    Some(category) => Some((asset_id, category)),
                    None => {
                        warn!(asset_id = %asset_id, "Unknown asset id prefix, skipping");
                        None
                    }
                })
                .collect();

            let reads = participants.users.iter().flat_map(|&owner| {
                known_ids.iter().map(move |&(asset_id, category)| async move {
                    let balance = reader.balance_of(asset_id, owner, block).await?;
                    Ok::<_, IntegrationError>((
                        asset_id,
                        Position::new(owner, category, balance.as_bigdecimal()),
                    ))
                })
            });
            let (asset_ids, positions): (Vec<AssetId>, Vec<Position>) = try_join_all(reads)
                .await?
                .into_iter()
                .filter(|(_, position)| position.is_material(&self.materiality_threshold))
                .unzip();

            let totals = tvl.category_totals();
            let shares = allocate(&positions, &totals, &self.category_groups)?;
            if let Err(e) =
                verify_reconciliation(&positions, &shares, &totals, &self.category_groups)
            {
                warn!(error = %e, "Hyperdrive allocation does not reconcile");
            }

            let positions: Vec<RewardedPosition> = positions
                .into_iter()
                .zip(asset_ids)
                .zip(shares)
                .map(|((position, asset_id), share)| RewardedPosition {
                    owner: position.owner,
                    asset_id,
                    category: position.category,
                    raw_balance: position.raw_balance,
                    share,
                })
                .collect();

            info!(
                positions = positions.len(),
                lp_rewardable = %tvl.lp_rewardable(),
                short_rewardable = %tvl.short_rewardable(),
                "Hyperdrive snapshot allocated"
            );
            Ok(HyperdriveSnapshot {
                block,
                tvl,
                positions,
            })
        }
        .instrument(span)
        .await
    }

    /// `user`'s rewardable balance at `block`, in whole vault-share units
    ///
    /// Zero before the pool's start block. Takes a fresh snapshot; callers
    /// valuing many users at one block should take one [`Self::snapshot`] and
    /// query it with [`HyperdriveSnapshot::user_balance`].
    pub async fn user_balance<R>(
        &self,
        reader: &R,
        participants: &HyperdriveParticipants,
        user: Address,
        block: BlockNumber,
    ) -> Result<BigDecimal, IntegrationError>
    where
        R: MultiTokenReader + ?Sized,
    {
        if block < self.start_block {
            return Ok(BigDecimal::zero());
        }
        let snapshot = self.snapshot(reader, participants, block).await?;
        Ok(snapshot.user_balance(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{address, U256};

    const ALICE: Address = address!("1111111111111111111111111111111111111111");

    #[test]
    fn test_lp_rewardable_clamps_at_zero() {
        let tvl = PoolTvl::new(100u64, 250u64);
        assert_eq!(tvl.lp_rewardable(), TokenAmount::ZERO);
        assert_eq!(tvl.short_rewardable(), TokenAmount::from(250u64));
    }

    #[test]
    fn test_record_skips_burn_recipient() {
        let mut participants = HyperdriveParticipants::default();
        let short = AssetId::encode(PositionCategory::Short, 1_735_689_600);
        participants.record(&TransferSingle {
            operator: ALICE,
            from: ALICE,
            to: Address::ZERO,
            id: short.as_u256(),
            value: U256::from(5u8),
        });
        assert!(participants.is_empty());
        assert!(participants.asset_ids.contains(&short));
    }

    #[test]
    fn test_snapshot_user_balance_normalizes_shares() {
        let lp = AssetId::encode(PositionCategory::Lp, 0);
        let short = AssetId::encode(PositionCategory::Short, 1_735_689_600);
        let position = |asset_id: AssetId, category, share: u64| RewardedPosition {
            owner: ALICE,
            asset_id,
            category,
            raw_balance: BigDecimal::from(1),
            share: serde_json::from_str(&format!("\"{share}\"")).unwrap(),
        };
        let snapshot = HyperdriveSnapshot {
            block: 1,
            tvl: PoolTvl::new(0u64, 0u64),
            positions: vec![
                position(lp, PositionCategory::Lp, 1_000_000_000_000_000_000),
                position(short, PositionCategory::Short, 500_000_000_000_000_000),
            ],
        };
        assert_eq!(snapshot.user_balance(ALICE).to_string(), "1.5");
        assert_eq!(snapshot.user_balance(Address::ZERO), BigDecimal::zero());
        assert_eq!(
            snapshot.total_allocated(),
            BigDecimal::from(1_500_000_000_000_000_000u64)
        );
    }
}
