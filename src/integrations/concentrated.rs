// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared logic for NFT-based concentrated-liquidity integrations

use std::collections::BTreeSet;

use alloy_primitives::{Address, BlockNumber, U256};
use futures::future::join_all;
use tracing::{debug, Instrument};

use super::Participants;
use crate::errors::IntegrationError;
use crate::source::LiquidityPositionReader;
use crate::tracing::spans;
use crate::valuation::PositionValuer;

/// Decimal places kept in a reported balance
pub const BALANCE_DECIMALS: i32 = 4;

/// Balance rules common to Uniswap V4 and Thruster positions
///
/// A user's balance is the summed whole-token value (`amount0 + amount1`) of
/// the positions they still own at the snapshot block, rounded to
/// [`BALANCE_DECIMALS`] places. Snapshots taken before `start_block` are zero.
#[derive(Debug, Clone, Copy)]
pub struct ConcentratedLiquidity {
    name: &'static str,
    start_block: BlockNumber,
    valuer: PositionValuer,
}

impl ConcentratedLiquidity {
    pub const fn new(name: &'static str, start_block: BlockNumber, valuer: PositionValuer) -> Self {
        Self {
            name,
            start_block,
            valuer,
        }
    }

    pub const fn name(&self) -> &'static str {
        self.name
    }

    pub const fn start_block(&self) -> BlockNumber {
        self.start_block
    }

    pub const fn valuer(&self) -> &PositionValuer {
        &self.valuer
    }

    /// Balance of `user` across `token_ids` at `block`
    ///
    /// Tokens whose owner cannot be read, or that have moved to someone else,
    /// contribute nothing.
    ///
    /// # Errors
    ///
    /// Returns [`IntegrationError::Source`] if the pool state cannot be read.
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
        if block < self.start_block || token_ids.is_empty() {
            return Ok(0.0);
        }

        let span = spans::concentrated_user_balance(self.name, user, block, token_ids.len());
        async {
            let pool = reader.pool_state(block).await?;

            let values = join_all(token_ids.iter().map(|&token_id| {
                let pool = &pool;
                async move {
                    match reader.owner_of(token_id, block).await {
                        Ok(owner) if owner == user => {
                            self.valuer
                                .value_token(reader, token_id, block, pool)
                                .await
                                .total()
                        }
                        Ok(owner) => {
                            debug!(token_id = %token_id, owner = %owner, "Token no longer held by user");
                            0.0
                        }
                        Err(e) => {
                            debug!(token_id = %token_id, error = %e, "Owner unresolvable, skipping token");
                            0.0
                        }
                    }
                }
            }))
            .await;

            let balance = round_balance(values.into_iter().sum());
            debug!(balance, "Computed concentrated-liquidity balance");
            Ok(balance)
        }
        .instrument(span)
        .await
    }
}

fn round_balance(balance: f64) -> f64 {
    let factor = 10_f64.powi(BALANCE_DECIMALS);
    (balance * factor).round() / factor
}

/// Group `token_ids` by their owner at `block`
///
/// Tokens whose owner is in `excluded_owners` or cannot be read are dropped.
pub(crate) async fn resolve_owners<R, I>(
    reader: &R,
    token_ids: I,
    block: BlockNumber,
    excluded_owners: &[Address],
) -> Participants
where
    R: LiquidityPositionReader + ?Sized,
    I: IntoIterator<Item = U256>,
{
    let lookups = join_all(token_ids.into_iter().map(|token_id| async move {
        (token_id, reader.owner_of(token_id, block).await)
    }))
    .await;

    let mut participants = Participants::new();
    for (token_id, owner) in lookups {
        match owner {
            Ok(owner) if excluded_owners.contains(&owner) => {
                debug!(token_id = %token_id, owner = %owner, "Skipping excluded owner");
            }
            Ok(owner) => {
                participants.entry(owner).or_default().insert(token_id);
            }
            Err(e) => {
                debug!(token_id = %token_id, error = %e, "Owner unresolvable, skipping token");
            }
        }
    }
    participants
}
