// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! External data collaborators
//!
//! pointscan never talks to a node. Callers plug in implementations of these
//! traits backed by whatever provider, multicall batching, cache and retry
//! policy they use. Every read is pinned to an explicit block.
//!
//! A read at a block that is not available yet should fail with
//! [`SourceError::NotAvailable`]; a read of a token id that does not exist at
//! that block should fail with [`SourceError::Reverted`].

use alloy_primitives::{Address, BlockNumber, B256, U256};
use alloy_rpc_types::Log;
use async_trait::async_trait;

use crate::allocation::AssetId;
use crate::errors::SourceError;
use crate::integrations::hyperdrive::PoolTvl;
use crate::types::tokens::TokenAmount;
use crate::valuation::{LiquidityPosition, PoolState};

/// Source of decoded-ready event logs
///
/// Implementations must return every log emitted by `address` with topic0
/// `event_signature` in `from_block..=to_block`, ordered by block ascending.
#[async_trait]
pub trait EventLogSource: Send + Sync {
    async fn logs(
        &self,
        address: Address,
        event_signature: B256,
        from_block: BlockNumber,
        to_block: BlockNumber,
    ) -> Result<Vec<Log>, SourceError>;
}

/// Chain-state reads for an NFT-based concentrated-liquidity pool
///
/// One implementation covers one pool and its position manager.
#[async_trait]
pub trait LiquidityPositionReader: Send + Sync {
    /// `ownerOf(token_id)` on the position manager
    async fn owner_of(&self, token_id: U256, block: BlockNumber) -> Result<Address, SourceError>;

    /// Liquidity and tick range of `token_id`
    async fn position(
        &self,
        token_id: U256,
        block: BlockNumber,
    ) -> Result<LiquidityPosition, SourceError>;

    /// Current tick and sqrt price of the pool
    async fn pool_state(&self, block: BlockNumber) -> Result<PoolState, SourceError>;
}

/// Chain-state reads for an ERC-1155 position pool (Hyperdrive)
#[async_trait]
pub trait MultiTokenReader: Send + Sync {
    /// `balanceOf(asset_id, owner)`
    async fn balance_of(
        &self,
        asset_id: AssetId,
        owner: Address,
        block: BlockNumber,
    ) -> Result<TokenAmount, SourceError>;

    /// Vault shares held by the pool and shorts outstanding
    async fn pool_tvl(&self, block: BlockNumber) -> Result<PoolTvl, SourceError>;
}
