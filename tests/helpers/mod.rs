// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Test helpers for pointscan integration tests
//!
//! Provides in-memory implementations of the collaborator traits so
//! integrations can be exercised without a node.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use alloy_primitives::{Address, BlockNumber, B256, U256};
use alloy_rpc_types::Log;
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use pointscan::{
    AssetId, EventLogSource, LiquidityPosition, LiquidityPositionReader, MultiTokenReader,
    PoolState, PoolTvl, SourceError, TokenAmount,
};

/// In-memory event log source
///
/// Records every requested page so tests can check chunking.
///
/// # Example
///
/// ```rust,ignore
/// let source = MockEventSource::new()
///     .with_event(pool_manager, 100, &modify_liquidity)
///     .failing_from(5_000);
/// ```
#[derive(Default)]
pub struct MockEventSource {
    logs: Vec<Log>,
    fail_from: Option<BlockNumber>,
    requests: Mutex<Vec<(BlockNumber, BlockNumber)>>,
}

impl MockEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Emit `event` from `address` at `block`
    pub fn with_event<E: SolEvent>(mut self, address: Address, block: BlockNumber, event: &E) -> Self {
        self.logs.push(create_test_log(address, block, event));
        self
    }

    /// Fail any page that reaches `block`
    pub fn failing_from(mut self, block: BlockNumber) -> Self {
        self.fail_from = Some(block);
        self
    }

    /// Pages requested so far, in order
    pub fn requests(&self) -> Vec<(BlockNumber, BlockNumber)> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl EventLogSource for MockEventSource {
    async fn logs(
        &self,
        address: Address,
        event_signature: B256,
        from_block: BlockNumber,
        to_block: BlockNumber,
    ) -> Result<Vec<Log>, SourceError> {
        self.requests.lock().unwrap().push((from_block, to_block));

        if matches!(self.fail_from, Some(block) if to_block >= block) {
            return Err(SourceError::get_logs_failed(
                format!("{from_block}-{to_block}"),
                std::io::Error::other("connection reset"),
            ));
        }

        Ok(self
            .logs
            .iter()
            .filter(|log| {
                let block = log.block_number.unwrap_or_default();
                log.address() == address
                    && log.topic0() == Some(&event_signature)
                    && (from_block..=to_block).contains(&block)
            })
            .cloned()
            .collect())
    }
}

/// In-memory NFT position manager and pool
///
/// Tokens without an owner or position revert. A reader without a pool state
/// reports every block as not available.
#[derive(Default)]
pub struct MockPositionReader {
    owners: HashMap<U256, Address>,
    positions: HashMap<U256, LiquidityPosition>,
    pool: Option<PoolState>,
}

impl MockPositionReader {
    pub fn new(pool: PoolState) -> Self {
        Self {
            pool: Some(pool),
            ..Self::default()
        }
    }

    pub fn without_pool() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token_id: u64, owner: Address, position: LiquidityPosition) -> Self {
        self.owners.insert(U256::from(token_id), owner);
        self.positions.insert(U256::from(token_id), position);
        self
    }

    /// Owner readable but position unresolvable
    pub fn with_owner_only(mut self, token_id: u64, owner: Address) -> Self {
        self.owners.insert(U256::from(token_id), owner);
        self
    }
}

#[async_trait]
impl LiquidityPositionReader for MockPositionReader {
    async fn owner_of(&self, token_id: U256, block: BlockNumber) -> Result<Address, SourceError> {
        self.owners
            .get(&token_id)
            .copied()
            .ok_or_else(|| SourceError::reverted(format!("ownerOf({token_id})"), block))
    }

    async fn position(
        &self,
        token_id: U256,
        block: BlockNumber,
    ) -> Result<LiquidityPosition, SourceError> {
        self.positions
            .get(&token_id)
            .copied()
            .ok_or_else(|| SourceError::reverted(format!("positions({token_id})"), block))
    }

    async fn pool_state(&self, block: BlockNumber) -> Result<PoolState, SourceError> {
        self.pool
            .ok_or_else(|| SourceError::not_available("slot0", block))
    }
}

/// In-memory ERC-1155 pool
///
/// Unset balances read as zero.
pub struct MockMultiTokenReader {
    balances: HashMap<(AssetId, Address), TokenAmount>,
    tvl: PoolTvl,
    reads: Mutex<usize>,
}

impl MockMultiTokenReader {
    pub fn new(tvl: PoolTvl) -> Self {
        Self {
            balances: HashMap::new(),
            tvl,
            reads: Mutex::new(0),
        }
    }

    pub fn with_balance(mut self, asset_id: AssetId, owner: Address, balance: u64) -> Self {
        self.balances
            .insert((asset_id, owner), TokenAmount::from(balance));
        self
    }

    /// Number of `balance_of` calls served
    pub fn reads(&self) -> usize {
        *self.reads.lock().unwrap()
    }
}

#[async_trait]
impl MultiTokenReader for MockMultiTokenReader {
    async fn balance_of(
        &self,
        asset_id: AssetId,
        owner: Address,
        _block: BlockNumber,
    ) -> Result<TokenAmount, SourceError> {
        *self.reads.lock().unwrap() += 1;
        Ok(self
            .balances
            .get(&(asset_id, owner))
            .copied()
            .unwrap_or(TokenAmount::ZERO))
    }

    async fn pool_tvl(&self, _block: BlockNumber) -> Result<PoolTvl, SourceError> {
        Ok(self.tvl)
    }
}

/// Install a fmt subscriber filtered by `RUST_LOG`, once per test binary
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Helper to create a Log carrying `event` for testing
pub fn create_test_log<E: SolEvent>(address: Address, block: BlockNumber, event: &E) -> Log {
    Log {
        inner: alloy_primitives::Log {
            address,
            data: event.encode_log_data(),
        },
        block_hash: Some(B256::ZERO),
        block_number: Some(block),
        block_timestamp: Some(1234567890),
        transaction_hash: Some(B256::ZERO),
        transaction_index: Some(0),
        log_index: Some(0),
        removed: false,
    }
}
