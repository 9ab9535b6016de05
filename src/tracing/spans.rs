// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Span creation helpers for pointscan operations.
//!
//! Telemetry is kept out of the business logic: each instrumented operation
//! has a span helper here instead of an `#[instrument]` attribute.
//!
//! ```rust,ignore
//! pub async fn my_operation(&self, param: Type) -> Result<T> {
//!     let span = spans::my_operation(param_value);
//!     async { /* business logic */ }.instrument(span).await
//! }
//! ```

use alloy_primitives::{Address, BlockNumber, U256};
use tracing::{Level, Span};

/// Span for resolving and valuing one liquidity position.
///
/// Parent: concentrated_user_balance span
#[inline]
pub(crate) fn value_token(token_id: U256, block: BlockNumber) -> Span {
    tracing::trace_span!("pointscan.value_token", token_id = %token_id, block = block)
}

/// Span for one run of the rewardable-TVL allocator.
#[inline]
pub(crate) fn allocate(positions: usize) -> Span {
    tracing::debug_span!("pointscan.allocate", positions = positions)
}

/// Span for scanning an integration's events for participants.
///
/// Children: per-page debug events from the chunked fetch
#[inline]
pub(crate) fn discover_participants(
    integration: &'static str,
    from_block: BlockNumber,
    to_block: BlockNumber,
) -> Span {
    tracing::span!(
        Level::INFO,
        "pointscan.discover_participants",
        integration = integration,
        from_block = from_block,
        to_block = to_block,
    )
}

/// Span for computing one user's balance in a concentrated-liquidity integration.
///
/// Children: value_token spans (one per owned token)
#[inline]
pub(crate) fn concentrated_user_balance(
    integration: &'static str,
    user: Address,
    block: BlockNumber,
    token_count: usize,
) -> Span {
    tracing::debug_span!(
        "pointscan.concentrated_user_balance",
        integration = integration,
        user = %user,
        block = block,
        token_count = token_count,
    )
}

/// Span for assembling a Hyperdrive snapshot.
///
/// Children: allocate span
#[inline]
pub(crate) fn hyperdrive_snapshot(
    pool: Address,
    block: BlockNumber,
    users: usize,
    asset_ids: usize,
) -> Span {
    tracing::span!(
        Level::INFO,
        "pointscan.hyperdrive_snapshot",
        pool = %pool,
        block = block,
        users = users,
        asset_ids = asset_ids,
    )
}
