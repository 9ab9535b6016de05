// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for the pointscan library.
//!
//! Each component has its own error type, and [`PointscanError`] unifies them
//! for callers that don't need to tell the sources apart:
//!
//! - [`ValuationError`] - Malformed concentrated-liquidity inputs
//! - [`AllocationError`] - Invalid inputs to the rewardable-TVL allocator
//! - [`SourceError`] - Failures reported by event log sources and chain-state readers
//! - [`IntegrationError`] - Failures while assembling a protocol snapshot
//!
//! The valuer turns most bad on-chain state into a zero valuation instead of
//! an error; see [`crate::valuation`].
//!
//! # Example
//!
//! ```rust,ignore
//! use pointscan::{IntegrationError, SourceError};
//!
//! match hyperdrive.snapshot(&reader, &participants, block).await {
//!     Ok(snapshot) => println!("{} positions", snapshot.positions.len()),
//!     Err(IntegrationError::Source(SourceError::NotAvailable { block, .. })) => {
//!         eprintln!("block {block} not mined yet, retry later");
//!     }
//!     Err(e) => eprintln!("snapshot failed: {e}"),
//! }
//! ```

mod allocation;
mod integration;
mod source;
mod valuation;

pub use allocation::AllocationError;
pub use integration::IntegrationError;
pub use source::SourceError;
pub use valuation::ValuationError;

/// Unified error type for all pointscan operations.
///
/// All module-specific error types convert into `PointscanError` via `From`,
/// so `?` works across module boundaries.
#[derive(Debug, thiserror::Error)]
pub enum PointscanError {
    /// Error from concentrated-liquidity valuation.
    #[error("Valuation error: {0}")]
    Valuation(#[from] ValuationError),

    /// Error from rewardable-TVL allocation.
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    /// Error from an external event log source or chain-state reader.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// Error from a protocol integration.
    #[error("Integration error: {0}")]
    Integration(#[from] IntegrationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_convert_into_unified_type() {
        let err: PointscanError = ValuationError::inverted_range(10, -10).into();
        assert!(matches!(err, PointscanError::Valuation(_)));

        let err: PointscanError = SourceError::not_available("slot0", 100).into();
        assert!(err.to_string().starts_with("Source error:"));
    }
}
