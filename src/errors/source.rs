// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Shared error types for external data collaborators.
//!
//! Event log sources and chain-state readers live outside this crate. They
//! report failures through [`SourceError`], and pointscan never retries them.

use alloy_primitives::BlockNumber;

/// Errors reported by [`crate::EventLogSource`] and the chain-state reader traits.
///
/// # Examples
///
/// ```rust
/// use pointscan::SourceError;
///
/// let error = SourceError::not_available("positionInfo(42)", 21_000_000);
/// assert!(error.is_not_available());
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The requested block is not available yet (future or unmined block).
    ///
    /// Callers of pointscan decide whether to retry or skip.
    #[error("{operation} not available at block {block}")]
    NotAvailable {
        /// Description of the call
        operation: String,
        /// Block the call was made at
        block: BlockNumber,
    },

    /// The call reverted, typically because the queried token id does not
    /// exist at that block (not yet minted, or burned).
    #[error("{operation} reverted at block {block}")]
    Reverted {
        /// Description of the call
        operation: String,
        /// Block the call was made at
        block: BlockNumber,
    },

    /// Failed to fetch logs from the event source.
    #[error("Failed to fetch logs for {operation}")]
    GetLogsFailed {
        /// Description of the query (e.g., "ModifyLiquidity 100-200")
        operation: String,
        /// The underlying collaborator error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Any other collaborator failure (transport, decoding, provider downtime).
    #[error("Chain call failed during {operation}")]
    CallFailed {
        /// Description of the call
        operation: String,
        /// The underlying collaborator error
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl SourceError {
    pub fn not_available(operation: impl Into<String>, block: BlockNumber) -> Self {
        SourceError::NotAvailable {
            operation: operation.into(),
            block,
        }
    }

    pub fn reverted(operation: impl Into<String>, block: BlockNumber) -> Self {
        SourceError::Reverted {
            operation: operation.into(),
            block,
        }
    }

    pub fn get_logs_failed(
        operation: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SourceError::GetLogsFailed {
            operation: operation.into(),
            source: source.into(),
        }
    }

    pub fn call_failed(
        operation: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        SourceError::CallFailed {
            operation: operation.into(),
            source: source.into(),
        }
    }

    pub fn is_not_available(&self) -> bool {
        matches!(self, SourceError::NotAvailable { .. })
    }
}
