// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Error types for protocol integrations.

use super::{AllocationError, SourceError};

/// Errors from participant discovery and snapshot assembly.
#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// A collaborator call failed for a reason other than a missing position.
    #[error("Source error: {0}")]
    Source(#[from] SourceError),

    /// The allocator rejected the assembled positions.
    #[error("Allocation error: {0}")]
    Allocation(#[from] AllocationError),

    /// A log matched the event signature but could not be decoded.
    #[error("Failed to decode {event} log: {details}")]
    DecodeFailed {
        /// Event name
        event: &'static str,
        /// Decoder message
        details: String,
    },

    /// The caller passed an unusable argument.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl IntegrationError {
    pub fn decode_failed(event: &'static str, details: impl Into<String>) -> Self {
        IntegrationError::DecodeFailed {
            event,
            details: details.into(),
        }
    }

    pub fn invalid_input(details: impl Into<String>) -> Self {
        IntegrationError::InvalidInput(details.into())
    }
}
