// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Strong types shared across pointscan.
//!
//! - Token amounts and decimals
//! - Configuration values (block page sizes)

pub mod config;
pub mod tokens;

// Note: Public types are re-exported from lib.rs, not here
