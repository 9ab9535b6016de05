// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Event definitions used for participant discovery
//!
//! The `sol!` macro generates `SIGNATURE_HASH` constants for filtering and
//! `decode_log` for decoding:
//!
//! ```rust,ignore
//! use alloy_sol_types::SolEvent;
//! use pointscan::ModifyLiquidity;
//!
//! let logs = source
//!     .logs(pool_manager, ModifyLiquidity::SIGNATURE_HASH, from, to)
//!     .await?;
//! for log in logs {
//!     let event = ModifyLiquidity::decode_log(&log.inner)?;
//!     println!("pool {} salt {}", event.id, event.salt);
//! }
//! ```

use std::fmt::Debug;

use alloy_sol_types::sol;

sol! {
    /// Uniswap V4 PoolManager liquidity change
    ///
    /// Positions minted through the position manager carry the token id in `salt`
    /// and the position manager as `sender`.
    event ModifyLiquidity(
        bytes32 indexed id,
        address indexed sender,
        int24 tickLower,
        int24 tickUpper,
        int256 liquidityDelta,
        bytes32 salt
    );
}

impl Debug for ModifyLiquidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "ModifyLiquidity(id: {}, sender: {}, salt: {})",
            self.id, self.sender, self.salt
        )
    }
}

sol! {
    /// Thruster position manager deposit
    ///
    /// Thruster's position manager adds the pool address to the V3 event.
    event IncreaseLiquidity(
        uint256 indexed tokenId,
        uint128 liquidity,
        uint256 amount0,
        uint256 amount1,
        address pool
    );
}

impl Debug for IncreaseLiquidity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IncreaseLiquidity(tokenId: {}, pool: {})",
            self.tokenId, self.pool
        )
    }
}

sol! {
    /// ERC-1155 single transfer, emitted by Hyperdrive for every position mint,
    /// burn and transfer
    event TransferSingle(
        address indexed operator,
        address indexed from,
        address indexed to,
        uint256 id,
        uint256 value
    );
}

impl Debug for TransferSingle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TransferSingle(from: {}, to: {}, id: {:#x}, value: {})",
            self.from, self.to, self.id, self.value
        )
    }
}
