// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Event definitions and paged log fetching

mod definitions;

pub use definitions::{IncreaseLiquidity, ModifyLiquidity, TransferSingle};

use alloy_primitives::{Address, BlockNumber};
use alloy_rpc_types::Log;
use alloy_sol_types::SolEvent;
use tracing::debug;

use crate::errors::IntegrationError;
use crate::source::EventLogSource;
use crate::types::config::MaxBlockRange;

/// Fetch every `E` log emitted by `address` in `from_block..=to_block`, one page
/// at a time, and decode it
///
/// Fails fast: a failed page or an undecodable log aborts the scan.
pub async fn fetch_events_chunked<E, S>(
    source: &S,
    address: Address,
    from_block: BlockNumber,
    to_block: BlockNumber,
    max_block_range: MaxBlockRange,
) -> Result<Vec<E>, IntegrationError>
where
    E: SolEvent,
    S: EventLogSource + ?Sized,
{
    debug!(
        event = E::SIGNATURE,
        from_block,
        to_block,
        num_chunks = max_block_range.chunks_needed(from_block, to_block),
        "Starting chunked event fetch"
    );

    let mut events = Vec::new();
    for (chunk_start, chunk_end) in max_block_range.chunk_range(from_block, to_block) {
        let logs = source
            .logs(address, E::SIGNATURE_HASH, chunk_start, chunk_end)
            .await?;
        debug!(
            chunk_start,
            chunk_end,
            logs_count = logs.len(),
            "Fetched logs for chunk"
        );
        for log in &logs {
            events.push(decode::<E>(log)?);
        }
    }

    debug!(total_events = events.len(), "Finished chunked event fetch");
    Ok(events)
}

fn decode<E: SolEvent>(log: &Log) -> Result<E, IntegrationError> {
    E::decode_log(&log.inner)
        .map(|decoded| decoded.data)
        .map_err(|e| IntegrationError::decode_failed(E::SIGNATURE, e.to_string()))
}
