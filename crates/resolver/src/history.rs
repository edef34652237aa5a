//! Reconstruction of record history from resolver events.

use crate::{
    contracts::{Log, block_timestamp},
    error::ContractError,
};
use ens_rpc::JsonRpcClient;
use futures::future::join_all;
use itertools::Itertools;
use std::collections::HashMap;

/// A past value of a record and the time of the block that set it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HistoryEntry<T> {
    /// Unix timestamp of the block, in seconds.
    pub timestamp: u64,
    pub block_number: u64,
    pub value: T,
}

/// Decodes `logs` with `decode` and dates them, newest first.
///
/// Logs without data or block number, or whose data does not decode, are skipped. Block headers
/// are fetched concurrently, once per distinct block.
pub(crate) async fn collect<T>(
    client: &dyn JsonRpcClient,
    logs: Vec<Log>,
    decode: impl Fn(&str) -> Option<T>,
) -> Result<Vec<HistoryEntry<T>>, ContractError> {
    let decoded: Vec<(u64, T)> = logs
        .iter()
        .filter_map(|log| {
            let (Some(data), Some(block)) = (log.data.as_deref(), log.block()) else {
                let tx = &log.transaction_hash;
                warn!(target: "ens::history", ?tx, "skipping log without data or block number");
                return None;
            };
            let Some(value) = decode(data) else {
                let tx = &log.transaction_hash;
                warn!(target: "ens::history", ?tx, block, "skipping undecodable log");
                return None;
            };
            Some((block, value))
        })
        .collect();

    let blocks = decoded.iter().map(|(block, _)| *block).unique().collect::<Vec<_>>();
    let headers = join_all(
        blocks.iter().map(|&number| async move { (number, block_timestamp(client, number).await) }),
    )
    .await;

    let mut timestamps = HashMap::with_capacity(headers.len());
    for (number, timestamp) in headers {
        match timestamp? {
            Some(timestamp) => {
                timestamps.insert(number, timestamp);
            }
            None => {
                warn!(target: "ens::history", block = number, "block not found, skipping its logs")
            }
        }
    }

    let mut entries = decoded
        .into_iter()
        .filter_map(|(block_number, value)| {
            let timestamp = *timestamps.get(&block_number)?;
            Some(HistoryEntry { timestamp, block_number, value })
        })
        .collect::<Vec<_>>();
    sort_newest_first(&mut entries);
    Ok(entries)
}

/// Sorts by timestamp, most recent first. Entries with equal timestamps keep their order.
pub fn sort_newest_first<T>(entries: &mut [HistoryEntry<T>]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
