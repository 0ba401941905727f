use crate::error::Error;
use crate::store::BlockStore;
use ahash::AHashMap;
use serde::{Deserialize, Serialize};

/// How far past the latest found block the stats walk keeps probing for
/// stragglers before calling it end-of-chain.
const GAP_PROBE_WINDOW: i64 = 10;

/// Summary statistics for one chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainStats {
    /// Height of the latest block found, -1 when the store is empty.
    pub height: i64,
    pub total_blocks: i64,
    /// Mean seconds between consecutive found blocks.
    pub average_block_time: f64,
    pub missing_heights: Vec<i64>,
    pub duplicate_hashes: Vec<String>,
}

/// Forward walk collecting block counts, gaps, duplicate hashes, and the
/// mean inter-block time. A record that fails to decode ends the probe the
/// same way an absence does; it never aborts the walk.
pub fn collect_stats(store: &BlockStore) -> Result<ChainStats, Error> {
    let mut stats = ChainStats {
        height: -1,
        total_blocks: 0,
        average_block_time: 0.0,
        missing_heights: Vec::new(),
        duplicate_hashes: Vec::new(),
    };

    let mut seen_hashes: AHashMap<String, i64> = AHashMap::new();
    let mut total_time_diff: i64 = 0;
    let mut prev_timestamp: i64 = 0;
    let mut first_block = true;
    let mut last_found: i64 = -1;
    // Holes only count as gaps once later data proves the chain continues;
    // a trailing run of absences is end-of-chain.
    let mut pending_gap: Vec<i64> = Vec::new();
    let mut height: i64 = 0;

    loop {
        let block = match store.get(height) {
            Ok(Some(block)) => block,
            Ok(None) | Err(Error::Decode { .. }) => {
                if stats.total_blocks > 0 && height < last_found + GAP_PROBE_WINDOW {
                    pending_gap.push(height);
                    height += 1;
                    continue;
                }
                break;
            }
            Err(e) => return Err(e),
        };

        last_found = height;
        stats.missing_heights.append(&mut pending_gap);

        if let Some(first_height) = seen_hashes.get(&block.hash) {
            stats.duplicate_hashes.push(format!(
                "Block {} duplicates hash from Block {first_height}",
                block.height
            ));
        } else {
            seen_hashes.insert(block.hash.clone(), block.height);
        }

        if !first_block {
            total_time_diff += block.timestamp - prev_timestamp;
        }
        prev_timestamp = block.timestamp;
        stats.height = block.height;
        first_block = false;

        stats.total_blocks += 1;
        height += 1;
    }

    if stats.total_blocks > 1 {
        stats.average_block_time = total_time_diff as f64 / (stats.total_blocks - 1) as f64;
    }

    Ok(stats)
}
