use crate::block::Block;
use crate::error::Error;
use crate::progress::ScanReporter;
use crate::store::BlockStore;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DifferenceKind {
    HashMismatch,
    DataMismatch,
    TimestampMismatch,
}

/// One per-height disagreement between the two compared chains.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difference {
    pub kind: DifferenceKind,
    pub height: i64,
    pub message: String,
    /// Signed node1 − node2, populated for timestamp differences.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delta_secs: Option<i64>,
}

/// Immutable snapshot of one pairwise comparison. Serialized form is the
/// stable machine-readable report format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub scan_time: String,
    pub node1_path: String,
    pub node2_path: String,
    pub node1_height: i64,
    pub node2_height: i64,
    pub matching_blocks: i64,
    pub mismatched_blocks: Vec<i64>,
    pub node1_only_blocks: Vec<i64>,
    pub node2_only_blocks: Vec<i64>,
    pub divergence_point: i64,
    pub hash_mismatches: Vec<Difference>,
    pub data_mismatches: Vec<Difference>,
    pub timestamp_mismatches: Vec<Difference>,
    pub sync_percentage: f64,
    pub recommendations: Vec<String>,
}

impl ComparisonResult {
    fn mark_divergence(&mut self, height: i64) {
        if self.divergence_point == -1 {
            self.divergence_point = height;
        }
    }
}

/// A record the node cannot decode is a record the node effectively does not
/// have; only real engine faults propagate.
fn load_or_absent(store: &BlockStore, height: i64) -> Result<Option<Block>, Error> {
    match store.get(height) {
        Ok(found) => Ok(found),
        Err(Error::Decode { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Walk two chains in lockstep over ascending heights and tally agreement.
///
/// The match/mismatch tally is hash-driven; data and timestamp differences
/// are recorded independently and never affect it. `divergence_point` is
/// first-writer-wins across absence and hash mismatch, so it always names the
/// earliest height at which the chains disagree in any way.
pub fn compare_nodes(
    store1: &BlockStore,
    store2: &BlockStore,
    reporter: &dyn ScanReporter,
) -> Result<ComparisonResult, Error> {
    let mut result = ComparisonResult {
        scan_time: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
        node1_path: store1.path().display().to_string(),
        node2_path: store2.path().display().to_string(),
        node1_height: store1.max_height()?,
        node2_height: store2.max_height()?,
        matching_blocks: 0,
        mismatched_blocks: Vec::new(),
        node1_only_blocks: Vec::new(),
        node2_only_blocks: Vec::new(),
        divergence_point: -1,
        hash_mismatches: Vec::new(),
        data_mismatches: Vec::new(),
        timestamp_mismatches: Vec::new(),
        sync_percentage: 0.0,
        recommendations: Vec::new(),
    };

    let scan_limit = result.node1_height.max(result.node2_height);
    reporter.on_compare_start(scan_limit);

    for i in 0..=scan_limit {
        let block1 = load_or_absent(store1, i)?;
        let block2 = load_or_absent(store2, i)?;

        let (block1, block2) = match (block1, block2) {
            // Absent on both sides is not a comparison-level finding; an
            // integrity scan of each side separately reports true gaps.
            (None, None) => continue,
            (None, Some(_)) => {
                result.node2_only_blocks.push(i);
                result.mark_divergence(i);
                continue;
            }
            (Some(_), None) => {
                result.node1_only_blocks.push(i);
                result.mark_divergence(i);
                continue;
            }
            (Some(b1), Some(b2)) => (b1, b2),
        };

        if block1.hash != block2.hash {
            result.mismatched_blocks.push(i);
            result.mark_divergence(i);
            let difference = Difference {
                kind: DifferenceKind::HashMismatch,
                height: i,
                message: format!("Block {i}: Hash mismatch"),
                delta_secs: None,
            };
            reporter.on_difference(&difference);
            result.hash_mismatches.push(difference);
        } else {
            result.matching_blocks += 1;
        }

        if block1.data != block2.data {
            let difference = Difference {
                kind: DifferenceKind::DataMismatch,
                height: i,
                message: format!("Block {i}: Data differs"),
                delta_secs: None,
            };
            reporter.on_difference(&difference);
            result.data_mismatches.push(difference);
        }

        if block1.timestamp != block2.timestamp {
            let difference = Difference {
                kind: DifferenceKind::TimestampMismatch,
                height: i,
                message: format!("Block {i}: Timestamp differs"),
                delta_secs: Some(block1.timestamp - block2.timestamp),
            };
            reporter.on_difference(&difference);
            result.timestamp_mismatches.push(difference);
        }
    }

    if scan_limit >= 0 {
        result.sync_percentage =
            100.0 * result.matching_blocks as f64 / (scan_limit + 1) as f64;
    }

    result.recommendations = generate_recommendations(&result);

    debug!(
        "Comparison complete: {} matching, {} mismatched, divergence at {}",
        result.matching_blocks,
        result.mismatched_blocks.len(),
        result.divergence_point,
    );
    reporter.on_compare_complete(&result);
    Ok(result)
}

/// Ordered remediation hints; every condition is appended independently.
fn generate_recommendations(result: &ComparisonResult) -> Vec<String> {
    let mut recs = Vec::new();

    let height_diff = result.node1_height - result.node2_height;
    if height_diff > 0 {
        recs.push(format!(
            "Node2 is {height_diff} blocks behind - sync from Node1"
        ));
    } else if height_diff < 0 {
        recs.push(format!(
            "Node1 is {} blocks behind - sync from Node2",
            -height_diff
        ));
    }

    if result.divergence_point >= 0 {
        recs.push(format!("Chains diverge at block {}", result.divergence_point));
    }

    if !result.hash_mismatches.is_empty() {
        recs.push(format!(
            "Found {} hash mismatches",
            result.hash_mismatches.len()
        ));
    }

    if !result.node1_only_blocks.is_empty() {
        recs.push(format!(
            "Node2 missing {} blocks - sync required",
            result.node1_only_blocks.len()
        ));
    }

    if !result.node2_only_blocks.is_empty() {
        recs.push(format!(
            "Node1 missing {} blocks - sync required",
            result.node2_only_blocks.len()
        ));
    }

    if result.timestamp_mismatches.len() > 3 {
        recs.push("Multiple timestamp mismatches - check node time synchronization".to_string());
    }

    if recs.is_empty() {
        recs.push("Nodes are perfectly synchronized".to_string());
    }

    recs
}
