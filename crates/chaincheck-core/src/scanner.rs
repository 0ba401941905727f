use crate::block::{compute_hash, Block, GENESIS_PREV_HASH};
use crate::error::Error;
use crate::progress::ScanReporter;
use crate::store::BlockStore;
use ahash::AHashMap;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Clock-drift tolerance before a timestamp counts as "in the future".
const FUTURE_DRIFT_TOLERANCE_SECS: i64 = 300;
/// Horizon behind which a timestamp counts as "too old".
const PAST_HORIZON_SECS: i64 = 10 * 365 * 24 * 60 * 60;

/// The closed set of anomaly categories the scanner classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    CorruptedRecord,
    BadHash,
    TimestampFuture,
    TimestampPast,
    TimestampNotIncreasing,
    DuplicateHash,
    EmptyBlock,
    PrevHashError,
    HeightError,
    MissingBlock,
    OutOfOrder,
}

/// One classified anomaly. Findings are data, not control flow: the scan
/// never aborts for one, and a single block can accumulate several.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub height: i64,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl Finding {
    fn new(kind: FindingKind, height: i64, message: String) -> Self {
        Self {
            kind,
            height,
            message,
            detail: None,
        }
    }

    fn with_detail(mut self, detail: String) -> Self {
        self.detail = Some(detail);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanStatus {
    #[serde(rename = "EMPTY")]
    Empty,
    #[serde(rename = "HEALTHY")]
    Healthy,
    #[serde(rename = "ERRORS_FOUND")]
    ErrorsFound,
}

/// Immutable snapshot of one integrity scan. The serialized form (field
/// names included) is the stable machine-readable report format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorScanResult {
    pub scan_time: String,
    pub database_path: String,
    pub total_blocks: i64,
    pub blocks_scanned: i64,
    pub total_errors: i64,
    pub corrupted_records: Vec<Finding>,
    pub bad_hash: Vec<Finding>,
    pub timestamp_future: Vec<Finding>,
    pub timestamp_past: Vec<Finding>,
    pub timestamp_not_increasing: Vec<Finding>,
    pub duplicate_hashes: Vec<Finding>,
    pub empty_blocks: Vec<Finding>,
    pub prevhash_errors: Vec<Finding>,
    pub height_errors: Vec<Finding>,
    pub missing_blocks: Vec<Finding>,
    pub out_of_order_blocks: Vec<Finding>,
    pub health_score: i64,
    pub status: ScanStatus,
}

impl ErrorScanResult {
    fn new(database_path: String) -> Self {
        Self {
            scan_time: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            database_path,
            total_blocks: 0,
            blocks_scanned: 0,
            total_errors: 0,
            corrupted_records: Vec::new(),
            bad_hash: Vec::new(),
            timestamp_future: Vec::new(),
            timestamp_past: Vec::new(),
            timestamp_not_increasing: Vec::new(),
            duplicate_hashes: Vec::new(),
            empty_blocks: Vec::new(),
            prevhash_errors: Vec::new(),
            height_errors: Vec::new(),
            missing_blocks: Vec::new(),
            out_of_order_blocks: Vec::new(),
            health_score: 0,
            status: ScanStatus::Empty,
        }
    }

    /// Route a finding to its category list and count it.
    fn record(&mut self, finding: Finding, reporter: &dyn ScanReporter) {
        reporter.on_finding(&finding);
        let list = match finding.kind {
            FindingKind::CorruptedRecord => &mut self.corrupted_records,
            FindingKind::BadHash => &mut self.bad_hash,
            FindingKind::TimestampFuture => &mut self.timestamp_future,
            FindingKind::TimestampPast => &mut self.timestamp_past,
            FindingKind::TimestampNotIncreasing => &mut self.timestamp_not_increasing,
            FindingKind::DuplicateHash => &mut self.duplicate_hashes,
            FindingKind::EmptyBlock => &mut self.empty_blocks,
            FindingKind::PrevHashError => &mut self.prevhash_errors,
            FindingKind::HeightError => &mut self.height_errors,
            FindingKind::MissingBlock => &mut self.missing_blocks,
            FindingKind::OutOfOrder => &mut self.out_of_order_blocks,
        };
        list.push(finding);
        self.total_errors += 1;
    }

    /// All findings across the eleven categories, for rendering.
    pub fn all_findings(&self) -> impl Iterator<Item = &Finding> {
        self.corrupted_records
            .iter()
            .chain(&self.bad_hash)
            .chain(&self.timestamp_future)
            .chain(&self.timestamp_past)
            .chain(&self.timestamp_not_increasing)
            .chain(&self.duplicate_hashes)
            .chain(&self.empty_blocks)
            .chain(&self.prevhash_errors)
            .chain(&self.height_errors)
            .chain(&self.missing_blocks)
            .chain(&self.out_of_order_blocks)
    }
}

/// Walks one chain front to back and classifies every anomaly it finds.
///
/// The scanner is read-only and never fails for data-level anomalies; only a
/// real storage engine fault aborts a scan. `overscan` is how many heights
/// past the last known data the walk keeps probing so a trailing gap followed
/// by more real data is reported as a gap instead of truncating the scan.
pub struct IntegrityScanner {
    overscan: i64,
}

impl IntegrityScanner {
    pub fn new() -> Self {
        Self { overscan: 10 }
    }

    pub fn with_overscan(mut self, overscan: i64) -> Self {
        self.overscan = overscan.max(0);
        self
    }

    pub fn scan(
        &self,
        store: &BlockStore,
        reporter: &dyn ScanReporter,
    ) -> Result<ErrorScanResult, Error> {
        let mut result = ErrorScanResult::new(store.path().display().to_string());

        let max_height = store.max_height()?;
        if max_height < 0 {
            info!("Block store at {} is empty", result.database_path);
            result.status = ScanStatus::Empty;
            result.health_score = 0;
            return Ok(result);
        }

        result.total_blocks = max_height + 1;
        reporter.on_scan_start(result.total_blocks);

        let now = Utc::now().timestamp();
        let mut seen_hashes: AHashMap<String, i64> = AHashMap::new();
        let mut previous: Option<Block> = None;
        let mut expected_height: i64 = 0;

        // The walk extends past max_height by the overscan window. Absences
        // past max_height stay pending until later data proves they were a
        // gap; a trailing run of absences is end-of-chain, not a gap.
        let mut last_data_height = max_height;
        let mut pending_gap: Vec<i64> = Vec::new();

        let mut i: i64 = 0;
        while i <= last_data_height + self.overscan {
            let raw = match store.get_raw(i)? {
                None => {
                    if i <= max_height {
                        result.record(
                            Finding::new(
                                FindingKind::MissingBlock,
                                i,
                                format!("Block {i}: Missing from store"),
                            ),
                            reporter,
                        );
                    } else {
                        pending_gap.push(i);
                    }
                    i += 1;
                    continue;
                }
                Some(bytes) => bytes,
            };

            if i > last_data_height {
                last_data_height = i;
            }
            for gap_height in pending_gap.drain(..) {
                result.record(
                    Finding::new(
                        FindingKind::MissingBlock,
                        gap_height,
                        format!("Block {gap_height}: Missing from store"),
                    ),
                    reporter,
                );
            }

            let block = match serde_json::from_slice::<Block>(&raw) {
                Ok(block) => block,
                Err(e) => {
                    // A record that does not decode cannot be hash-checked or
                    // linked; only this one finding applies to this height.
                    result.record(
                        Finding::new(
                            FindingKind::CorruptedRecord,
                            i,
                            format!("Block {i}: Corrupted record"),
                        )
                        .with_detail(e.to_string()),
                        reporter,
                    );
                    i += 1;
                    continue;
                }
            };

            result.blocks_scanned += 1;
            let errors_before = result.total_errors;
            self.check_block(&mut result, reporter, &block, i, now, expected_height, &previous, &mut seen_hashes);
            if result.total_errors == errors_before {
                reporter.on_block_ok(i);
            }

            previous = Some(block);
            expected_height += 1;
            i += 1;
        }

        if result.blocks_scanned > 0 {
            let score = 100.0 * (result.blocks_scanned - result.total_errors) as f64
                / result.blocks_scanned as f64;
            result.health_score = (score.round() as i64).clamp(0, 100);
        }
        result.status = if result.total_errors == 0 {
            ScanStatus::Healthy
        } else {
            ScanStatus::ErrorsFound
        };

        debug!(
            "Scan of {} complete: {} blocks scanned, {} errors, health {}",
            result.database_path, result.blocks_scanned, result.total_errors, result.health_score,
        );
        reporter.on_scan_complete(&result);
        Ok(result)
    }

    /// The per-block checks. Deliberately non-short-circuiting: each check
    /// signals a different root cause, so one block can collect several
    /// findings.
    #[allow(clippy::too_many_arguments)]
    fn check_block(
        &self,
        result: &mut ErrorScanResult,
        reporter: &dyn ScanReporter,
        block: &Block,
        height: i64,
        now: i64,
        expected_height: i64,
        previous: &Option<Block>,
        seen_hashes: &mut AHashMap<String, i64>,
    ) {
        let computed = compute_hash(block.height, &block.prev_hash, &block.data, block.timestamp);
        if block.hash != computed {
            result.record(
                Finding::new(
                    FindingKind::BadHash,
                    height,
                    format!("Block {height}: Bad hash"),
                )
                .with_detail(format!("stored {}, computed {}", block.hash, computed)),
                reporter,
            );
        }

        if let Some(first_height) = seen_hashes.get(&block.hash) {
            result.record(
                Finding::new(
                    FindingKind::DuplicateHash,
                    height,
                    format!("Block {height} duplicates hash from Block {first_height}"),
                ),
                reporter,
            );
        } else {
            seen_hashes.insert(block.hash.clone(), height);
        }

        if block.timestamp > now + FUTURE_DRIFT_TOLERANCE_SECS {
            result.record(
                Finding::new(
                    FindingKind::TimestampFuture,
                    height,
                    format!("Block {height}: Timestamp in future"),
                ),
                reporter,
            );
        }

        if block.timestamp < now - PAST_HORIZON_SECS {
            result.record(
                Finding::new(
                    FindingKind::TimestampPast,
                    height,
                    format!("Block {height}: Timestamp too old"),
                ),
                reporter,
            );
        }

        if let Some(prev) = previous {
            if block.timestamp <= prev.timestamp {
                result.record(
                    Finding::new(
                        FindingKind::TimestampNotIncreasing,
                        height,
                        format!("Block {height}: Timestamp not increasing"),
                    ),
                    reporter,
                );
            }
        }

        if block.data.trim().is_empty() {
            result.record(
                Finding::new(
                    FindingKind::EmptyBlock,
                    height,
                    format!("Block {height}: Empty block"),
                ),
                reporter,
            );
        }

        // Linkage runs against the decoded stream, not the expected stream,
        // so a gap or duplicate upstream does not cascade into false
        // positives here.
        if height == 0 {
            if block.prev_hash != GENESIS_PREV_HASH {
                result.record(
                    Finding::new(
                        FindingKind::PrevHashError,
                        0,
                        "Block 0: Invalid genesis prevHash".to_string(),
                    ),
                    reporter,
                );
            }
        } else if let Some(prev) = previous {
            if block.prev_hash != prev.hash {
                result.record(
                    Finding::new(
                        FindingKind::PrevHashError,
                        height,
                        format!("Block {height}: PrevHash linkage broken"),
                    ),
                    reporter,
                );
            }
        }

        if block.height != expected_height {
            result.record(
                Finding::new(
                    FindingKind::HeightError,
                    height,
                    format!("Block {height}: Height mismatch"),
                )
                .with_detail(format!("expected {expected_height}, got {}", block.height)),
                reporter,
            );
        }

        if block.height < expected_height {
            result.record(
                Finding::new(
                    FindingKind::OutOfOrder,
                    height,
                    format!("Block {height}: Out of order"),
                ),
                reporter,
            );
        }
    }
}

impl Default for IntegrityScanner {
    fn default() -> Self {
        Self::new()
    }
}
