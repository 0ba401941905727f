use crate::comparator::{ComparisonResult, Difference};
use crate::scanner::{ErrorScanResult, Finding};

/// Trait for streaming scan and comparison progress.
///
/// CLI implements with colored terminal output; JSON mode and tests use
/// [`SilentReporter`]. All methods have default no-op implementations.
pub trait ScanReporter: Send + Sync {
    fn on_scan_start(&self, _total_blocks: i64) {}
    fn on_block_ok(&self, _height: i64) {}
    fn on_finding(&self, _finding: &Finding) {}
    fn on_scan_complete(&self, _result: &ErrorScanResult) {}
    fn on_compare_start(&self, _scan_limit: i64) {}
    fn on_difference(&self, _difference: &Difference) {}
    fn on_compare_complete(&self, _result: &ComparisonResult) {}
}

/// No-op reporter for silent operation.
pub struct SilentReporter;

impl ScanReporter for SilentReporter {}
