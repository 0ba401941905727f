use chaincheck_core::{ComparisonResult, Difference, ErrorScanResult, Finding, ScanReporter};
use colored::*;

/// Streams findings to the terminal as the scan walks the chain.
///
/// JSON mode uses `SilentReporter` instead so stdout stays machine-readable.
pub struct CliReporter;

impl CliReporter {
    pub fn new() -> Self {
        Self
    }
}

impl ScanReporter for CliReporter {
    fn on_scan_start(&self, total_blocks: i64) {
        eprintln!("Scanning {} blocks...", total_blocks);
    }

    fn on_finding(&self, finding: &Finding) {
        match &finding.detail {
            Some(detail) => {
                eprintln!("  {} {} ({})", "✖".red(), finding.message, detail.dimmed())
            }
            None => eprintln!("  {} {}", "✖".red(), finding.message),
        }
    }

    fn on_scan_complete(&self, result: &ErrorScanResult) {
        if result.total_errors == 0 {
            eprintln!("  {} No errors found", "✔".green());
        }
    }

    fn on_compare_start(&self, scan_limit: i64) {
        eprintln!("Comparing blocks 0..={}...", scan_limit.max(0));
    }

    fn on_difference(&self, difference: &Difference) {
        eprintln!("  {} {}", "✖".red(), difference.message);
    }

    fn on_compare_complete(&self, result: &ComparisonResult) {
        if result.divergence_point < 0 {
            eprintln!("  {} No divergence found", "✔".green());
        }
    }
}
