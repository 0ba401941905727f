pub mod block;
pub mod comparator;
pub mod config;
pub mod error;
pub mod progress;
pub mod scanner;
pub mod stats;
pub mod store;

pub use block::{compute_hash, Block, GENESIS_PREV_HASH};
pub use comparator::{compare_nodes, ComparisonResult, Difference, DifferenceKind};
pub use config::AppConfig;
pub use error::Error;
pub use progress::{ScanReporter, SilentReporter};
pub use scanner::{ErrorScanResult, Finding, FindingKind, IntegrityScanner, ScanStatus};
pub use stats::{collect_stats, ChainStats};
pub use store::BlockStore;
