use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// PrevHash sentinel carried by the genesis block.
pub const GENESIS_PREV_HASH: &str = "0";

/// A single chain record as persisted in the block store.
///
/// Field names are the on-disk JSON wire format; existing stores were written
/// with exactly these names and must keep decoding. `height` is signed so a
/// record with a nonsense stored height still decodes and gets classified by
/// the scanner instead of being treated as corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub height: i64,
    pub hash: String,
    pub prev_hash: String,
    pub data: String,
    pub timestamp: i64,
}

impl Block {
    /// Build a block with its canonical hash already computed.
    pub fn new(height: i64, prev_hash: &str, data: &str, timestamp: i64) -> Self {
        Self {
            height,
            hash: compute_hash(height, prev_hash, data, timestamp),
            prev_hash: prev_hash.to_string(),
            data: data.to_string(),
            timestamp,
        }
    }

    pub fn is_hash_valid(&self) -> bool {
        self.hash == compute_hash(self.height, &self.prev_hash, &self.data, self.timestamp)
    }
}

/// Canonical block hash: lowercase-hex SHA-256 over the concatenated decimal
/// height, prev-hash, data, and decimal timestamp strings, no separators.
/// The byte layout is load-bearing — chains written by earlier tooling verify
/// against exactly this concatenation.
pub fn compute_hash(height: i64, prev_hash: &str, data: &str, timestamp: i64) -> String {
    let record = format!("{height}{prev_hash}{data}{timestamp}");
    let digest = Sha256::digest(record.as_bytes());
    hex::encode(digest)
}
