use crate::block::Block;
use crate::error::Error;
use rocksdb::{Options, DB};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Height-indexed block storage over RocksDB.
///
/// Keys are `block-{height}` ASCII bytes, values are compact JSON of [`Block`].
/// Opening a fresh path yields an empty store, not an error; an absent key is
/// data, never a fault.
pub struct BlockStore {
    db: DB,
    path: PathBuf,
}

impl BlockStore {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        let db = DB::open(&opts, path.as_ref())?;
        debug!("Block store opened at {}", path.as_ref().display());
        Ok(Self {
            db,
            path: path.as_ref().to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn key(height: i64) -> Vec<u8> {
        format!("block-{height}").into_bytes()
    }

    /// Raw stored bytes for a height, `None` if absent.
    pub fn get_raw(&self, height: i64) -> Result<Option<Vec<u8>>, Error> {
        Ok(self.db.get(Self::key(height))?)
    }

    /// Decoded block for a height. `None` means absent; bytes that fail to
    /// decode are an [`Error::Decode`], which callers classify, not propagate.
    pub fn get(&self, height: i64) -> Result<Option<Block>, Error> {
        match self.get_raw(height)? {
            None => Ok(None),
            Some(bytes) => match serde_json::from_slice::<Block>(&bytes) {
                Ok(block) => Ok(Some(block)),
                Err(source) => Err(Error::Decode { height, source }),
            },
        }
    }

    /// Serialize and write a block under its own height.
    pub fn put(&self, block: &Block) -> Result<(), Error> {
        let bytes = serde_json::to_vec(block)
            .map_err(|e| Error::Other(format!("Block {}: encode error: {e}", block.height)))?;
        self.db.put(Self::key(block.height), bytes)?;
        Ok(())
    }

    /// Write arbitrary bytes under a height key. No reader assumes the bytes
    /// decode; corruption-injection tests depend on that.
    pub fn put_raw(&self, height: i64, bytes: &[u8]) -> Result<(), Error> {
        self.db.put(Self::key(height), bytes)?;
        Ok(())
    }

    /// Highest height reachable from 0 through contiguous, decodable records,
    /// or -1 when height 0 itself is absent or undecodable.
    pub fn max_height(&self) -> Result<i64, Error> {
        let mut height: i64 = 0;
        loop {
            match self.get(height) {
                Ok(Some(_)) => height += 1,
                Ok(None) | Err(Error::Decode { .. }) => return Ok(height - 1),
                Err(e) => return Err(e),
            }
        }
    }
}
