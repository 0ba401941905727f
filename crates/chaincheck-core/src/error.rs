use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] rocksdb::Error),

    #[error("Block {height}: decode error: {source}")]
    Decode {
        height: i64,
        source: serde_json::Error,
    },

    #[error("{0}")]
    Other(String),
}
