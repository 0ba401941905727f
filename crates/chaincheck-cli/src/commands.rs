use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "chaincheck")]
#[command(version)]
#[command(about = "Blockchain integrity inspector", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Load a valid sample chain into a block store
    Load {
        /// Path to the block store
        #[arg(long)]
        db: Option<String>,
        /// Number of blocks to generate
        #[arg(long)]
        blocks: Option<i64>,
    },
    /// Scan a chain and classify every integrity error
    Scan {
        /// Path to the block store
        #[arg(long)]
        db: Option<String>,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Compare two chains block by block
    Compare {
        /// Path to the first node's block store
        #[arg(long)]
        db1: Option<String>,
        /// Path to the second node's block store
        #[arg(long)]
        db2: Option<String>,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print one block's fields
    View {
        /// Path to the block store
        #[arg(long)]
        db: Option<String>,
        /// Height of the block to show
        height: i64,
    },
    /// Print chain statistics
    Stats {
        /// Path to the block store
        #[arg(long)]
        db: Option<String>,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print configuration values
    PrintConfig,
}
