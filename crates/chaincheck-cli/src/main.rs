mod commands;
mod logging;
mod progress;
mod report;

use std::process;

use chaincheck_core::{
    collect_stats, compare_nodes, AppConfig, Block, BlockStore, IntegrityScanner, SilentReporter,
    GENESIS_PREV_HASH,
};
use chrono::Utc;
use clap::{CommandFactory, Parser};
use commands::{Cli, Commands};
use dotenv::dotenv;
use indicatif::{ProgressBar, ProgressStyle};
use progress::CliReporter;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let config = match chaincheck_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    let args = Cli::parse();

    match args.command {
        Some(Commands::Load { db, blocks }) => {
            let db = db.unwrap_or_else(|| config.db_path.clone());
            let blocks = blocks.unwrap_or(config.sample_blocks);
            if let Err(err) = run_load(&db, blocks) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Scan { db, json }) => {
            let db = db.unwrap_or_else(|| config.db_path.clone());
            if let Err(err) = run_scan(&db, json, &config) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Compare { db1, db2, json }) => {
            let db1 = db1.unwrap_or_else(|| config.node1_path.clone());
            let db2 = db2.unwrap_or_else(|| config.node2_path.clone());
            if let Err(err) = run_compare(&db1, &db2, json) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::View { db, height }) => {
            let db = db.unwrap_or_else(|| config.db_path.clone());
            if let Err(err) = run_view(&db, height) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::Stats { db, json }) => {
            let db = db.unwrap_or_else(|| config.db_path.clone());
            if let Err(err) = run_stats(&db, json) {
                error!("Error: {}", err);
                process::exit(1);
            }
        }
        Some(Commands::PrintConfig) => {
            println!("Configuration: {:?}", config);
        }
        None => {
            let _ = Cli::command().print_long_help();
        }
    }

    Ok(())
}

fn run_load(db_path: &str, num_blocks: i64) -> Result<(), Box<dyn std::error::Error>> {
    let store = BlockStore::open(db_path)?;

    info!("Loading {} sample blocks into {}...", num_blocks, db_path);
    let pb = ProgressBar::new(num_blocks.max(0) as u64);
    pb.set_style(
        ProgressStyle::with_template(
            "  {spinner:.cyan} Loading [{bar:30.cyan/dim}] {pos}/{len} blocks",
        )?
        .progress_chars("━╸─")
        .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );

    let base_time = Utc::now().timestamp();
    let mut prev_hash = GENESIS_PREV_HASH.to_string();
    for i in 0..num_blocks {
        let timestamp = base_time + i * 10;
        let data = format!("Transaction data for block {i}");
        let block = Block::new(i, &prev_hash, &data, timestamp);
        prev_hash = block.hash.clone();
        store.put(&block)?;
        pb.inc(1);
    }
    pb.finish_and_clear();

    info!("Data loading complete: {} blocks stored", num_blocks);
    Ok(())
}

fn run_scan(
    db_path: &str,
    json: bool,
    config: &AppConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = BlockStore::open(db_path)?;
    let scanner = IntegrityScanner::new().with_overscan(config.overscan);

    let result = if json {
        let result = scanner.scan(&store, &SilentReporter)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        result
    } else {
        let reporter = CliReporter::new();
        let result = scanner.scan(&store, &reporter)?;
        report::render_scan_result(&result);
        result
    };

    info!(
        "Scan complete: {} errors, health score {}",
        result.total_errors, result.health_score
    );
    Ok(())
}

fn run_compare(
    db1_path: &str,
    db2_path: &str,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let store1 = BlockStore::open(db1_path)?;
    let store2 = BlockStore::open(db2_path)?;

    let result = if json {
        let result = compare_nodes(&store1, &store2, &SilentReporter)?;
        println!("{}", serde_json::to_string_pretty(&result)?);
        result
    } else {
        let reporter = CliReporter::new();
        let result = compare_nodes(&store1, &store2, &reporter)?;
        report::render_comparison_result(&result);
        result
    };

    info!(
        "Comparison complete: {:.1}% synchronized",
        result.sync_percentage
    );
    Ok(())
}

fn run_view(db_path: &str, height: i64) -> Result<(), Box<dyn std::error::Error>> {
    let store = BlockStore::open(db_path)?;
    match store.get(height) {
        Ok(Some(block)) => report::render_block(&block),
        Ok(None) => println!("Block {} not found in {}", height, db_path),
        Err(err) => println!("Error loading block {}: {}", height, err),
    }
    Ok(())
}

fn run_stats(db_path: &str, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let store = BlockStore::open(db_path)?;
    let stats = collect_stats(&store)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
    } else {
        report::render_stats(&stats);
    }
    Ok(())
}
