use chaincheck_core::{Block, ChainStats, ComparisonResult, ErrorScanResult, ScanStatus};
use chrono::{TimeZone, Utc};
use colored::*;

fn rule() -> String {
    "═".repeat(66)
}

pub fn render_scan_result(result: &ErrorScanResult) {
    println!("\n{}", rule());
    println!("BLOCKCHAIN ERROR SCAN SUMMARY");
    println!("{}", rule());

    println!("\nSTATISTICS:");
    println!("  Database:         {}", result.database_path);
    println!("  Blocks Scanned:   {}", result.blocks_scanned);
    println!("  Total Errors:     {}", result.total_errors);
    println!("  Health Score:     {}%", result.health_score);
    let status = match result.status {
        ScanStatus::Empty => "EMPTY".yellow(),
        ScanStatus::Healthy => "HEALTHY".green(),
        ScanStatus::ErrorsFound => "ERRORS_FOUND".red(),
    };
    println!("  Status:           {}", status);

    println!("\nERROR CLASSIFICATION:");
    println!("  Corrupted Records:        {}", result.corrupted_records.len());
    println!("  Bad Hash:                 {}", result.bad_hash.len());
    println!("  Timestamp Future:         {}", result.timestamp_future.len());
    println!("  Timestamp Past:           {}", result.timestamp_past.len());
    println!(
        "  Timestamp Not Increasing: {}",
        result.timestamp_not_increasing.len()
    );
    println!("  Duplicate Hashes:         {}", result.duplicate_hashes.len());
    println!("  Empty Blocks:             {}", result.empty_blocks.len());
    println!("  PrevHash Errors:          {}", result.prevhash_errors.len());
    println!("  Height Errors:            {}", result.height_errors.len());
    println!("  Missing Blocks:           {}", result.missing_blocks.len());
    println!("  Out of Order:             {}", result.out_of_order_blocks.len());

    if result.total_errors == 0 {
        println!(
            "\n{} No errors found! Blockchain is healthy.",
            "✔".green()
        );
    } else {
        println!("\n{} Errors detected:", "✖".red());
        for finding in result.all_findings() {
            match &finding.detail {
                Some(detail) => println!("  • {} ({})", finding.message, detail),
                None => println!("  • {}", finding.message),
            }
        }
    }
    println!("{}", rule());
}

pub fn render_comparison_result(result: &ComparisonResult) {
    println!("\n{}", rule());
    println!("NODE COMPARISON SUMMARY");
    println!("{}", rule());

    println!("\nNODE INFO:");
    println!(
        "  Node1: {} (Height: {})",
        result.node1_path, result.node1_height
    );
    println!(
        "  Node2: {} (Height: {})",
        result.node2_path, result.node2_height
    );

    println!("\nRESULTS:");
    println!("  Matching Blocks:    {}", result.matching_blocks);
    println!("  Mismatched Blocks:  {}", result.mismatched_blocks.len());
    println!("  Node1 Only:         {}", result.node1_only_blocks.len());
    println!("  Node2 Only:         {}", result.node2_only_blocks.len());
    println!("  Sync Percentage:    {:.1}%", result.sync_percentage);

    if result.divergence_point >= 0 {
        println!(
            "\n{} Divergence Point: Block {}",
            "✖".red(),
            result.divergence_point
        );
    }

    println!("\nRECOMMENDATIONS:");
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, rec);
    }
    println!("{}", rule());
}

pub fn render_stats(stats: &ChainStats) {
    println!("\n{}", rule());
    println!("BLOCKCHAIN STATS");
    println!("{}", rule());

    println!("\n  Height:             {}", stats.height);
    println!("  Total Blocks:       {}", stats.total_blocks);
    println!("  Average Block Time: {:.2} seconds", stats.average_block_time);

    if stats.missing_heights.is_empty() {
        println!("\n  {} No gaps detected", "✔".green());
    } else {
        println!(
            "\n  {} Gaps detected at heights: {:?}",
            "✖".red(),
            stats.missing_heights
        );
    }

    if stats.duplicate_hashes.is_empty() {
        println!("  {} No duplicate hashes detected", "✔".green());
    } else {
        for dup in &stats.duplicate_hashes {
            println!("  {} {}", "✖".red(), dup);
        }
    }
    println!("{}", rule());
}

pub fn render_block(block: &Block) {
    let utc_time = Utc
        .timestamp_opt(block.timestamp, 0)
        .single()
        .map(|t| t.to_string())
        .unwrap_or_else(|| "out of range".to_string());

    println!("\n=== Block {} ===", block.height);
    println!("Hash:      {}", block.hash);
    println!("PrevHash:  {}", block.prev_hash);
    println!("Timestamp: {} (Unix: {})", utc_time, block.timestamp);
    println!("Data:      {}\n", block.data);
}
