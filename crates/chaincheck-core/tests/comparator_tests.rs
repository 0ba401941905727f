use chaincheck_core::{compare_nodes, Block, BlockStore, SilentReporter, GENESIS_PREV_HASH};
use chrono::Utc;
use tempfile::tempdir;

fn make_chain(n: i64, base_time: i64, tag: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut prev_hash = GENESIS_PREV_HASH.to_string();
    for i in 0..n {
        let block = Block::new(
            i,
            &prev_hash,
            &format!("{tag} data for block {i}"),
            base_time + i * 10,
        );
        prev_hash = block.hash.clone();
        blocks.push(block);
    }
    blocks
}

fn store_with_blocks(dir: &std::path::Path, blocks: &[Block]) -> BlockStore {
    let store = BlockStore::open(dir).unwrap();
    for block in blocks {
        store.put(block).unwrap();
    }
    store
}

#[test]
fn test_identical_chains_fully_synchronized() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let blocks = make_chain(10, Utc::now().timestamp(), "tx");
    let store1 = store_with_blocks(dir1.path(), &blocks);
    let store2 = store_with_blocks(dir2.path(), &blocks);

    let result = compare_nodes(&store1, &store2, &SilentReporter).unwrap();
    assert_eq!(result.matching_blocks, 10);
    assert_eq!(result.sync_percentage, 100.0);
    assert_eq!(result.divergence_point, -1);
    assert!(result.mismatched_blocks.is_empty());
    assert_eq!(
        result.recommendations,
        vec!["Nodes are perfectly synchronized".to_string()]
    );
}

#[test]
fn test_truncated_chain_behind_by_three() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let blocks = make_chain(10, Utc::now().timestamp(), "tx");
    let store1 = store_with_blocks(dir1.path(), &blocks);
    let store2 = store_with_blocks(dir2.path(), &blocks[..7]);

    let result = compare_nodes(&store1, &store2, &SilentReporter).unwrap();
    assert_eq!(result.node1_height, 9);
    assert_eq!(result.node2_height, 6);
    assert_eq!(result.matching_blocks, 7);
    assert_eq!(result.node1_only_blocks, vec![7, 8, 9]);
    assert!(result.node2_only_blocks.is_empty());
    assert_eq!(result.divergence_point, 7);
    assert_eq!(result.sync_percentage, 70.0);
    assert!(result
        .recommendations
        .contains(&"Node2 is 3 blocks behind - sync from Node1".to_string()));
    assert!(result
        .recommendations
        .contains(&"Chains diverge at block 7".to_string()));
    assert!(result
        .recommendations
        .contains(&"Node2 missing 3 blocks - sync required".to_string()));
}

#[test]
fn test_divergence_point_is_earliest_disagreement() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let base_time = Utc::now().timestamp();
    let blocks1 = make_chain(10, base_time, "tx");
    let store1 = store_with_blocks(dir1.path(), &blocks1);

    // Node2 carries identical blocks through height 3, nothing at 4..=6, and
    // foreign content at 7..=9. Absence at 4 must win over the later
    // content mismatch.
    let store2 = store_with_blocks(dir2.path(), &blocks1[..4]);
    let foreign = make_chain(10, base_time, "other");
    for block in &foreign[7..] {
        store2.put(block).unwrap();
    }

    let result = compare_nodes(&store1, &store2, &SilentReporter).unwrap();
    assert_eq!(result.divergence_point, 4);
    assert_eq!(result.node1_only_blocks, vec![4, 5, 6]);
    assert_eq!(result.mismatched_blocks, vec![7, 8, 9]);
    assert_eq!(result.matching_blocks, 4);
}

#[test]
fn test_undecodable_record_counts_as_absent() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let blocks = make_chain(5, Utc::now().timestamp(), "tx");
    let store1 = store_with_blocks(dir1.path(), &blocks);
    let store2 = store_with_blocks(dir2.path(), &blocks);
    store2.put_raw(3, b"not a block").unwrap();

    let result = compare_nodes(&store1, &store2, &SilentReporter).unwrap();
    assert_eq!(result.node1_only_blocks, vec![3]);
    assert_eq!(result.divergence_point, 3);
    assert_eq!(result.matching_blocks, 4);
    assert_eq!(result.sync_percentage, 80.0);
}

#[test]
fn test_timestamp_skew_recommendation() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let base_time = Utc::now().timestamp();
    let blocks1 = make_chain(5, base_time, "tx");
    let store1 = store_with_blocks(dir1.path(), &blocks1);

    // Same payloads, every timestamp shifted forward by 5 seconds.
    let mut blocks2 = Vec::new();
    let mut prev_hash = GENESIS_PREV_HASH.to_string();
    for i in 0..5 {
        let block = Block::new(
            i,
            &prev_hash,
            &format!("tx data for block {i}"),
            base_time + i * 10 + 5,
        );
        prev_hash = block.hash.clone();
        blocks2.push(block);
    }
    let store2 = store_with_blocks(dir2.path(), &blocks2);

    let result = compare_nodes(&store1, &store2, &SilentReporter).unwrap();
    assert_eq!(result.timestamp_mismatches.len(), 5);
    assert_eq!(result.timestamp_mismatches[0].delta_secs, Some(-5));
    assert_eq!(result.hash_mismatches.len(), 5);
    assert!(result.data_mismatches.is_empty());
    assert_eq!(result.matching_blocks, 0);
    assert_eq!(result.divergence_point, 0);
    assert!(result
        .recommendations
        .contains(&"Multiple timestamp mismatches - check node time synchronization".to_string()));
}

#[test]
fn test_data_differences_do_not_drive_match_tally() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let base_time = Utc::now().timestamp();
    let blocks = make_chain(3, base_time, "tx");
    let store1 = store_with_blocks(dir1.path(), &blocks);
    let store2 = store_with_blocks(dir2.path(), &blocks);

    // Same stored hash, mutated payload: a data difference and a hash
    // difference are independent signals, and the tally follows the hash.
    let mut altered = blocks[1].clone();
    altered.data = "rewritten".to_string();
    store2
        .put_raw(1, &serde_json::to_vec(&altered).unwrap())
        .unwrap();

    let result = compare_nodes(&store1, &store2, &SilentReporter).unwrap();
    assert_eq!(result.matching_blocks, 3);
    assert!(result.hash_mismatches.is_empty());
    assert_eq!(result.data_mismatches.len(), 1);
    assert_eq!(result.data_mismatches[0].height, 1);
    assert_eq!(result.divergence_point, -1);
}

#[test]
fn test_two_empty_stores() {
    let dir1 = tempdir().unwrap();
    let dir2 = tempdir().unwrap();
    let store1 = BlockStore::open(dir1.path()).unwrap();
    let store2 = BlockStore::open(dir2.path()).unwrap();

    let result = compare_nodes(&store1, &store2, &SilentReporter).unwrap();
    assert_eq!(result.node1_height, -1);
    assert_eq!(result.node2_height, -1);
    assert_eq!(result.matching_blocks, 0);
    assert_eq!(result.sync_percentage, 0.0);
    assert_eq!(
        result.recommendations,
        vec!["Nodes are perfectly synchronized".to_string()]
    );
}
