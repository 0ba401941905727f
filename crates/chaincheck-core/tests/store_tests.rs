use chaincheck_core::{Block, BlockStore, Error, GENESIS_PREV_HASH};
use tempfile::tempdir;

fn make_chain(n: i64, base_time: i64) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut prev_hash = GENESIS_PREV_HASH.to_string();
    for i in 0..n {
        let block = Block::new(
            i,
            &prev_hash,
            &format!("Transaction data for block {i}"),
            base_time + i * 10,
        );
        prev_hash = block.hash.clone();
        blocks.push(block);
    }
    blocks
}

#[test]
fn test_put_get_roundtrip() {
    let dir = tempdir().unwrap();
    let store = BlockStore::open(dir.path()).unwrap();

    let block = Block::new(0, GENESIS_PREV_HASH, "genesis", 1700000000);
    store.put(&block).unwrap();

    let loaded = store.get(0).unwrap().unwrap();
    assert_eq!(loaded, block);
    assert_eq!(store.path(), dir.path());
}

#[test]
fn test_get_absent_height_is_none() {
    let dir = tempdir().unwrap();
    let store = BlockStore::open(dir.path()).unwrap();
    assert!(store.get(0).unwrap().is_none());
    assert!(store.get_raw(42).unwrap().is_none());
}

#[test]
fn test_get_raw_returns_stored_json() {
    let dir = tempdir().unwrap();
    let store = BlockStore::open(dir.path()).unwrap();

    let block = Block::new(0, GENESIS_PREV_HASH, "genesis", 1700000000);
    store.put(&block).unwrap();

    let raw = store.get_raw(0).unwrap().unwrap();
    let decoded: Block = serde_json::from_slice(&raw).unwrap();
    assert_eq!(decoded, block);
}

#[test]
fn test_get_undecodable_bytes_is_decode_error() {
    let dir = tempdir().unwrap();
    let store = BlockStore::open(dir.path()).unwrap();
    store.put_raw(3, b"{ not valid json").unwrap();

    match store.get(3) {
        Err(Error::Decode { height, .. }) => assert_eq!(height, 3),
        other => panic!("expected decode error, got {other:?}"),
    }
}

#[test]
fn test_max_height_empty_store() {
    let dir = tempdir().unwrap();
    let store = BlockStore::open(dir.path()).unwrap();
    assert_eq!(store.max_height().unwrap(), -1);
}

#[test]
fn test_max_height_contiguous_chain() {
    let dir = tempdir().unwrap();
    let store = BlockStore::open(dir.path()).unwrap();
    for block in make_chain(5, 1700000000) {
        store.put(&block).unwrap();
    }
    assert_eq!(store.max_height().unwrap(), 4);
}

#[test]
fn test_max_height_stops_at_gap() {
    let dir = tempdir().unwrap();
    let store = BlockStore::open(dir.path()).unwrap();
    for block in make_chain(5, 1700000000) {
        if block.height != 3 {
            store.put(&block).unwrap();
        }
    }
    assert_eq!(store.max_height().unwrap(), 2);
}

#[test]
fn test_max_height_stops_at_undecodable_record() {
    let dir = tempdir().unwrap();
    let store = BlockStore::open(dir.path()).unwrap();
    for block in make_chain(5, 1700000000) {
        store.put(&block).unwrap();
    }
    store.put_raw(2, b"garbage").unwrap();
    assert_eq!(store.max_height().unwrap(), 1);
}
