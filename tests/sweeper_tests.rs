//! ExpirySweeper tests

use std::time::Duration as StdDuration;

use chrono::{Duration, Utc};
use tempfile::TempDir;
use tinylink::storage::{ExpirySweeper, KvStore};

fn create_temp_store() -> (KvStore, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let store = KvStore::open(temp_dir.path().join("sweep.redb")).expect("Failed to open store");
    (store, temp_dir)
}

#[tokio::test]
async fn test_sweeper_purges_expired_links() {
    let (store, _dir) = create_temp_store();
    store
        .set_until("old", "https://old.com", Some(Utc::now() - Duration::seconds(5)))
        .unwrap();
    store.set("keep", "https://keep.com", 0).unwrap();

    let sweeper = ExpirySweeper::spawn(store.clone(), StdDuration::from_secs(1));

    // 首次清理立即执行
    tokio::time::sleep(StdDuration::from_millis(500)).await;
    sweeper.shutdown().await;

    // 过期记录已被后台清理，这里没有可清理的了
    assert_eq!(store.purge_expired().unwrap(), 0);
    assert!(store.exists("keep").unwrap());
}

#[tokio::test]
async fn test_sweeper_shutdown_is_prompt() {
    let (store, _dir) = create_temp_store();
    let sweeper = ExpirySweeper::spawn(store, StdDuration::from_secs(3600));

    tokio::time::timeout(StdDuration::from_secs(5), sweeper.shutdown())
        .await
        .expect("sweeper should stop well before the next tick");
}

#[tokio::test]
async fn test_store_usable_after_sweeper_stops() {
    let (store, _dir) = create_temp_store();
    let sweeper = ExpirySweeper::spawn(store.clone(), StdDuration::from_millis(10));
    sweeper.shutdown().await;

    store.set("after", "https://after.com", 0).unwrap();
    assert_eq!(store.get("after").unwrap(), "https://after.com");
}
