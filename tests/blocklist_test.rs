mod common;

use std::collections::HashSet;
use std::sync::Arc;

use bruteforce_protection_service::core::{BlockEntry, Blocklist};
use tempfile::TempDir;

fn blocklist_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("blocklist.json")
}

#[tokio::test]
async fn add_then_query_reports_blocked() {
    let dir = TempDir::new().expect("tempdir");
    let blocklist = Blocklist::new(blocklist_path(&dir));

    blocklist.add("10.0.0.1", "manual").await.expect("add");

    assert!(blocklist.is_blocked("10.0.0.1").await);
    let entries = blocklist.list().await;
    assert_eq!(entries["10.0.0.1"].reason, "manual");
    assert!(entries["10.0.0.1"].timestamp > 0.0);
}

#[tokio::test]
async fn remove_then_query_reports_unblocked() {
    let dir = TempDir::new().expect("tempdir");
    let blocklist = Blocklist::new(blocklist_path(&dir));

    blocklist.add("10.0.0.1", "manual").await.expect("add");
    blocklist.remove("10.0.0.1").await.expect("remove");

    assert!(!blocklist.is_blocked("10.0.0.1").await);
}

#[tokio::test]
async fn removing_an_absent_ip_is_a_noop() {
    let dir = TempDir::new().expect("tempdir");
    let blocklist = Blocklist::new(blocklist_path(&dir));

    blocklist
        .remove("203.0.113.7")
        .await
        .expect("remove of absent IP must not error");
}

#[tokio::test]
async fn adding_an_existing_ip_overwrites_the_entry() {
    let dir = TempDir::new().expect("tempdir");
    let blocklist = Blocklist::new(blocklist_path(&dir));

    blocklist.add("10.0.0.1", "first").await.expect("add");
    blocklist.add("10.0.0.1", "second").await.expect("add");

    let entries = blocklist.list().await;
    assert_eq!(entries.len(), 1);
    assert_eq!(entries["10.0.0.1"].reason, "second");
}

#[tokio::test]
async fn reloading_from_the_same_file_round_trips() {
    let dir = TempDir::new().expect("tempdir");
    let path = blocklist_path(&dir);

    let first = Blocklist::new(&path);
    first.add("10.0.0.1", "scanner hit").await.expect("add");
    first.add("10.0.0.2", "manual").await.expect("add");
    let before = first.list().await;
    drop(first);

    let second = Blocklist::new(&path);
    assert_eq!(second.list().await, before);
}

#[tokio::test]
async fn missing_file_starts_empty() {
    let dir = TempDir::new().expect("tempdir");
    let blocklist = Blocklist::new(blocklist_path(&dir));

    assert!(blocklist.list().await.is_empty());
    assert_eq!(blocklist.count().await, 0);
}

#[tokio::test]
async fn corrupt_file_starts_empty_and_recovers_on_next_write() {
    let dir = TempDir::new().expect("tempdir");
    let path = blocklist_path(&dir);
    std::fs::write(&path, "{ not json").expect("seed corrupt file");

    let blocklist = Blocklist::new(&path);
    assert!(blocklist.list().await.is_empty());

    blocklist.add("10.0.0.1", "manual").await.expect("add");

    // The next mutation rewrote the file into a valid state
    let raw = std::fs::read_to_string(&path).expect("read back");
    let parsed: std::collections::HashMap<String, BlockEntry> =
        serde_json::from_str(&raw).expect("valid JSON after rewrite");
    assert!(parsed.contains_key("10.0.0.1"));
}

#[tokio::test]
async fn persisted_shape_is_ip_keyed_with_reason_and_timestamp() {
    let dir = TempDir::new().expect("tempdir");
    let path = blocklist_path(&dir);

    let blocklist = Blocklist::new(&path);
    blocklist.add("10.0.0.1", "manual").await.expect("add");

    let raw = std::fs::read_to_string(&path).expect("read back");
    let value: serde_json::Value = serde_json::from_str(&raw).expect("valid JSON");
    let entry = &value["10.0.0.1"];
    assert!(entry["reason"].is_string());
    assert!(entry["timestamp"].is_f64());
}

#[tokio::test]
async fn list_returns_a_snapshot_not_the_live_table() {
    let dir = TempDir::new().expect("tempdir");
    let blocklist = Blocklist::new(blocklist_path(&dir));
    blocklist.add("10.0.0.1", "manual").await.expect("add");

    let mut listed = blocklist.list().await;
    listed.insert(
        "9.9.9.9".to_string(),
        BlockEntry {
            reason: "injected".to_string(),
            timestamp: 0.0,
        },
    );
    listed.remove("10.0.0.1");

    assert!(blocklist.is_blocked("10.0.0.1").await);
    assert!(!blocklist.is_blocked("9.9.9.9").await);
}

#[tokio::test]
async fn concurrent_adds_on_distinct_ips_never_lose_an_update() {
    let dir = TempDir::new().expect("tempdir");
    let path = blocklist_path(&dir);
    let blocklist = Arc::new(Blocklist::new(&path));

    let ips: HashSet<String> = std::iter::repeat_with(common::random_ip)
        .take(16)
        .collect();

    let mut tasks = Vec::new();
    for ip in &ips {
        let blocklist = blocklist.clone();
        let ip = ip.clone();
        tasks.push(tokio::spawn(async move {
            blocklist.add(&ip, "concurrent").await
        }));
    }
    for task in tasks {
        task.await.expect("join").expect("add");
    }

    for ip in &ips {
        assert!(blocklist.is_blocked(ip).await, "lost update for {}", ip);
    }

    // The file on disk holds the union of all surviving adds
    let reloaded = Blocklist::new(&path);
    for ip in &ips {
        assert!(reloaded.is_blocked(ip).await, "file missing {}", ip);
    }
}

#[tokio::test]
async fn write_failure_propagates_to_the_caller() {
    let dir = TempDir::new().expect("tempdir");
    // Pointing the blocklist at a directory makes every save fail
    let blocklist = Blocklist::new(dir.path());

    let result = blocklist.add("10.0.0.1", "manual").await;

    assert!(result.is_err(), "durability errors must not be swallowed");
}
