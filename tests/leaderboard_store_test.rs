//! Tests for the file-backed leaderboard store.

use noughts::{LeaderboardStore, PlayerName, Scores};
use std::fs;
use tempfile::TempDir;

/// Returns the directory guard (must stay in scope) and a store inside it.
fn setup_store() -> (TempDir, LeaderboardStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = LeaderboardStore::new(dir.path().join("leaderboard.txt"));
    (dir, store)
}

fn scores(entries: &[(&str, i64)]) -> Scores {
    entries.iter().map(|(k, v)| (k.to_string(), *v)).collect()
}

#[test]
fn test_load_missing_file_is_empty() {
    let (_dir, store) = setup_store();
    assert!(store.load().is_empty());
}

#[test]
fn test_load_empty_file_is_empty() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), "  \n").unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn test_load_corrupt_file_is_empty() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), "not json").unwrap();
    assert!(store.load().is_empty());

    fs::write(store.path(), "[1, 2, 3]").unwrap();
    assert!(store.load().is_empty());

    fs::write(store.path(), "42").unwrap();
    assert!(store.load().is_empty());
}

#[test]
fn test_load_skips_non_integer_scores() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), r#"{"Ann": 1, "Bob": 2.0, "Cy": "lots", "Di": null}"#).unwrap();
    assert_eq!(store.load(), scores(&[("Ann", 1)]));
}

#[test]
fn test_save_keeps_integer_scores_next_to_bad_ones() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), r#"{"Ann":1,"Bob":2.0}"#).unwrap();

    store.save(&PlayerName::new("Cy").unwrap(), 0).unwrap();
    assert_eq!(store.load(), scores(&[("Ann", 1), ("Cy", 0)]));
}

#[test]
fn test_merge_overwrites_not_accumulates() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), r#"{"Ann": 1}"#).unwrap();

    let merged = store.merge_all(scores(&[("Bob", -1)])).unwrap();
    assert_eq!(merged, scores(&[("Ann", 1), ("Bob", -1)]));

    let merged = store.merge_all(scores(&[("Ann", 0)])).unwrap();
    assert_eq!(merged, scores(&[("Ann", 0), ("Bob", -1)]));
    assert_eq!(store.load(), merged);
}

#[test]
fn test_save_creates_and_overwrites() {
    let (_dir, store) = setup_store();
    let ann = PlayerName::new("Ann").unwrap();

    store.save(&ann, 1).unwrap();
    assert_eq!(store.load(), scores(&[("Ann", 1)]));

    store.save(&ann, -1).unwrap();
    assert_eq!(store.load(), scores(&[("Ann", -1)]));
}

#[test]
fn test_save_over_corrupt_file_starts_fresh() {
    let (_dir, store) = setup_store();
    fs::write(store.path(), "{{{").unwrap();
    store.save(&PlayerName::new("Cy").unwrap(), 0).unwrap();
    assert_eq!(store.load(), scores(&[("Cy", 0)]));
}

#[test]
fn test_document_is_a_json_object() {
    let (_dir, store) = setup_store();
    store.merge_all(scores(&[("Ann", 1), ("Bob", -1)])).unwrap();
    let text = fs::read_to_string(store.path()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, serde_json::json!({"Ann": 1, "Bob": -1}));
}

#[test]
fn test_write_failure_is_reported() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be written as a file.
    let board_dir = dir.path().join("leaderboard");
    fs::create_dir(&board_dir).unwrap();
    let store = LeaderboardStore::new(&board_dir);
    let result = store.save(&PlayerName::new("Ann").unwrap(), 1);
    let err = result.unwrap_err();
    assert!(err.message.contains("Failed to write"));
    assert!(store.load().is_empty());
}

#[test]
fn test_save_leaves_no_staging_file() {
    let (dir, store) = setup_store();
    store.save(&PlayerName::new("Ann").unwrap(), 1).unwrap();
    store.save(&PlayerName::new("Bob").unwrap(), 0).unwrap();

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["leaderboard.txt"]);
}

#[test]
fn test_failed_write_keeps_previous_document() {
    let (dir, store) = setup_store();
    fs::write(store.path(), r#"{"Ann": 1}"#).unwrap();
    // Block the staging file so the write fails before the rename.
    fs::create_dir(dir.path().join("leaderboard.txt.tmp")).unwrap();

    let result = store.save(&PlayerName::new("Bob").unwrap(), -1);
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(store.path()).unwrap(), r#"{"Ann": 1}"#);
    assert_eq!(store.load(), scores(&[("Ann", 1)]));
}
