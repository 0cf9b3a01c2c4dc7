// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use crate::{Answer, CommandInput};
use std::io::ErrorKind;

fn plan_entry(command: &str) -> StubConfiguration {
    let mut config = StubConfiguration::new(CommandInput::new(command, Vec::new(), None));
    config.then(Answer::new(0));
    config
}

fn file_store() -> (tempfile::TempDir, FileStore) {
    let temp = tempfile::tempdir().unwrap();
    let store = FileStore::new(temp.path());
    store.ensure_base_dir().unwrap();
    (temp, store)
}

#[test]
fn plan_round_trips_through_the_file() {
    let (_temp, store) = file_store();
    let plan = vec![plan_entry("git"), plan_entry("svn")];

    store.save_plan(&plan).unwrap();
    assert_eq!(store.load_plan().unwrap(), plan);
}

#[test]
fn plan_file_is_pretty_printed() {
    let (temp, store) = file_store();
    store.save_plan(&[plan_entry("git")]).unwrap();

    let content = std::fs::read_to_string(paths::plan_path(temp.path())).unwrap();
    assert!(content.contains("\n  "));
    assert!(content.ends_with('\n'));
}

#[test]
fn missing_plan_is_an_io_error() {
    let (_temp, store) = file_store();
    match store.load_plan().unwrap_err() {
        StoreError::Io(error) => assert_eq!(error.kind(), ErrorKind::NotFound),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn malformed_plan_reports_the_path() {
    let (temp, store) = file_store();
    std::fs::write(paths::plan_path(temp.path()), "not json").unwrap();

    match store.load_plan().unwrap_err() {
        StoreError::Codec { path, .. } => {
            assert_eq!(path, paths::plan_path(temp.path()));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn ledger_is_none_until_first_save() {
    let (_temp, store) = file_store();
    assert!(store.load_ledger().unwrap().is_none());

    store.save_ledger(&[]).unwrap();
    assert_eq!(store.load_ledger().unwrap(), Some(Vec::new()));
}

#[test]
fn save_replaces_the_whole_file() {
    let (temp, store) = file_store();
    store.save_plan(&[plan_entry("git"), plan_entry("svn")]).unwrap();
    store.save_plan(&[plan_entry("git")]).unwrap();

    let reloaded = store.load_plan().unwrap();
    assert_eq!(reloaded.len(), 1);

    // No stale trailing bytes from the larger first write.
    let content = std::fs::read_to_string(paths::plan_path(temp.path())).unwrap();
    assert_eq!(serde_json::from_str::<Vec<StubConfiguration>>(&content).unwrap().len(), 1);
}

#[test]
fn memory_store_mirrors_file_semantics() {
    let store = MemoryStore::new();
    assert!(store.load_ledger().unwrap().is_none());

    store.save_plan(&[plan_entry("git")]).unwrap();
    assert_eq!(store.load_plan().unwrap().len(), 1);

    store
        .save_ledger(&[Execution::new(CommandInput::new("git", vec![], None))])
        .unwrap();
    assert_eq!(store.load_ledger().unwrap().unwrap().len(), 1);
}

#[test]
fn memory_store_guard_is_exclusive() {
    use std::sync::mpsc;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    let store = Arc::new(MemoryStore::new());
    let guard = store.acquire().unwrap();

    let (tx, rx) = mpsc::channel();
    let contender_store = Arc::clone(&store);
    let contender = thread::spawn(move || {
        let _guard = contender_store.acquire().unwrap();
        tx.send(()).unwrap();
    });

    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    drop(guard);
    rx.recv_timeout(Duration::from_secs(5)).unwrap();
    contender.join().unwrap();
}
