// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Storage for the plan and the ledger.
//!
//! The [`Store`] trait is the narrow interface the dispatch logic works
//! against: acquire the exclusive lock, load, save. [`FileStore`] is the real
//! thing: pretty-printed JSON files guarded by a cross-process file lock.
//! [`MemoryStore`] is the in-process fake for unit tests, with a mutex
//! standing in for the file lock.

use crate::configuration::StubConfiguration;
use crate::execution::Execution;
use crate::lock::FileLock;
use crate::paths;
use parking_lot::{Mutex, MutexGuard};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the storage layer. Fatal to the dispatcher process.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("malformed JSON in {path}: {source}")]
    Codec {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Shared plan/ledger storage.
///
/// The lock returned by [`acquire`](Self::acquire) must cover the full
/// read→mutate→write sequence of a dispatch; load/save calls made while no
/// guard is alive are only safe when no concurrent writer can exist (the
/// fixture before the run, the verifier after it).
pub trait Store {
    type Guard<'a>
    where
        Self: 'a;

    /// Block until the store's exclusive lock is granted. Released when the
    /// guard drops.
    fn acquire(&self) -> Result<Self::Guard<'_>, StoreError>;

    fn load_plan(&self) -> Result<Vec<StubConfiguration>, StoreError>;

    /// Whole-file replace of the plan.
    fn save_plan(&self, plan: &[StubConfiguration]) -> Result<(), StoreError>;

    /// `Ok(None)` when the ledger was never written, distinct from an empty
    /// ledger, so a run without any matched invocation stays detectable.
    fn load_ledger(&self) -> Result<Option<Vec<Execution>>, StoreError>;

    /// Whole-file replace of the ledger.
    fn save_ledger(&self, ledger: &[Execution]) -> Result<(), StoreError>;
}

/// File-backed store rooted at a per-test working directory.
#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the shared state directory. Idempotent; concurrent dispatchers
    /// may race on this and all must succeed.
    pub fn ensure_base_dir(&self) -> Result<(), StoreError> {
        std::fs::create_dir_all(paths::base_dir(&self.root))?;
        Ok(())
    }
}

impl Store for FileStore {
    type Guard<'a>
        = FileLock
    where
        Self: 'a;

    fn acquire(&self) -> Result<FileLock, StoreError> {
        Ok(FileLock::acquire(&paths::lock_path(&self.root))?)
    }

    fn load_plan(&self) -> Result<Vec<StubConfiguration>, StoreError> {
        read_json(&paths::plan_path(&self.root))
    }

    fn save_plan(&self, plan: &[StubConfiguration]) -> Result<(), StoreError> {
        write_json(&paths::plan_path(&self.root), &plan)
    }

    fn load_ledger(&self) -> Result<Option<Vec<Execution>>, StoreError> {
        let path = paths::ledger_path(&self.root);
        if !path.exists() {
            return Ok(None);
        }
        read_json(&path).map(Some)
    }

    fn save_ledger(&self, ledger: &[Execution]) -> Result<(), StoreError> {
        write_json(&paths::ledger_path(&self.root), &ledger)
    }
}

/// In-memory store for unit-testing the dispatch logic without a filesystem.
#[derive(Debug, Default)]
pub struct MemoryStore {
    lock: Mutex<()>,
    plan: Mutex<Vec<StubConfiguration>>,
    ledger: Mutex<Option<Vec<Execution>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_plan(plan: Vec<StubConfiguration>) -> Self {
        Self {
            lock: Mutex::new(()),
            plan: Mutex::new(plan),
            ledger: Mutex::new(None),
        }
    }
}

impl Store for MemoryStore {
    type Guard<'a>
        = MutexGuard<'a, ()>
    where
        Self: 'a;

    fn acquire(&self) -> Result<MutexGuard<'_, ()>, StoreError> {
        Ok(self.lock.lock())
    }

    fn load_plan(&self) -> Result<Vec<StubConfiguration>, StoreError> {
        Ok(self.plan.lock().clone())
    }

    fn save_plan(&self, plan: &[StubConfiguration]) -> Result<(), StoreError> {
        *self.plan.lock() = plan.to_vec();
        Ok(())
    }

    fn load_ledger(&self) -> Result<Option<Vec<Execution>>, StoreError> {
        Ok(self.ledger.lock().clone())
    }

    fn save_ledger(&self, ledger: &[Execution]) -> Result<(), StoreError> {
        *self.ledger.lock() = Some(ledger.to_vec());
        Ok(())
    }
}

/// Decode a JSON file, attaching the path to parse failures.
fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let content = std::fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|source| StoreError::Codec {
        path: path.to_path_buf(),
        source,
    })
}

/// Encode pretty-printed JSON (stable key order, indented, diffable when a
/// test fails) and replace the whole file. Never patches in place.
fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let mut content = serde_json::to_string_pretty(value).map_err(|source| StoreError::Codec {
        path: path.to_path_buf(),
        source,
    })?;
    content.push('\n');
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
#[path = "store_tests.rs"]
mod tests;
