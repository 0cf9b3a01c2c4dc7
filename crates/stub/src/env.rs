// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables used by shellstub are defined here.
//! Use these accessors instead of calling `std::env::var()` directly.

use std::path::PathBuf;
use std::time::Duration;

/// `SHELLSTUB_BASE_DIR` — per-test working directory override for the
/// dispatcher (default: the process working directory).
pub const SHELLSTUB_BASE_DIR: &str = "SHELLSTUB_BASE_DIR";

/// `SHELLSTUB_STDIN_TIMEOUT_MS` — how long the dispatcher waits for stdin.
pub const SHELLSTUB_STDIN_TIMEOUT_MS: &str = "SHELLSTUB_STDIN_TIMEOUT_MS";

/// `SHELLSTUB_BIN` — path to the dispatcher binary, used by the testbed when
/// linking stubs.
pub const SHELLSTUB_BIN: &str = "SHELLSTUB_BIN";

/// `SHELLSTUB_LOG` — tracing filter directive for the dispatcher log.
pub const SHELLSTUB_LOG: &str = "SHELLSTUB_LOG";

/// `SHELLSTUB_BASE_DIR` as a path.
pub fn base_dir() -> Option<PathBuf> {
    std::env::var(SHELLSTUB_BASE_DIR).ok().map(PathBuf::from)
}

/// `SHELLSTUB_STDIN_TIMEOUT_MS` as a duration. Unparseable values are
/// ignored.
pub fn stdin_timeout() -> Option<Duration> {
    var_u64(SHELLSTUB_STDIN_TIMEOUT_MS).map(Duration::from_millis)
}

/// `SHELLSTUB_BIN` as a path.
pub fn stub_executable() -> Option<PathBuf> {
    std::env::var(SHELLSTUB_BIN).ok().map(PathBuf::from)
}

fn var_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|value| value.parse().ok())
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
