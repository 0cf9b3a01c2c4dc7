// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The response a stub sends when a configuration is fulfilled.

use serde::{Deserialize, Serialize};

/// One scripted response: what to write to the standard streams, the exit
/// code, and an optional delay before responding.
///
/// `None` stdout/stderr means "write nothing", which is distinct from
/// writing an empty string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub stdout: Option<String>,
    pub stderr: Option<String>,
    pub return_code: i32,
    pub delay_ms: Option<u64>,
}

impl Answer {
    /// An answer with the given exit code and no output.
    pub fn new(return_code: i32) -> Self {
        Self {
            stdout: None,
            stderr: None,
            return_code,
            delay_ms: None,
        }
    }

    pub fn with_stdout(mut self, stdout: impl Into<String>) -> Self {
        self.stdout = Some(stdout.into());
        self
    }

    pub fn with_stderr(mut self, stderr: impl Into<String>) -> Self {
        self.stderr = Some(stderr.into());
        self
    }

    /// Delay the response by the given number of milliseconds, letting tests
    /// exercise slow-command handling in the caller.
    pub fn with_delay_ms(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }
}

#[cfg(test)]
#[path = "answer_tests.rs"]
mod tests;
