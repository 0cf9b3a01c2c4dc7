// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! One observed stub invocation, as recorded in the ledger.

use crate::input::CommandInput;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A stub invocation that actually happened. Created unmatched; the
/// dispatcher marks it matched exactly when a configuration fulfilled it.
/// Appended to the ledger once and never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Execution {
    pub input: CommandInput,
    pub matched: bool,
}

impl Execution {
    pub fn new(input: CommandInput) -> Self {
        Self {
            input,
            matched: false,
        }
    }

    pub fn mark_matched(&mut self) {
        self.matched = true;
    }
}

impl fmt::Display for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "execution of {}", self.input)
    }
}

#[cfg(test)]
#[path = "execution_tests.rs"]
mod tests;
