// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Observed or expected parameters of a stub invocation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything a stub process receives on one invocation: the command name it
/// was invoked as, the argument vector, and the text read from stdin.
///
/// The same type doubles as the *pattern* side of a [`StubConfiguration`]
/// (see [`CommandInput::fulfills`]), where a `None` stdin acts as a wildcard.
///
/// [`StubConfiguration`]: crate::StubConfiguration
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInput {
    pub command: String,
    pub arguments: Vec<String>,
    pub stdin: Option<String>,
}

impl CommandInput {
    pub fn new(
        command: impl Into<String>,
        arguments: Vec<String>,
        stdin: Option<String>,
    ) -> Self {
        Self {
            command: command.into(),
            arguments,
            stdin,
        }
    }

    /// Tests whether this (observed) input satisfies the given pattern.
    ///
    /// The command name must match exactly. A pattern without stdin matches
    /// any stdin; a pattern with stdin requires exact equality. Every pattern
    /// argument must be present somewhere in the observed arguments: subset
    /// containment, order-independent. Deliberately a "contains at least"
    /// match: a configuration may constrain only the arguments it cares
    /// about.
    pub fn fulfills(&self, pattern: &CommandInput) -> bool {
        if self.command != pattern.command {
            return false;
        }

        if let Some(expected_stdin) = &pattern.stdin {
            if self.stdin.as_ref() != Some(expected_stdin) {
                return false;
            }
        }

        pattern
            .arguments
            .iter()
            .all(|argument| self.arguments.contains(argument))
    }
}

impl fmt::Display for CommandInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.command)?;
        if !self.arguments.is_empty() {
            write!(f, " with arguments {:?}", self.arguments)?;
        }
        if let Some(stdin) = &self.stdin {
            write!(f, " and stdin {:?}", stdin)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "input_tests.rs"]
mod tests;
