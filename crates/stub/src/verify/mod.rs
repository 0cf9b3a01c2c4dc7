// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verifying recorded executions after the test run.
//!
//! The verifier consumes the ledger as a FIFO queue: each
//! [`called`](Verifier::called) pops the oldest execution and returns an
//! assertion value over it. Closing the verifier fails when entries remain
//! unconsumed, so a test must account for every stubbed call that happened.

mod assertion;

pub use assertion::CalledAssertion;

use crate::store::{Execution, FileStore, Store, StoreError};
use std::collections::VecDeque;
use std::fmt::Write as _;
use std::path::Path;
use thiserror::Error;

/// Verification failures, carrying the expected vs. actual call.
#[derive(Debug, Error)]
pub enum VerificationError {
    #[error("no executions recorded: stubbed commands were never called")]
    LedgerMissing,

    #[error("unexpected {0}: did not fulfill any stub configuration")]
    UnexpectedExecution(Execution),

    #[error("no further executions: command \"{command}\" cannot be verified")]
    NothingLeft { command: String },

    #[error("expected command \"{expected}\", but the next execution was of {actual}")]
    CommandMismatch {
        expected: String,
        actual: Execution,
    },

    #[error(
        "stub \"{command}\" has not been executed with expected arguments {expected:?}, but with {actual:?}"
    )]
    ArgumentsMismatch {
        command: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error(
        "stub \"{command}\" has not been executed with at least expected arguments {expected:?}, but with {actual:?}"
    )]
    MissingArguments {
        command: String,
        expected: Vec<String>,
        actual: Vec<String>,
    },

    #[error("stub \"{command}\" has not received the expected input {expected:?}, but got {actual:?}")]
    StdinMismatch {
        command: String,
        expected: String,
        actual: Option<String>,
    },

    #[error(
        "stub \"{command}\" has no argument matching pattern \"{pattern}\", got arguments {arguments:?}"
    )]
    NoArgumentMatches {
        command: String,
        pattern: String,
        arguments: Vec<String>,
    },

    #[error("invalid argument pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("{}", unverified_listing(.0))]
    Unverified(Vec<Execution>),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ordered consumption over the recorded executions.
#[derive(Debug)]
pub struct Verifier {
    executions: VecDeque<Execution>,
}

impl Verifier {
    /// Load the ledger from the per-test working directory.
    ///
    /// Fails when the ledger file does not exist (nothing was ever invoked)
    /// and when any recorded execution is unmatched: an invocation that
    /// satisfied no configuration is always a hard verification failure,
    /// whether or not the test tries to verify that call.
    pub fn open(root: &Path) -> Result<Self, VerificationError> {
        Self::load(&FileStore::new(root))
    }

    /// Like [`open`](Self::open) for an injected store.
    pub fn load<S: Store>(store: &S) -> Result<Self, VerificationError> {
        let Some(executions) = store.load_ledger()? else {
            return Err(VerificationError::LedgerMissing);
        };

        if let Some(unmatched) = executions.iter().find(|execution| !execution.matched) {
            return Err(VerificationError::UnexpectedExecution(unmatched.clone()));
        }

        Ok(Self {
            executions: executions.into(),
        })
    }

    /// Pop the oldest execution; it must be of `command`. The returned
    /// assertion checks arguments and stdin of that call.
    pub fn called(&mut self, command: &str) -> Result<CalledAssertion, VerificationError> {
        let Some(execution) = self.executions.pop_front() else {
            return Err(VerificationError::NothingLeft {
                command: command.to_string(),
            });
        };

        if execution.input.command != command {
            return Err(VerificationError::CommandMismatch {
                expected: command.to_string(),
                actual: execution,
            });
        }

        Ok(CalledAssertion::new(execution.input))
    }

    /// A new, independent verifier over the remaining executions that carry
    /// an argument starting with `prefix`, order preserved.
    ///
    /// The filtered view is a snapshot: consuming from it does not remove
    /// entries here. Useful for verifying interleaved calls to the same
    /// command in isolation, without forcing one total order.
    pub fn filter_by_argument(&self, prefix: &str) -> Verifier {
        Verifier {
            executions: self
                .executions
                .iter()
                .filter(|execution| {
                    execution
                        .input
                        .arguments
                        .iter()
                        .any(|argument| argument.starts_with(prefix))
                })
                .cloned()
                .collect(),
        }
    }

    /// Discard all remaining executions without asserting anything about
    /// them, an explicit opt-out of per-call verification.
    pub fn finished(&mut self) {
        self.executions.clear();
    }

    pub fn remaining(&self) -> usize {
        self.executions.len()
    }

    /// End the verification scope. Fails with a listing of every unverified
    /// execution when any remain.
    pub fn close(self) -> Result<(), VerificationError> {
        if self.executions.is_empty() {
            Ok(())
        } else {
            Err(VerificationError::Unverified(self.executions.into()))
        }
    }
}

/// Scoped verification: open the ledger, run the closure, and enforce that
/// every execution was consumed, but only when the closure itself
/// succeeded, so its error is never masked by the leftover check.
pub fn verify<T>(
    root: &Path,
    check: impl FnOnce(&mut Verifier) -> Result<T, VerificationError>,
) -> Result<T, VerificationError> {
    let mut verifier = Verifier::open(root)?;
    let value = check(&mut verifier)?;
    verifier.close()?;
    Ok(value)
}

fn unverified_listing(executions: &[Execution]) -> String {
    let mut message = if executions.len() == 1 {
        "there is an unverified execution:\n".to_string()
    } else {
        format!("there are {} unverified executions:\n", executions.len())
    };
    for execution in executions {
        let _ = writeln!(message, "    {execution}");
    }
    message
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
