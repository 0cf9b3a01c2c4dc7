// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chainable checks over one verified execution.

use super::VerificationError;
use crate::store::CommandInput;
use regex::Regex;

/// Returned by [`Verifier::called`](super::Verifier::called); every check
/// returns `Result<&Self>` so checks chain with `?`:
///
/// ```no_run
/// # fn demo(verifier: &mut shellstub::Verifier) -> Result<(), shellstub::VerificationError> {
/// verifier
///     .called("git")?
///     .at_least_with_arguments(&["clone", "repo"])?
///     .with_input("")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct CalledAssertion {
    input: CommandInput,
}

impl CalledAssertion {
    pub(super) fn new(input: CommandInput) -> Self {
        Self { input }
    }

    /// The verified call's input, for ad-hoc checks.
    pub fn input(&self) -> &CommandInput {
        &self.input
    }

    /// The call's arguments must equal `expected` exactly, in order.
    pub fn with_arguments(&self, expected: &[&str]) -> Result<&Self, VerificationError> {
        if self.input.arguments != expected {
            return Err(VerificationError::ArgumentsMismatch {
                command: self.input.command.clone(),
                expected: owned(expected),
                actual: self.input.arguments.clone(),
            });
        }
        Ok(self)
    }

    /// Every given argument must be present in the call, in any position:
    /// the same subset containment the dispatcher matches with.
    pub fn at_least_with_arguments(&self, expected: &[&str]) -> Result<&Self, VerificationError> {
        let missing = expected
            .iter()
            .any(|argument| !self.input.arguments.iter().any(|actual| actual == argument));
        if missing {
            return Err(VerificationError::MissingArguments {
                command: self.input.command.clone(),
                expected: owned(expected),
                actual: self.input.arguments.clone(),
            });
        }
        Ok(self)
    }

    /// The call's stdin must equal `expected` exactly.
    pub fn with_input(&self, expected: &str) -> Result<&Self, VerificationError> {
        if self.input.stdin.as_deref() != Some(expected) {
            return Err(VerificationError::StdinMismatch {
                command: self.input.command.clone(),
                expected: expected.to_string(),
                actual: self.input.stdin.clone(),
            });
        }
        Ok(self)
    }

    /// Some argument must match the given regular expression. The pattern is
    /// unanchored; use `^` for prefix semantics.
    pub fn at_least_one_argument_matches(
        &self,
        pattern: &str,
    ) -> Result<&Self, VerificationError> {
        let regex = Regex::new(pattern)?;
        if self
            .input
            .arguments
            .iter()
            .any(|argument| regex.is_match(argument))
        {
            Ok(self)
        } else {
            Err(VerificationError::NoArgumentMatches {
                command: self.input.command.clone(),
                pattern: pattern.to_string(),
                arguments: self.input.arguments.clone(),
            })
        }
    }
}

fn owned(arguments: &[&str]) -> Vec<String> {
    arguments.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
#[path = "assertion_tests.rs"]
mod tests;
