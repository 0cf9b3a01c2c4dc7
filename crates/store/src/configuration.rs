// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! A command pattern with its scripted answer sequence.

use crate::answer::Answer;
use crate::input::CommandInput;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised by [`StubConfiguration::next_answer`] when no answer was ever
/// declared, a programming error in the test setup. Reported fail-fast.
#[derive(Debug, Error)]
#[error("stub configuration for command \"{command}\" has no answers")]
pub struct EmptyAnswers {
    pub command: String,
}

/// One declared expectation: an input pattern, an ordered answer sequence,
/// and a cursor into that sequence.
///
/// The cursor advances on every [`next_answer`](Self::next_answer) call until
/// it parks on the last answer, which is then repeated forever (the "sticky
/// tail"). The dispatcher persists the mutated cursor back to storage so
/// successive stub processes continue the sequence.
///
/// Invariant: `cursor` stays within `0..answers.len()` once any answer
/// exists.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StubConfiguration {
    pub input: CommandInput,
    answers: Vec<Answer>,
    cursor: usize,
}

impl StubConfiguration {
    pub fn new(input: CommandInput) -> Self {
        Self {
            input,
            answers: Vec::new(),
            cursor: 0,
        }
    }

    /// Replace the pattern's argument list. Returns `self` for chaining.
    pub fn with_arguments(&mut self, arguments: &[&str]) -> &mut Self {
        self.input.arguments = arguments.iter().map(|s| (*s).to_string()).collect();
        self
    }

    /// Constrain the pattern's stdin to an exact value. Returns `self` for
    /// chaining; without this the configuration matches any stdin.
    pub fn with_input(&mut self, stdin: impl Into<String>) -> &mut Self {
        self.input.stdin = Some(stdin.into());
        self
    }

    /// Append an answer to the sequence. Returns `self` for chaining.
    pub fn then(&mut self, answer: Answer) -> &mut Self {
        self.answers.push(answer);
        self
    }

    /// Convenience for [`then`](Self::then) building the answer in place.
    pub fn then_answer(
        &mut self,
        stdout: Option<&str>,
        stderr: Option<&str>,
        return_code: i32,
    ) -> &mut Self {
        self.then(Answer {
            stdout: stdout.map(str::to_string),
            stderr: stderr.map(str::to_string),
            return_code,
            delay_ms: None,
        })
    }

    /// Append an answer that only sets the exit code.
    pub fn then_return(&mut self, return_code: i32) -> &mut Self {
        self.then(Answer::new(return_code))
    }

    /// Append an answer that writes output and exits 0.
    pub fn then_write(&mut self, stdout: Option<&str>, stderr: Option<&str>) -> &mut Self {
        self.then_answer(stdout, stderr, 0)
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Return the current answer and advance the cursor; once the sequence is
    /// exhausted the last answer is returned on every further call.
    pub fn next_answer(&mut self) -> Result<&Answer, EmptyAnswers> {
        if self.answers.is_empty() {
            return Err(EmptyAnswers {
                command: self.input.command.clone(),
            });
        }

        // Clamp defends against a cursor past the end in a hand-edited file.
        let index = self.cursor.min(self.answers.len() - 1);
        self.cursor = (index + 1).min(self.answers.len() - 1);
        Ok(&self.answers[index])
    }
}

#[cfg(test)]
#[path = "configuration_tests.rs"]
mod tests;
