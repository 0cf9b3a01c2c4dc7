// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declaring expectations before the test run.
//!
//! A [`Fixture`] accumulates stub configurations and persists them as the
//! plan in one explicit [`commit`](Fixture::commit). The scoped helper
//! [`fixture`] mirrors a `with`-block: the plan is written only when the
//! closure succeeds, so an error (or panic) during setup leaves no plan
//! behind and propagates unmasked.

use crate::store::{CommandInput, FileStore, Store, StoreError, StubConfiguration};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while persisting the plan.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Builder for the test's plan: the ordered list of stub configurations.
///
/// Declaration order matters: the dispatcher answers with the first
/// fulfilled configuration, so declare more specific expectations first when
/// patterns overlap.
#[derive(Debug)]
pub struct Fixture {
    root: PathBuf,
    configurations: Vec<StubConfiguration>,
}

impl Fixture {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            configurations: Vec::new(),
        }
    }

    /// Register an expectation for `command` with the given argument pattern
    /// and stdin constraint (`None` matches any stdin). Returns the new
    /// configuration for chaining `then_*` answers.
    pub fn expect(
        &mut self,
        command: &str,
        arguments: &[&str],
        stdin: Option<&str>,
    ) -> &mut StubConfiguration {
        let input = CommandInput::new(
            command,
            arguments.iter().map(|s| (*s).to_string()).collect(),
            stdin.map(str::to_string),
        );
        self.push(StubConfiguration::new(input))
    }

    /// Register an expectation for `command` with no constraints yet;
    /// constrain and answer it through the returned configuration.
    pub fn calling(&mut self, command: &str) -> &mut StubConfiguration {
        self.push(StubConfiguration::new(CommandInput::new(
            command,
            Vec::new(),
            None,
        )))
    }

    pub fn configurations(&self) -> &[StubConfiguration] {
        &self.configurations
    }

    /// Persist the registered configurations as the plan, replacing any
    /// prior plan file. Every test run starts from a fresh plan.
    pub fn commit(self) -> Result<(), FixtureError> {
        let store = FileStore::new(&self.root);
        store.ensure_base_dir()?;
        store.save_plan(&self.configurations)?;
        Ok(())
    }

    fn push(&mut self, configuration: StubConfiguration) -> &mut StubConfiguration {
        self.configurations.push(configuration);
        let last = self.configurations.len() - 1;
        &mut self.configurations[last]
    }
}

/// Scoped expectation declaration: build the fixture in the closure; the
/// plan is committed only when the closure returns `Ok`.
pub fn fixture<T>(
    root: &Path,
    build: impl FnOnce(&mut Fixture) -> Result<T, FixtureError>,
) -> Result<T, FixtureError> {
    let mut fixture = Fixture::new(root);
    let value = build(&mut fixture)?;
    fixture.commit()?;
    Ok(value)
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
