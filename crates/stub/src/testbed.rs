// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test harness glue around the core engine.
//!
//! The testbed owns the per-test working directory, links the dispatcher
//! binary under each stubbed command name, and runs the shell command under
//! test with a caller-controlled environment, capturing its output to a
//! numbered file for debugging. Plain I/O only; the interesting behavior
//! lives in [`dispatch`](crate::dispatch), [`fixture`](crate::fixture) and
//! [`verify`](crate::verify).

use crate::env;
use crate::fixture::Fixture;
use crate::store::paths;
use crate::verify::{VerificationError, Verifier};
use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tempfile::TempDir;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TestbedError {
    #[error("testbed I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("stub executable not found; set SHELLSTUB_BIN or link one explicitly")]
    StubExecutableNotFound,
}

/// A per-test working directory with stub wiring.
#[derive(Debug)]
pub struct Testbed {
    root: PathBuf,
    env: HashMap<String, String>,
    command_counter: u32,
    // Owns the directory when the testbed created it; removed on drop.
    _temp: Option<TempDir>,
}

impl Testbed {
    /// A testbed in a fresh temporary directory, removed when dropped.
    pub fn new() -> Result<Self, TestbedError> {
        let temp = tempfile::Builder::new()
            .prefix("integration-test-")
            .tempdir()?;
        Ok(Self {
            root: temp.path().to_path_buf(),
            env: HashMap::new(),
            command_counter: 0,
            _temp: Some(temp),
        })
    }

    /// A testbed over a caller-owned directory; nothing is removed on drop.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            env: HashMap::new(),
            command_counter: 0,
            _temp: None,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the stub links live; put this first on the `PATH` handed to
    /// [`prepare`](Self::prepare).
    pub fn stubs_dir(&self) -> PathBuf {
        paths::stubs_dir(&self.root)
    }

    /// Create the shared directories and link the dispatcher binary (from
    /// `SHELLSTUB_BIN`) under each command name in `stubs`. The environment
    /// becomes the complete environment of every later
    /// [`execute_command`](Self::execute_command).
    pub fn prepare(
        &mut self,
        env: HashMap<String, String>,
        stubs: &[&str],
    ) -> Result<(), TestbedError> {
        let executable = env::stub_executable().ok_or(TestbedError::StubExecutableNotFound)?;
        self.prepare_with_executable(env, stubs, &executable)
    }

    /// Like [`prepare`](Self::prepare) with an explicit dispatcher path.
    pub fn prepare_with_executable(
        &mut self,
        env: HashMap<String, String>,
        stubs: &[&str],
        executable: &Path,
    ) -> Result<(), TestbedError> {
        std::fs::create_dir_all(paths::base_dir(&self.root))?;
        std::fs::create_dir_all(self.stubs_dir())?;
        for command in stubs {
            link_stub(executable, &self.stubs_dir().join(command))?;
        }
        self.env = env;
        Ok(())
    }

    /// Run `sh -c <command>` in the testbed root with exactly the prepared
    /// environment and no stdin. Output is captured to a numbered file under
    /// the shared directory. Returns the exit code.
    pub fn execute_command(&mut self, command: &str) -> Result<i32, TestbedError> {
        let output = Command::new("sh")
            .arg("-c")
            .arg(command)
            .current_dir(&self.root)
            .env_clear()
            .envs(&self.env)
            .stdin(Stdio::null())
            .output()?;

        self.write_output_file(command, &output.stdout, &output.stderr)?;
        self.command_counter += 1;

        Ok(output.status.code().unwrap_or(-1))
    }

    /// A fixture rooted at this testbed.
    pub fn fixture(&self) -> Fixture {
        Fixture::new(&self.root)
    }

    /// A verifier over this testbed's ledger.
    pub fn verifier(&self) -> Result<Verifier, VerificationError> {
        Verifier::open(&self.root)
    }

    fn write_output_file(
        &self,
        command: &str,
        stdout: &[u8],
        stderr: &[u8],
    ) -> Result<(), TestbedError> {
        let filename = format!(
            "{:02}-{}",
            self.command_counter,
            normalize_command_line(command)
        );
        let mut file = std::fs::File::create(paths::base_dir(&self.root).join(filename))?;

        writeln!(file, "--------------- ENVIRONMENT ----------------")?;
        let sorted: BTreeMap<&String, &String> = self.env.iter().collect();
        for (key, value) in sorted {
            writeln!(file, "{key}={value}")?;
        }
        writeln!(file, "----------------- STDOUT -------------------")?;
        file.write_all(stdout)?;
        writeln!(file, "----------------- STDERR -------------------")?;
        file.write_all(stderr)?;
        Ok(())
    }
}

/// Make the shell command line usable as a file name.
fn normalize_command_line(command: &str) -> String {
    command.replace([' ', '*', '?', ':', '/'], "_")
}

#[cfg(unix)]
fn link_stub(executable: &Path, link: &Path) -> io::Result<()> {
    if link.exists() {
        std::fs::remove_file(link)?;
    }
    std::os::unix::fs::symlink(executable, link)
}

#[cfg(not(unix))]
fn link_stub(executable: &Path, link: &Path) -> io::Result<()> {
    std::fs::copy(executable, link).map(|_| ())
}

#[cfg(test)]
#[path = "testbed_tests.rs"]
mod tests;
