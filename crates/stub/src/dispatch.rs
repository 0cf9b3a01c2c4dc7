// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The stub process body.
//!
//! The same logic runs regardless of which command name the process is
//! impersonating: identity comes from `argv[0]`, arguments from `argv[1..]`,
//! stdin from a bounded read. Matching, recording and cursor advancement all
//! happen under the store's exclusive lock so concurrent stub processes never
//! lose an update.

use crate::env;
use crate::store::{
    paths, Answer, CommandInput, EmptyAnswers, Execution, FileStore, Store, StoreError,
};
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::time::sleep;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// How long the dispatcher waits for stdin before treating it as absent.
pub const DEFAULT_STDIN_TIMEOUT: Duration = Duration::from_secs(1);

/// Process exit codes of the dispatcher.
pub mod exit_codes {
    /// Reserved: no stub configuration matched this invocation.
    pub const NO_MATCH: i32 = 255;
    /// Dispatcher-internal failure (storage or log I/O).
    pub const INTERNAL: i32 = 1;
}

/// Errors that abort a dispatch. Fatal to the stub process.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    EmptyAnswers(#[from] EmptyAnswers),
}

/// Result of matching an observed invocation against the plan.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// A configuration matched; deliver this answer.
    Answered(Answer),
    /// Nothing matched. Nothing was recorded; the process exits with
    /// [`exit_codes::NO_MATCH`].
    Unmatched,
}

/// Match `observed` against the persisted plan and record the result.
///
/// The whole read→mutate→write runs under the store's exclusive lock: load
/// the plan, select the first configuration (declaration order) that
/// `observed` fulfills, append the matched execution to the ledger, advance
/// the winner's answer cursor and persist the plan back. First-match, not
/// most-specific-match; overlapping configurations should be declared most
/// specific first.
///
/// When nothing matches, nothing is written: unmatched calls stay invisible
/// to the ledger and surface only through the sentinel exit code.
pub fn dispatch<S: Store>(store: &S, observed: &CommandInput) -> Result<Outcome, DispatchError> {
    let _guard = store.acquire()?;
    let mut plan = store.load_plan()?;

    let Some(configuration) = plan
        .iter_mut()
        .find(|configuration| observed.fulfills(&configuration.input))
    else {
        return Ok(Outcome::Unmatched);
    };

    info!("{observed} fulfills configuration for {}", configuration.input);
    let answer = configuration.next_answer()?.clone();

    let mut execution = Execution::new(observed.clone());
    execution.mark_matched();
    let mut ledger = store.load_ledger()?.unwrap_or_default();
    ledger.push(execution);
    store.save_ledger(&ledger)?;
    store.save_plan(&plan)?;

    Ok(Outcome::Answered(answer))
}

/// Build the observed input from this process's own identity: the basename
/// it was invoked as, its argument vector, and whatever stdin carried.
pub fn observed_input(stdin: Option<String>) -> CommandInput {
    let mut argv = std::env::args();
    let command = argv
        .next()
        .map(|arg0| command_name(&arg0))
        .unwrap_or_default();
    CommandInput::new(command, argv.collect(), stdin)
}

/// The command a stub impersonates is the basename of its invocation name.
pub fn command_name(arg0: &str) -> String {
    Path::new(arg0)
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| arg0.to_string())
}

/// Read stdin to EOF, waiting at most `timeout` overall. Stubs invoked
/// without any input must not hang, so elapsing the bound (or a read
/// failure) yields `None` rather than blocking forever.
pub async fn read_stdin(timeout: Duration) -> Option<String> {
    let mut buffer = String::new();
    let mut stdin = tokio::io::stdin();
    match tokio::time::timeout(timeout, stdin.read_to_string(&mut buffer)).await {
        Ok(Ok(_)) => Some(buffer),
        Ok(Err(error)) => {
            warn!("failed to read stdin: {error}");
            None
        }
        Err(_) => None,
    }
}

/// Deliver an answer: honor the configured delay, write the streams that are
/// present, and hand back the exit code.
pub async fn respond(answer: &Answer) -> i32 {
    if let Some(delay_ms) = answer.delay_ms {
        sleep(Duration::from_millis(delay_ms)).await;
    }

    if let Some(stdout) = &answer.stdout {
        let result = io::stdout()
            .write_all(stdout.as_bytes())
            .and_then(|()| io::stdout().flush());
        if let Err(error) = result {
            warn!("failed to write stdout: {error}");
        }
    }
    if let Some(stderr) = &answer.stderr {
        if let Err(error) = io::stderr().write_all(stderr.as_bytes()) {
            warn!("failed to write stderr: {error}");
        }
    }

    answer.return_code
}

/// The full stub process body. Returns the process exit code.
pub async fn run() -> i32 {
    let root = match env::base_dir().map(Ok).unwrap_or_else(std::env::current_dir) {
        Ok(root) => root,
        Err(error) => {
            eprintln!("shellstub: cannot determine working directory: {error}");
            return exit_codes::INTERNAL;
        }
    };

    let store = FileStore::new(&root);
    if let Err(error) = store.ensure_base_dir() {
        eprintln!("shellstub: {error}");
        return exit_codes::INTERNAL;
    }
    if let Err(error) = init_logging(&root) {
        eprintln!("shellstub: cannot open log file: {error}");
        return exit_codes::INTERNAL;
    }

    let timeout = env::stdin_timeout().unwrap_or(DEFAULT_STDIN_TIMEOUT);
    let observed = observed_input(read_stdin(timeout).await);
    info!("dispatching {observed}");

    match dispatch(&store, &observed) {
        Ok(Outcome::Answered(answer)) => {
            info!("answering with exit code {}", answer.return_code);
            respond(&answer).await
        }
        Ok(Outcome::Unmatched) => {
            error!("{observed} does not fulfill any stub configuration");
            exit_codes::NO_MATCH
        }
        Err(error) => {
            error!("dispatch failed: {error}");
            eprintln!("shellstub: {error}");
            exit_codes::INTERNAL
        }
    }
}

/// Append timestamped diagnostics to the shared log file. Filter from
/// `SHELLSTUB_LOG`, default `info`.
fn init_logging(root: &Path) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(paths::log_path(root))?;
    let filter =
        EnvFilter::try_from_env(env::SHELLSTUB_LOG).unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();
    Ok(())
}

#[cfg(test)]
#[path = "dispatch_tests.rs"]
mod tests;
