// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Programmable shell command stubs for integration testing.
//!
//! A test declares which commands may be called and what each call should
//! answer, runs a shell command that invokes the stubbed names, and then
//! verifies that exactly the expected calls occurred, in order. Every stub
//! invocation is a fresh OS process routed to the one dispatcher binary; all
//! coordination happens through files in a per-test working directory.
//!
//! ```no_run
//! use shellstub::{fixture, verify, Testbed};
//! use std::collections::HashMap;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut testbed = Testbed::new()?;
//! let env = HashMap::from([(
//!     "PATH".to_string(),
//!     format!("{}:/usr/bin:/bin", testbed.stubs_dir().display()),
//! )]);
//! testbed.prepare(env, &["git"])?;
//!
//! fixture(testbed.root(), |f| {
//!     f.calling("git").with_arguments(&["clone", "repo"]).then_return(0);
//!     Ok(())
//! })?;
//!
//! assert_eq!(testbed.execute_command("git clone repo --depth 1")?, 0);
//!
//! verify(testbed.root(), |v| {
//!     v.called("git")?.at_least_with_arguments(&["clone", "repo"])?;
//!     Ok(())
//! })?;
//! # Ok(())
//! # }
//! ```

pub mod dispatch;
pub mod env;
pub mod fixture;
pub mod testbed;
pub mod verify;

/// Re-exported storage and data-model types from the shellstub-store crate.
pub mod store {
    pub use shellstub_store::{
        paths, Answer, CommandInput, EmptyAnswers, Execution, FileLock, FileStore, MemoryStore,
        Store, StoreError, StubConfiguration,
    };
}

pub use fixture::{fixture, Fixture, FixtureError};
pub use store::{Answer, CommandInput, Execution, StubConfiguration};
pub use testbed::{Testbed, TestbedError};
pub use verify::{verify, CalledAssertion, VerificationError, Verifier};
