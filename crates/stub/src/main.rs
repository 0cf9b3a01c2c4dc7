// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Stub dispatcher binary entry point.
//!
//! This binary is linked under the name of every stubbed command; it answers
//! as whatever command it was invoked as.

#[tokio::main]
async fn main() {
    let code = shellstub::dispatch::run().await;
    std::process::exit(code);
}
