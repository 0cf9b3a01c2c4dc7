// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn starts_unmatched() {
    let execution = Execution::new(CommandInput::new("git", vec![], None));
    assert!(!execution.matched);
}

#[test]
fn mark_matched_sets_the_flag() {
    let mut execution = Execution::new(CommandInput::new("git", vec![], None));
    execution.mark_matched();
    assert!(execution.matched);
}

#[test]
fn display_includes_the_input() {
    let execution = Execution::new(CommandInput::new(
        "git",
        vec!["clone".to_string()],
        None,
    ));
    let rendered = execution.to_string();
    assert!(rendered.contains("git"));
    assert!(rendered.contains("clone"));
}

#[test]
fn serde_round_trip() {
    let mut execution = Execution::new(CommandInput::new(
        "git",
        vec!["clone".to_string()],
        Some("in".to_string()),
    ));
    execution.mark_matched();

    let json = serde_json::to_string(&execution).unwrap();
    let decoded: Execution = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, execution);
}
