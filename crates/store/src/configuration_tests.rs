// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

fn configuration(command: &str) -> StubConfiguration {
    StubConfiguration::new(CommandInput::new(command, Vec::new(), None))
}

#[test]
fn next_answer_advances_then_sticks_on_the_tail() {
    let mut config = configuration("build");
    config.then_return(1).then_return(2).then_return(3);

    let codes: Vec<i32> = (0..5)
        .map(|_| config.next_answer().unwrap().return_code)
        .collect();
    assert_eq!(codes, vec![1, 2, 3, 3, 3]);
}

#[test]
fn single_answer_repeats_forever() {
    let mut config = configuration("build");
    config.then_return(7);

    for _ in 0..3 {
        assert_eq!(config.next_answer().unwrap().return_code, 7);
        assert_eq!(config.cursor(), 0);
    }
}

#[test]
fn next_answer_without_answers_fails_fast() {
    let mut config = configuration("build");
    let error = config.next_answer().unwrap_err();
    assert!(error.to_string().contains("build"));
    assert!(error.to_string().contains("no answers"));
}

#[test]
fn out_of_range_cursor_is_clamped_to_the_tail() {
    // A hand-edited plan file may carry a cursor past the end.
    let mut config = configuration("build");
    config.then_return(1).then_return(2);
    let json = serde_json::to_string(&config).unwrap().replace(
        "\"cursor\":0",
        "\"cursor\":9",
    );
    let mut decoded: StubConfiguration = serde_json::from_str(&json).unwrap();

    assert_eq!(decoded.next_answer().unwrap().return_code, 2);
    assert_eq!(decoded.cursor(), 1);
}

#[test]
fn fluent_chain_builds_pattern_and_answers() {
    let mut config = configuration("git");
    config
        .with_arguments(&["clone", "repo"])
        .with_input("data")
        .then_write(Some("done"), None)
        .then_return(1);

    assert_eq!(config.input.arguments, vec!["clone", "repo"]);
    assert_eq!(config.input.stdin.as_deref(), Some("data"));
    assert_eq!(config.answers().len(), 2);
    assert_eq!(config.answers()[0].stdout.as_deref(), Some("done"));
    assert_eq!(config.answers()[0].return_code, 0);
    assert_eq!(config.answers()[1].return_code, 1);
}

#[test]
fn then_answer_keeps_absent_streams_absent() {
    let mut config = configuration("git");
    config.then_answer(None, Some("warning"), 2);

    let answer = &config.answers()[0];
    assert_eq!(answer.stdout, None);
    assert_eq!(answer.stderr.as_deref(), Some("warning"));
    assert_eq!(answer.return_code, 2);
}

#[test]
fn serde_round_trip_preserves_cursor() {
    let mut config = configuration("build");
    config.then_return(1).then_return(2);
    config.next_answer().unwrap();

    let json = serde_json::to_string(&config).unwrap();
    let decoded: StubConfiguration = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, config);
    assert_eq!(decoded.cursor(), 1);
}
