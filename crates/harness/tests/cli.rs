// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(deprecated)] // Command::cargo_bin is deprecated but still functional

//! End-to-end tests of the `runcheck` binary.

mod common;

use assert_cmd::Command;
use common::{fixtures_dir, stub_runner};
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn runcheck() -> Command {
    let mut cmd = Command::cargo_bin("runcheck").unwrap();
    cmd.env("RUNCHECK_RUNNER", stub_runner())
        .env("RUNCHECK_FIXTURES", fixtures_dir())
        .env_remove("RUNCHECK_LOG");
    cmd
}

fn fixture(name: &str) -> String {
    fixtures_dir()
        .join(format!("{}.fixture.toml", name))
        .display()
        .to_string()
}

fn saved_result(value: serde_json::Value) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(value.to_string().as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// run
// =============================================================================

#[test]
fn run_passing_assertion_exits_zero() {
    runcheck()
        .args(["run", "--expect", "to have passed", "--"])
        .arg(fixture("__default__"))
        .assert()
        .success();
}

#[test]
fn run_mismatch_exits_one_with_explanation() {
    runcheck()
        .args(["run", "--expect", "to have failed", "--"])
        .arg(fixture("__default__"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("expected RawResult"))
        .stderr(predicate::str::contains("to have failed"));
}

#[test]
fn run_negated_assertion() {
    runcheck()
        .args(["run", "--expect", "not to have passed", "--"])
        .arg(fixture("mixed-results"))
        .assert()
        .success();
}

#[test]
fn run_json_format_with_arguments() {
    runcheck()
        .args([
            "run",
            "--format",
            "json",
            "--expect",
            "to have passed test order",
            "--arg",
            "passes first",
            "--arg",
            "passes second",
            "--",
        ])
        .arg(fixture("mixed-results"))
        .assert()
        .success();
}

#[test]
fn run_parallel_with_plugin() {
    runcheck()
        .args([
            "run",
            "--parallel",
            "--expect",
            "to contain",
            "--arg",
            r"/teardown: this\.foo = bar/",
            "--",
            "--require",
        ])
        .arg(fixture("plugins/global-setup-teardown/global-setup-teardown"))
        .arg(fixture("__default__"))
        .assert()
        .success();
}

#[test]
fn run_unknown_phrase_exits_two() {
    runcheck()
        .args(["run", "--expect", "to have exploded", "--"])
        .arg(fixture("__default__"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("unknown assertion"));
}

#[test]
fn run_unsupported_shape_exits_two() {
    runcheck()
        .args(["run", "--expect", "to have test count", "--arg", "1", "--"])
        .arg(fixture("__default__"))
        .assert()
        .code(2)
        .stderr(predicate::str::contains("RawResult"));
}

#[test]
fn run_missing_runner_exits_two() {
    runcheck()
        .env("RUNCHECK_RUNNER", "/nonexistent/runner")
        .args(["run", "--expect", "to have passed", "--", "x"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("failed to spawn"));
}

// =============================================================================
// check
// =============================================================================

#[test]
fn check_contain_once() {
    let once = saved_result(serde_json::json!({"output": "foo bar", "code": 0, "args": []}));
    runcheck()
        .args(["check", "--result"])
        .arg(once.path())
        .args(["--expect", "to contain once", "--arg", "foo"])
        .assert()
        .success();

    let twice = saved_result(serde_json::json!({"output": "foo foo", "code": 0, "args": []}));
    runcheck()
        .args(["check", "--result"])
        .arg(twice.path())
        .args(["--expect", "to contain once", "--arg", "foo"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("found 2"));
}

#[test]
fn check_summarized_counts() {
    let saved = saved_result(serde_json::json!({
        "passing": 3,
        "failing": 0,
        "pending": 1,
        "output": "  3 passing\n  1 pending\n",
        "code": 0
    }));
    runcheck()
        .args(["check", "--result"])
        .arg(saved.path())
        .args(["--expect", "to have pending count", "--arg", "1"])
        .assert()
        .success();
}

#[test]
fn check_unrecognized_result_exits_two() {
    let saved = saved_result(serde_json::json!({"hello": "world"}));
    runcheck()
        .args(["check", "--result"])
        .arg(saved.path())
        .args(["--expect", "to have passed"])
        .assert()
        .code(2);
}

#[test]
fn check_usage_error_is_not_negated() {
    let saved = saved_result(serde_json::json!({"output": "5", "code": 0, "args": []}));
    runcheck()
        .args(["check", "--result"])
        .arg(saved.path())
        .args(["--expect", "not to contain once", "--arg", "5"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("a string or regex"));
}
