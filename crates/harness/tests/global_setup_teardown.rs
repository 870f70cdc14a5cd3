// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Global setup/teardown fixtures across serial, parallel and watch runs.

mod common;

use common::{require, runner, GLOBAL_SETUP_TEARDOWN, GLOBAL_SETUP_TEARDOWN_MULTIPLE};
use regex::Regex;
use runcheck_expect::{Assertion, Registry, RunResult};
use runcheck_harness::{touch_file, RunOptions, DEFAULT_FIXTURE};
use tempfile::TempDir;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

async fn run_serial(plugin: &str) -> RunResult {
    let runner = runner();
    runner
        .run(DEFAULT_FIXTURE, &require(&runner, plugin), &RunOptions::new())
        .await
        .unwrap()
}

async fn run_parallel(plugin: &str) -> RunResult {
    let runner = runner();
    runner
        .run(
            DEFAULT_FIXTURE,
            &require(&runner, plugin),
            &RunOptions::new().parallel(),
        )
        .await
        .unwrap()
}

/// Copy the default fixture into a temp dir, watch it, and touch it once.
async fn run_watch(plugin: &str, options: RunOptions) -> RunResult {
    let runner = runner();
    let dir = TempDir::new().unwrap();
    let test_file = dir.path().join("test.toml");
    runner.fixtures().copy(DEFAULT_FIXTURE, &test_file).unwrap();

    let mut args = require(&runner, plugin);
    args.push(test_file.display().to_string());

    runner
        .run_watch(
            &args,
            dir.path(),
            || touch_file(&test_file),
            &options,
        )
        .await
        .unwrap()
}

// =============================================================================
// Serial
// =============================================================================

#[tokio::test]
async fn serial_runs_global_setup_and_teardown() {
    let result = run_serial(GLOBAL_SETUP_TEARDOWN).await;
    Registry::new().assert(&result, &Assertion::passed());
}

#[tokio::test]
async fn serial_shares_context() {
    let result = run_serial(GLOBAL_SETUP_TEARDOWN).await;
    Registry::new().assert(
        &result,
        &Assertion::contain_output(re(
            r"setup: this\.foo = bar[\s\S]+teardown: this\.foo = bar",
        )),
    );
}

#[tokio::test]
async fn serial_runs_multiple_functions_sequentially() {
    let result = run_serial(GLOBAL_SETUP_TEARDOWN_MULTIPLE).await;
    Registry::new().assert(
        &result,
        &Assertion::contain_output(re(r"teardown: this\.foo = 3")),
    );
}

// =============================================================================
// Watch
// =============================================================================

#[tokio::test]
async fn watch_runs_global_setup_and_teardown() {
    let result = run_watch(GLOBAL_SETUP_TEARDOWN, RunOptions::new()).await;
    Registry::new().assert(&result, &Assertion::passed());
}

#[tokio::test]
async fn watch_does_not_rerun_global_fixtures() {
    let result = run_watch(GLOBAL_SETUP_TEARDOWN_MULTIPLE, RunOptions::new()).await;
    let registry = Registry::new();
    registry.assert(
        &result,
        &Assertion::contain_output_once(re(r"teardown: this\.foo = 3")),
    );
    // Two runs happened: the initial one and the one the touch caused.
    registry.assert(
        &result,
        &Assertion::contain_output(re(r"1 passing[\s\S]+1 passing")),
    );
}

#[tokio::test]
async fn watch_setup_runs_once() {
    let result = run_watch(GLOBAL_SETUP_TEARDOWN, RunOptions::new()).await;
    Registry::new().assert(
        &result,
        &Assertion::contain_output_once(re(r"setup: this\.foo = bar")),
    );
}

// =============================================================================
// Parallel
// =============================================================================

#[tokio::test]
async fn parallel_runs_global_setup_and_teardown() {
    let result = run_parallel(GLOBAL_SETUP_TEARDOWN).await;
    Registry::new().assert(&result, &Assertion::passed());
}

#[tokio::test]
async fn parallel_shares_context() {
    let result = run_parallel(GLOBAL_SETUP_TEARDOWN).await;
    let registry = Registry::new();
    registry.assert(
        &result,
        &Assertion::contain_output(re(r"setup: this\.foo = bar")),
    );
    registry.assert(
        &result,
        &Assertion::contain_output(re(r"teardown: this\.foo = bar")),
    );
}

#[tokio::test]
async fn parallel_runs_multiple_functions_sequentially() {
    let result = run_parallel(GLOBAL_SETUP_TEARDOWN_MULTIPLE).await;
    Registry::new().assert(
        &result,
        &Assertion::contain_output(re(r"teardown: this\.foo = 3")),
    );
}

#[tokio::test]
async fn parallel_watch_runs_global_setup_and_teardown() {
    let result = run_watch(GLOBAL_SETUP_TEARDOWN, RunOptions::new().parallel()).await;
    Registry::new().assert(&result, &Assertion::passed());
}

#[tokio::test]
async fn parallel_watch_does_not_rerun_global_fixtures() {
    let result = run_watch(GLOBAL_SETUP_TEARDOWN_MULTIPLE, RunOptions::new().parallel()).await;
    let registry = Registry::new();
    registry.assert(
        &result,
        &Assertion::contain_output_once(re(r"teardown: this\.foo = 3")),
    );
    registry.assert(
        &result,
        &Assertion::contain_output(re(r"1 passing[\s\S]+1 passing")),
    );
}
