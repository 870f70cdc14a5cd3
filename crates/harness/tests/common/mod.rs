// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

//! Shared helpers for runner integration tests.

#![allow(dead_code)]

use runcheck_harness::{Runner, RunnerConfig};
use std::path::PathBuf;

pub const GLOBAL_SETUP_TEARDOWN: &str = "plugins/global-setup-teardown/global-setup-teardown";
pub const GLOBAL_SETUP_TEARDOWN_MULTIPLE: &str =
    "plugins/global-setup-teardown/global-setup-teardown-multiple";

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures"))
}

pub fn stub_runner() -> &'static str {
    env!("CARGO_BIN_EXE_stub-runner")
}

/// Runner driving the stub with the test fixtures
pub fn runner() -> Runner {
    let config = RunnerConfig::default()
        .with_program(stub_runner())
        .with_fixtures_dir(fixtures_dir())
        .with_ready_timeout(10_000);
    Runner::new(config).unwrap()
}

/// `--require <resolved plugin>`
pub fn require(runner: &Runner, plugin: &str) -> Vec<String> {
    vec![
        "--require".to_string(),
        runner.fixtures().resolve(plugin).display().to_string(),
    ]
}
