// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.
//!
//! All runtime environment variables read by runcheck are defined here.

use std::path::PathBuf;

/// Runner program override.
pub const RUNCHECK_RUNNER: &str = "RUNCHECK_RUNNER";
/// Fixtures directory override.
pub const RUNCHECK_FIXTURES: &str = "RUNCHECK_FIXTURES";
/// Log filter for the `runcheck` binary.
pub const RUNCHECK_LOG: &str = "RUNCHECK_LOG";

/// `RUNCHECK_RUNNER`: program used to launch the test runner.
pub fn runner() -> Option<String> {
    std::env::var(RUNCHECK_RUNNER).ok().filter(|v| !v.is_empty())
}

/// `RUNCHECK_FIXTURES`: directory fixture names are resolved against.
pub fn fixtures_dir() -> Option<PathBuf> {
    std::env::var(RUNCHECK_FIXTURES)
        .ok()
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
