// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Integration harness for test runners.
//!
//! Launches a runner as a subprocess (one-shot or in watch mode), captures
//! its output and exit code, and hands back a typed
//! [`RunResult`](runcheck_expect::RunResult) for the matcher registry.

#[doc(hidden)]
pub mod cli;
pub mod config;
pub mod env;
pub mod error;
pub mod fixture;
pub mod runner;

pub use config::{ConfigError, RunnerConfig};
pub use error::HarnessError;
pub use fixture::{touch_file, Fixtures, DEFAULT_FIXTURE};
pub use runner::{extract_report, ExecMode, ReportFormat, RunOptions, Runner};
