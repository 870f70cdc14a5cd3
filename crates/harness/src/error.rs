// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use crate::config::ConfigError;
use thiserror::Error;

/// Failures of the harness itself. A runner that exits non-zero is not one.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to spawn '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("runner printed no JSON report")]
    MissingReport,

    #[error("failed to parse JSON report: {0}")]
    Report(#[source] serde_json::Error),

    #[error("runner not ready after {timeout_ms}ms")]
    ReadyTimeout { timeout_ms: u64 },

    #[error("runner exited before it was ready; output:\n{output}")]
    ExitedBeforeReady { output: String },

    #[error("runner did not exit within {timeout_ms}ms of the interrupt")]
    ShutdownTimeout { timeout_ms: u64 },

    #[error("trigger failed: {0}")]
    Trigger(#[source] std::io::Error),

    #[error("failed to interrupt runner: {0}")]
    Signal(String),
}
