// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Runner configuration loaded from TOML.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default runner program
pub const DEFAULT_PROGRAM: &str = "stub-runner";
/// Suffix appended to fixture names without an extension
pub const DEFAULT_FIXTURE_EXTENSION: &str = ".fixture.toml";
/// Line a watching runner prints once a run has finished
pub const DEFAULT_READY_PATTERN: &str = r"\[watch\] waiting for changes";
/// Upper bound on each readiness wait
pub const DEFAULT_READY_TIMEOUT_MS: u64 = 30_000;

/// How to launch and drive the runner under test
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunnerConfig {
    /// Program to launch
    pub program: String,

    /// Arguments placed before everything else
    pub base_args: Vec<String>,

    /// Directory fixture names are resolved against
    pub fixtures_dir: PathBuf,

    /// Suffix appended to fixture names that have no extension
    pub fixture_extension: String,

    /// Flag selecting parallel execution
    pub parallel_flag: String,

    /// Flag selecting watch mode
    pub watch_flag: String,

    /// Arguments selecting the machine-readable JSON reporter
    pub json_args: Vec<String>,

    /// Regex matched against output lines to detect a finished watch run
    pub ready_pattern: String,

    /// Timeout in milliseconds for each readiness wait
    pub ready_timeout_ms: u64,

    /// Extra environment for the runner process
    pub env: BTreeMap<String, String>,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            base_args: Vec::new(),
            fixtures_dir: PathBuf::from("tests/fixtures"),
            fixture_extension: DEFAULT_FIXTURE_EXTENSION.to_string(),
            parallel_flag: "--parallel".to_string(),
            watch_flag: "--watch".to_string(),
            json_args: vec!["--reporter".to_string(), "json".to_string()],
            ready_pattern: DEFAULT_READY_PATTERN.to_string(),
            ready_timeout_ms: DEFAULT_READY_TIMEOUT_MS,
            env: BTreeMap::new(),
        }
    }
}

/// Errors that can occur when loading a runner configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("runner program must not be empty")]
    EmptyProgram,

    #[error("invalid regex pattern '{pattern}': {error}")]
    InvalidRegex { pattern: String, error: String },

    #[error("timeout must be positive, got {0}")]
    InvalidTimeout(u64),
}

impl RunnerConfig {
    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parse and validate TOML text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.program.trim().is_empty() {
            return Err(ConfigError::EmptyProgram);
        }
        if self.ready_timeout_ms == 0 {
            return Err(ConfigError::InvalidTimeout(0));
        }
        self.ready_regex()?;
        Ok(())
    }

    /// Compiled readiness pattern
    pub fn ready_regex(&self) -> Result<Regex, ConfigError> {
        Regex::new(&self.ready_pattern).map_err(|e| ConfigError::InvalidRegex {
            pattern: self.ready_pattern.clone(),
            error: e.to_string(),
        })
    }

    /// Apply `RUNCHECK_RUNNER` and `RUNCHECK_FIXTURES`.
    pub fn apply_env(self) -> Self {
        self.with_overrides(crate::env::runner(), crate::env::fixtures_dir())
    }

    /// Replace the program and fixtures directory when given.
    pub fn with_overrides(mut self, program: Option<String>, fixtures_dir: Option<PathBuf>) -> Self {
        if let Some(program) = program {
            self.program = program;
        }
        if let Some(dir) = fixtures_dir {
            self.fixtures_dir = dir;
        }
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    pub fn with_fixtures_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.fixtures_dir = dir.into();
        self
    }

    pub fn with_ready_timeout(mut self, timeout_ms: u64) -> Self {
        self.ready_timeout_ms = timeout_ms;
        self
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
