// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative test files and their simulated execution.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors loading test files or plugins
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot increment '{key}': not a number")]
    NotANumber { key: String },
}

pub(crate) fn read_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    #[default]
    Pass,
    Fail,
    Pending,
}

/// One declared test
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestSpec {
    pub title: String,

    #[serde(default)]
    pub outcome: Outcome,

    /// Failure message (default: "<title> failed")
    #[serde(default)]
    pub error: Option<String>,

    /// Extra attempts after a failure
    #[serde(default)]
    pub retries: u32,

    /// 1-based attempt on which the test starts passing
    #[serde(default)]
    pub passes_on_attempt: Option<u32>,
}

/// A test file: an optional suite title and its tests
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestFile {
    #[serde(default)]
    pub suite: Option<String>,

    #[serde(default)]
    pub tests: Vec<TestSpec>,
}

impl TestFile {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        read_toml(path)
    }
}

/// Final state of one test after all its attempts
#[derive(Clone, Debug, PartialEq)]
pub struct TestRecord {
    pub title: String,
    pub full_title: String,
    pub file: String,
    pub outcome: Outcome,
    pub current_retry: u32,
    pub error: Option<String>,
}

impl TestSpec {
    fn attempt_that_passes(&self) -> Option<u32> {
        let attempts = self.retries.saturating_add(1);
        let first = match (self.outcome, self.passes_on_attempt) {
            (Outcome::Pending, _) => return None,
            (_, Some(attempt)) => attempt.max(1),
            (Outcome::Pass, None) => 1,
            (Outcome::Fail, None) => return None,
        };
        (first <= attempts).then_some(first)
    }

    /// Run all attempts of this test.
    pub fn execute(&self, suite: Option<&str>, file: &Path) -> TestRecord {
        let full_title = match suite {
            Some(suite) => format!("{} {}", suite, self.title),
            None => self.title.clone(),
        };
        let (outcome, current_retry, error) = if self.outcome == Outcome::Pending {
            (Outcome::Pending, 0, None)
        } else {
            match self.attempt_that_passes() {
                Some(attempt) => (Outcome::Pass, attempt - 1, None),
                None => {
                    let message = self
                        .error
                        .clone()
                        .unwrap_or_else(|| format!("{} failed", self.title));
                    (Outcome::Fail, self.retries, Some(message))
                }
            }
        };
        TestRecord {
            title: self.title.clone(),
            full_title,
            file: file.display().to_string(),
            outcome,
            current_retry,
            error,
        }
    }
}

/// Result of running one file
#[derive(Clone, Debug, Default)]
pub struct FileRun {
    pub suite: Option<String>,
    pub records: Vec<TestRecord>,
}

impl FileRun {
    pub fn failures(&self) -> usize {
        self.records
            .iter()
            .filter(|r| r.outcome == Outcome::Fail)
            .count()
    }
}

pub fn run_file(path: &Path) -> Result<FileRun, LoadError> {
    let file = TestFile::load(path)?;
    let records = file
        .tests
        .iter()
        .map(|spec| spec.execute(file.suite.as_deref(), path))
        .collect();
    Ok(FileRun {
        suite: file.suite,
        records,
    })
}

#[cfg(test)]
#[path = "suite_tests.rs"]
mod tests;
