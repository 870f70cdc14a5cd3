// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Result shapes produced by a test-runner invocation.
//!
//! A [`RunResult`] is tagged with its [`Shape`] when it is built. Untyped
//! input (for example a saved result file) goes through
//! [`RunResult::identify`] once, at the boundary.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::LazyLock;
use thiserror::Error;

static PASSING_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(\d+) passing").ok());
static FAILING_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(\d+) failing").ok());
static PENDING_REGEX: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?m)^\s*(\d+) pending").ok());

/// Which of the three result shapes a value has.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Shape {
    Raw,
    Json,
    Summarized,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Raw => f.write_str("RawResult"),
            Shape::Json => f.write_str("JSONResult"),
            Shape::Summarized => f.write_str("SummarizedResult"),
        }
    }
}

/// Plain subprocess capture.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub output: String,
    /// `None` when the process was terminated by a signal.
    pub code: Option<i32>,
    pub args: Vec<String>,
}

/// Aggregate counters reported by the runner.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub suites: u64,
    #[serde(default)]
    pub tests: u64,
    #[serde(default)]
    pub passes: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub failures: u64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A single test as it appears in a JSON report.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestEntry {
    pub title: String,
    #[serde(default)]
    pub full_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_retry: Option<u32>,
    #[serde(default = "empty_object")]
    pub err: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

fn empty_object() -> Value {
    Value::Object(Map::new())
}

impl TestEntry {
    /// Create an entry with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            full_title: title.clone(),
            title,
            err: empty_object(),
            ..Default::default()
        }
    }

    /// Set the error object.
    pub fn with_err(mut self, err: Value) -> Self {
        self.err = err;
        self
    }

    /// Set the retry counter.
    pub fn with_current_retry(mut self, retry: u32) -> Self {
        self.current_retry = Some(retry);
        self
    }

    /// JSON view used for structural matching.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

/// The machine-readable report as the runner prints it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonReport {
    pub stats: Stats,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
    #[serde(default)]
    pub pending: Vec<TestEntry>,
    #[serde(default)]
    pub failures: Vec<TestEntry>,
    #[serde(default)]
    pub passes: Vec<TestEntry>,
}

/// A parsed JSON report plus how the process ended.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct JsonResult {
    pub stats: Stats,
    #[serde(default)]
    pub tests: Vec<TestEntry>,
    #[serde(default)]
    pub pending: Vec<TestEntry>,
    #[serde(default)]
    pub failures: Vec<TestEntry>,
    #[serde(default)]
    pub passes: Vec<TestEntry>,
    pub code: i32,
    pub command: String,
}

impl JsonResult {
    pub fn from_report(report: JsonReport, code: i32, command: impl Into<String>) -> Self {
        Self {
            stats: report.stats,
            tests: report.tests,
            pending: report.pending,
            failures: report.failures,
            passes: report.passes,
            code,
            command: command.into(),
        }
    }

    /// Entries of one collection.
    pub fn collection(&self, which: Collection) -> &[TestEntry] {
        match which {
            Collection::Passes => &self.passes,
            Collection::Failures => &self.failures,
            Collection::Pending => &self.pending,
        }
    }

    /// Every collection in the report, `tests` first.
    pub fn all_collections(&self) -> [&[TestEntry]; 4] {
        [&self.tests, &self.passes, &self.failures, &self.pending]
    }
}

/// A named collection of a JSON report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Passes,
    Failures,
    Pending,
}

impl Collection {
    /// Key of this collection in the report.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Passes => "passes",
            Collection::Failures => "failures",
            Collection::Pending => "pending",
        }
    }
}

/// Counts parsed from the human-readable summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarizedResult {
    pub passing: u64,
    pub failing: u64,
    pub pending: u64,
    pub output: String,
    pub code: i32,
}

impl SummarizedResult {
    /// Parse `N passing` / `N failing` / `N pending` lines; absent lines count as zero.
    pub fn from_output(output: impl Into<String>, code: i32) -> Self {
        let output = output.into();
        Self {
            passing: summary_count(&PASSING_REGEX, &output),
            failing: summary_count(&FAILING_REGEX, &output),
            pending: summary_count(&PENDING_REGEX, &output),
            output,
            code,
        }
    }
}

fn summary_count(re: &LazyLock<Option<Regex>>, output: &str) -> u64 {
    re.as_ref()
        .and_then(|re| re.captures(output))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// A result of one runner invocation, tagged with its shape.
#[derive(Clone, Debug, PartialEq)]
pub enum RunResult {
    Raw(RawResult),
    Json(JsonResult),
    Summarized(SummarizedResult),
}

/// Errors from structural identification.
#[derive(Debug, Error)]
pub enum IdentifyError {
    #[error("value does not look like any known result shape")]
    Unrecognized,

    #[error("value looks like a {shape} but could not be read: {source}")]
    Malformed {
        shape: Shape,
        #[source]
        source: serde_json::Error,
    },
}

impl RunResult {
    pub fn shape(&self) -> Shape {
        match self {
            RunResult::Raw(_) => Shape::Raw,
            RunResult::Json(_) => Shape::Json,
            RunResult::Summarized(_) => Shape::Summarized,
        }
    }

    /// Exit code, if the process reported one.
    pub fn code(&self) -> Option<i32> {
        match self {
            RunResult::Raw(r) => r.code,
            RunResult::Json(r) => Some(r.code),
            RunResult::Summarized(r) => Some(r.code),
        }
    }

    /// Captured text, for the shapes that carry it.
    pub fn output(&self) -> Option<&str> {
        match self {
            RunResult::Raw(r) => Some(&r.output),
            RunResult::Summarized(r) => Some(&r.output),
            RunResult::Json(_) => None,
        }
    }

    /// Tag an untyped value by its structure.
    pub fn identify(value: Value) -> Result<Self, IdentifyError> {
        let shape = detect_shape(&value).ok_or(IdentifyError::Unrecognized)?;
        let malformed = |source| IdentifyError::Malformed { shape, source };
        Ok(match shape {
            Shape::Json => RunResult::Json(serde_json::from_value(value).map_err(malformed)?),
            Shape::Summarized => {
                RunResult::Summarized(serde_json::from_value(value).map_err(malformed)?)
            }
            Shape::Raw => RunResult::Raw(serde_json::from_value(value).map_err(malformed)?),
        })
    }
}

fn detect_shape(value: &Value) -> Option<Shape> {
    let obj = value.as_object()?;
    let is_number = |key: &str| obj.get(key).is_some_and(Value::is_number);
    let is_string = |key: &str| obj.get(key).is_some_and(Value::is_string);

    if obj.get("stats").is_some_and(Value::is_object)
        && obj.get("failures").is_some_and(Value::is_array)
        && is_number("code")
        && is_string("command")
    {
        return Some(Shape::Json);
    }
    if ["passing", "failing", "pending", "code"]
        .iter()
        .all(|key| is_number(key))
        && is_string("output")
    {
        return Some(Shape::Summarized);
    }
    if is_string("output")
        && obj.contains_key("code")
        && obj.get("args").is_some_and(Value::is_array)
    {
        return Some(Shape::Raw);
    }
    None
}

impl From<RawResult> for RunResult {
    fn from(r: RawResult) -> Self {
        RunResult::Raw(r)
    }
}

impl From<JsonResult> for RunResult {
    fn from(r: JsonResult) -> Self {
        RunResult::Json(r)
    }
}

impl From<SummarizedResult> for RunResult {
    fn from(r: SummarizedResult) -> Self {
        RunResult::Summarized(r)
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunResult::Raw(r) => {
                let code = r.code.map_or_else(|| "none".to_string(), |c| c.to_string());
                write!(
                    f,
                    "RawResult {{ code: {}, args: {:?}, output: {} bytes }}",
                    code,
                    r.args,
                    r.output.len()
                )
            }
            RunResult::Json(r) => write!(
                f,
                "JSONResult {{ code: {}, tests: {}, passes: {}, failures: {}, pending: {}, command: {:?} }}",
                r.code, r.stats.tests, r.stats.passes, r.stats.failures, r.stats.pending, r.command
            ),
            RunResult::Summarized(r) => write!(
                f,
                "SummarizedResult {{ code: {}, passing: {}, failing: {}, pending: {} }}",
                r.code, r.passing, r.failing, r.pending
            ),
        }
    }
}

#[cfg(test)]
#[path = "result_tests.rs"]
mod tests;
