// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Human-readable and JSON reporters.

use crate::suite::{FileRun, Outcome, TestRecord};
use runcheck_expect::{JsonReport, Stats, TestEntry};
use serde_json::json;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Reporter {
    #[default]
    Spec,
    Json,
}

impl Reporter {
    pub fn render(self, runs: &[FileRun]) -> Result<String, serde_json::Error> {
        match self {
            Reporter::Spec => Ok(spec(runs)),
            Reporter::Json => serde_json::to_string_pretty(&json_report(runs)),
        }
    }
}

fn records(runs: &[FileRun]) -> impl Iterator<Item = &TestRecord> {
    runs.iter().flat_map(|run| run.records.iter())
}

fn count(runs: &[FileRun], outcome: Outcome) -> usize {
    records(runs).filter(|r| r.outcome == outcome).count()
}

/// Indented tree of results followed by the summary lines.
pub fn spec(runs: &[FileRun]) -> String {
    let mut out = String::new();
    let mut failed: Vec<&TestRecord> = Vec::new();

    for run in runs {
        out.push('\n');
        let indent = match &run.suite {
            Some(suite) => {
                let _ = writeln!(out, "  {}", suite);
                "    "
            }
            None => "  ",
        };
        for record in &run.records {
            match record.outcome {
                Outcome::Pass => {
                    let _ = writeln!(out, "{}✓ {}", indent, record.title);
                }
                Outcome::Pending => {
                    let _ = writeln!(out, "{}- {}", indent, record.title);
                }
                Outcome::Fail => {
                    failed.push(record);
                    let _ = writeln!(out, "{}{}) {}", indent, failed.len(), record.title);
                }
            }
        }
    }

    let _ = write!(out, "\n\n  {} passing\n", count(runs, Outcome::Pass));
    let pending = count(runs, Outcome::Pending);
    if pending > 0 {
        let _ = writeln!(out, "  {} pending", pending);
    }
    if !failed.is_empty() {
        let _ = writeln!(out, "  {} failing", failed.len());
    }

    for (i, record) in failed.iter().enumerate() {
        let _ = write!(
            out,
            "\n  {}) {}:\n     Error: {}\n",
            i + 1,
            record.full_title,
            record.error.as_deref().unwrap_or_default()
        );
    }
    out
}

fn entry(record: &TestRecord) -> TestEntry {
    let err = match &record.error {
        Some(message) => json!({
            "message": message,
            "stack": format!("Error: {}\n    at {}", message, record.file),
        }),
        None => json!({}),
    };
    let mut entry = TestEntry::new(record.title.clone())
        .with_err(err)
        .with_current_retry(record.current_retry);
    entry.full_title = record.full_title.clone();
    entry.file = Some(record.file.clone());
    if record.outcome != Outcome::Pending {
        entry.duration = Some(0);
    }
    entry
}

fn collect(runs: &[FileRun], outcome: Outcome) -> Vec<TestEntry> {
    records(runs)
        .filter(|r| r.outcome == outcome)
        .map(entry)
        .collect()
}

/// Report in the layout `runcheck` parses as a JSON result.
pub fn json_report(runs: &[FileRun]) -> JsonReport {
    let passes = collect(runs, Outcome::Pass);
    let failures = collect(runs, Outcome::Fail);
    let pending = collect(runs, Outcome::Pending);
    let tests: Vec<TestEntry> = records(runs).map(entry).collect();
    JsonReport {
        stats: Stats {
            suites: runs.iter().filter(|r| r.suite.is_some()).count() as u64,
            tests: tests.len() as u64,
            passes: passes.len() as u64,
            pending: pending.len() as u64,
            failures: failures.len() as u64,
            ..Default::default()
        },
        tests,
        pending,
        failures,
        passes,
    }
}

#[cfg(test)]
#[path = "report_tests.rs"]
mod tests;
