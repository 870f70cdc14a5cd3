// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use runcheck_expect::SummarizedResult;

fn record(title: &str, outcome: Outcome, current_retry: u32, error: Option<&str>) -> TestRecord {
    TestRecord {
        title: title.to_string(),
        full_title: format!("suite {}", title),
        file: "t.toml".to_string(),
        outcome,
        current_retry,
        error: error.map(String::from),
    }
}

fn runs() -> Vec<FileRun> {
    vec![FileRun {
        suite: Some("suite".to_string()),
        records: vec![
            record("adds", Outcome::Pass, 0, None),
            record("divides", Outcome::Fail, 1, Some("division by zero")),
            record("later", Outcome::Pending, 0, None),
        ],
    }]
}

#[test]
fn spec_lists_tests_and_failures() {
    let out = spec(&runs());
    assert!(out.contains("  suite\n    ✓ adds\n    1) divides\n    - later\n"));
    assert!(out.contains("  1) suite divides:\n     Error: division by zero\n"));
}

#[test]
fn spec_summary_is_parseable() {
    let summary = SummarizedResult::from_output(spec(&runs()), 1);
    assert_eq!((summary.passing, summary.failing, summary.pending), (1, 1, 1));
}

#[test]
fn spec_omits_zero_failing_and_pending() {
    let runs = vec![FileRun {
        suite: None,
        records: vec![record("a", Outcome::Pass, 0, None)],
    }];
    let out = spec(&runs);
    assert!(out.contains("  ✓ a\n"));
    assert!(out.contains("1 passing"));
    assert!(!out.contains("failing"));
    assert!(!out.contains("pending"));
}

#[test]
fn json_report_splits_collections() {
    let report = json_report(&runs());
    assert_eq!(report.stats.tests, 3);
    assert_eq!(report.stats.passes, 1);
    assert_eq!(report.stats.failures, 1);
    assert_eq!(report.stats.pending, 1);
    assert_eq!(report.stats.suites, 1);
    assert_eq!(report.tests.len(), 3);
    assert_eq!(report.failures[0].err["message"], "division by zero");
    assert_eq!(report.failures[0].current_retry, Some(1));
    assert_eq!(report.passes[0].full_title, "suite adds");
    assert_eq!(report.pending[0].duration, None);
}

#[test]
fn json_render_round_trips_through_report_type() {
    let text = Reporter::Json.render(&runs()).unwrap();
    let parsed: JsonReport = serde_json::from_str(&text).unwrap();
    assert_eq!(parsed, json_report(&runs()));
}
