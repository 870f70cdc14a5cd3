// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use serde_json::json;

#[test]
fn identify_json_result() {
    let value = json!({
        "stats": {"tests": 2, "passes": 1, "failures": 1, "pending": 0, "duration": 12},
        "tests": [{"title": "a", "fullTitle": "suite a", "currentRetry": 0, "err": {}}],
        "passes": [{"title": "a", "fullTitle": "suite a", "err": {}}],
        "failures": [{"title": "b", "fullTitle": "suite b", "err": {"message": "boom"}}],
        "pending": [],
        "code": 1,
        "command": "runner --reporter json"
    });

    let result = RunResult::identify(value).unwrap();
    assert_eq!(result.shape(), Shape::Json);
    let RunResult::Json(json) = result else {
        panic!("expected JSON result");
    };
    assert_eq!(json.stats.tests, 2);
    assert_eq!(json.stats.extra.get("duration"), Some(&json!(12)));
    assert_eq!(json.failures[0].err, json!({"message": "boom"}));
    assert_eq!(json.tests[0].current_retry, Some(0));
}

#[test]
fn identify_summarized_result() {
    let value = json!({"passing": 3, "failing": 0, "pending": 1, "output": "ok", "code": 0});
    let result = RunResult::identify(value).unwrap();
    assert_eq!(result.shape(), Shape::Summarized);
    assert_eq!(result.code(), Some(0));
}

#[test]
fn identify_raw_result_with_null_code() {
    let value = json!({"output": "killed", "code": null, "args": ["--watch"]});
    let result = RunResult::identify(value).unwrap();
    assert_eq!(result.shape(), Shape::Raw);
    assert_eq!(result.code(), None);
    assert_eq!(result.output(), Some("killed"));
}

#[test]
fn identify_raw_requires_code_key() {
    let value = json!({"output": "x", "args": []});
    assert!(matches!(
        RunResult::identify(value),
        Err(IdentifyError::Unrecognized)
    ));
}

#[test]
fn identify_rejects_non_objects() {
    assert!(RunResult::identify(json!([1, 2])).is_err());
    assert!(RunResult::identify(json!("output")).is_err());
}

#[test]
fn identify_prefers_json_over_raw() {
    // Also carries every field a raw capture has; the report shape wins.
    let value = json!({
        "stats": {"tests": 0},
        "failures": [],
        "code": 0,
        "command": "runner",
        "output": "",
        "args": []
    });
    assert_eq!(RunResult::identify(value).unwrap().shape(), Shape::Json);
}

#[test]
fn identify_reports_malformed_shape() {
    let value = json!({
        "stats": {"tests": "many"},
        "failures": [],
        "code": 0,
        "command": "runner"
    });
    let err = RunResult::identify(value).unwrap_err();
    assert!(matches!(
        err,
        IdentifyError::Malformed {
            shape: Shape::Json,
            ..
        }
    ));
}

#[test]
fn summarized_from_output_parses_counts() {
    let output = "\n  suite\n    ✓ a\n    1) b\n\n  4 passing (12ms)\n  1 failing\n  2 pending\n";
    let summary = SummarizedResult::from_output(output, 1);
    assert_eq!(summary.passing, 4);
    assert_eq!(summary.failing, 1);
    assert_eq!(summary.pending, 2);
    assert_eq!(summary.code, 1);
}

#[test]
fn summarized_from_output_defaults_missing_lines_to_zero() {
    let summary = SummarizedResult::from_output("  1 passing\n", 0);
    assert_eq!(summary.passing, 1);
    assert_eq!(summary.failing, 0);
    assert_eq!(summary.pending, 0);
}

#[test]
fn json_result_from_report_keeps_collections() {
    let report: JsonReport = serde_json::from_value(json!({
        "stats": {"tests": 1, "passes": 1},
        "tests": [{"title": "a"}],
        "passes": [{"title": "a"}]
    }))
    .unwrap();
    let result = JsonResult::from_report(report, 0, "runner a.toml");
    assert_eq!(result.collection(Collection::Passes).len(), 1);
    assert!(result.collection(Collection::Failures).is_empty());
    assert_eq!(result.command, "runner a.toml");
    assert_eq!(result.passes[0].err, json!({}));
}

#[test]
fn test_entry_value_uses_report_field_names() {
    let entry = TestEntry::new("a").with_current_retry(2);
    let value = entry.to_value();
    assert_eq!(value["title"], json!("a"));
    assert_eq!(value["fullTitle"], json!("a"));
    assert_eq!(value["currentRetry"], json!(2));
}

#[test]
fn display_names_the_shape() {
    let raw = RunResult::from(RawResult {
        output: "hi".into(),
        code: None,
        args: vec![],
    });
    assert!(raw.to_string().starts_with("RawResult"));
    assert!(raw.to_string().contains("code: none"));
}
