// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use std::io::Write;

#[test]
fn defaults_are_valid() {
    let config = RunnerConfig::default();
    config.validate().unwrap();
    assert_eq!(config.program, DEFAULT_PROGRAM);
    assert_eq!(config.json_args, vec!["--reporter", "json"]);
    assert!(config
        .ready_regex()
        .unwrap()
        .is_match("[watch] waiting for changes..."));
}

#[test]
fn parse_fills_missing_fields_with_defaults() {
    let config = RunnerConfig::parse(
        r#"
        program = "mocha"
        base_args = ["--no-color"]
        ready_timeout_ms = 500

        [env]
        FORCE_COLOR = "0"
        "#,
    )
    .unwrap();
    assert_eq!(config.program, "mocha");
    assert_eq!(config.base_args, vec!["--no-color"]);
    assert_eq!(config.ready_timeout_ms, 500);
    assert_eq!(config.env.get("FORCE_COLOR").map(String::as_str), Some("0"));
    assert_eq!(config.fixture_extension, DEFAULT_FIXTURE_EXTENSION);
}

#[test]
fn parse_rejects_unknown_fields() {
    let err = RunnerConfig::parse("programme = \"mocha\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn validate_rejects_empty_program() {
    let err = RunnerConfig::parse("program = \"  \"").unwrap_err();
    assert!(matches!(err, ConfigError::EmptyProgram));
}

#[test]
fn validate_rejects_zero_timeout() {
    let err = RunnerConfig::parse("ready_timeout_ms = 0").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidTimeout(0)));
}

#[test]
fn validate_rejects_bad_ready_pattern() {
    let err = RunnerConfig::parse("ready_pattern = \"[watch\"").unwrap_err();
    match err {
        ConfigError::InvalidRegex { pattern, .. } => assert_eq!(pattern, "[watch"),
        other => panic!("unexpected error: {}", other),
    }
}

#[test]
fn load_reads_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "program = \"node\"").unwrap();
    let config = RunnerConfig::load(file.path()).unwrap();
    assert_eq!(config.program, "node");
}

#[test]
fn load_reports_missing_file() {
    let err = RunnerConfig::load(Path::new("/nonexistent/runcheck.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
    assert!(err.to_string().contains("/nonexistent/runcheck.toml"));
}

#[test]
fn overrides_replace_only_given_values() {
    let config = RunnerConfig::default().with_overrides(Some("mocha".to_string()), None);
    assert_eq!(config.program, "mocha");
    assert_eq!(config.fixtures_dir, PathBuf::from("tests/fixtures"));

    let config = config.with_overrides(None, Some(PathBuf::from("/fixtures")));
    assert_eq!(config.program, "mocha");
    assert_eq!(config.fixtures_dir, PathBuf::from("/fixtures"));
}
