// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;

#[rstest]
#[case("foo foo", 2)]
#[case("foo bar", 1)]
#[case("baz", 0)]
fn text_counts_occurrences(#[case] haystack: &str, #[case] expected: usize) {
    let pattern = OutputPattern::from("foo");
    assert_eq!(pattern.count_in(haystack).unwrap(), expected);
}

#[test]
fn text_is_escaped_before_counting() {
    let pattern = OutputPattern::from("this.foo = 3");
    assert_eq!(pattern.count_in("this_foo = 3").unwrap(), 0);
    assert_eq!(pattern.count_in("this.foo = 3").unwrap(), 1);
}

#[test]
fn regex_is_used_as_is() {
    let pattern = OutputPattern::regex(r"teardown: this.foo = \d").unwrap();
    assert_eq!(
        pattern
            .count_in("teardown: this.foo = 3\nteardown: this.foo = 4\n")
            .unwrap(),
        2
    );
}

#[test]
fn search_is_unanchored() {
    assert!(OutputPattern::from("bar").is_found_in("foo bar baz"));
    assert!(OutputPattern::regex("b.z$").unwrap().is_found_in("foo bar baz"));
    assert!(!OutputPattern::from("qux").is_found_in("foo bar baz"));
}

#[test]
fn invalid_regex_is_a_usage_error() {
    let err = OutputPattern::regex("(unclosed").unwrap_err();
    assert!(matches!(err, UsageError::InvalidPattern { .. }));
}

#[test]
fn display_distinguishes_text_and_regex() {
    assert_eq!(OutputPattern::from("a").to_string(), r#""a""#);
    assert_eq!(OutputPattern::regex("a+").unwrap().to_string(), "/a+/");
}
