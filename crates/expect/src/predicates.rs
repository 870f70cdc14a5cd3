// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Predicate functions installed by the registry.
//!
//! Each predicate receives an already-typed result and checks the positive
//! form of its assertion. Negation is applied by the registry, which checks
//! the `not`/`no` predicates here instead where one is installed.

use crate::assertion::Arg;
use crate::error::{ExpectError, MatchResult, UsageError};
use crate::pattern::OutputPattern;
use crate::result::{Collection, JsonResult, RunResult, SummarizedResult, TestEntry};
use crate::satisfy::Satisfy;
use serde_json::Value;
use std::borrow::Cow;

/// Code and output of a raw or summarized result.
#[derive(Clone, Copy, Debug)]
pub struct Captured<'a> {
    pub code: Option<i32>,
    pub output: &'a str,
}

// =============================================================================
// Argument helpers
// =============================================================================

fn arg<'a>(args: &'a [Arg], index: usize, expected: &'static str) -> Result<&'a Arg, UsageError> {
    args.get(index)
        .ok_or(UsageError::MissingArgument { index, expected })
}

fn number(args: &[Arg], index: usize) -> Result<i64, UsageError> {
    match arg(args, index, "a number")? {
        Arg::Number(n) => Ok(*n),
        other => Err(UsageError::InvalidArgument {
            index,
            expected: "a number",
            got: other.kind().to_string(),
        }),
    }
}

/// Title text; a bare number is taken as its decimal form.
fn text(args: &[Arg], index: usize) -> Result<Cow<'_, str>, UsageError> {
    match arg(args, index, "a string")? {
        Arg::Text(s) => Ok(Cow::Borrowed(s.as_str())),
        Arg::Number(n) => Ok(Cow::Owned(n.to_string())),
        other => Err(UsageError::InvalidArgument {
            index,
            expected: "a string",
            got: other.kind().to_string(),
        }),
    }
}

fn texts(args: &[Arg]) -> Result<Vec<Cow<'_, str>>, UsageError> {
    (0..args.len()).map(|i| text(args, i)).collect()
}

fn output_pattern(args: &[Arg], index: usize) -> Result<OutputPattern, UsageError> {
    arg(args, index, "a string or regex")?.to_output_pattern(index)
}

/// Joins problems into one explanation; no problems means success.
fn verdict(problems: Vec<String>) -> MatchResult {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(ExpectError::mismatch(problems.join("\n")))
    }
}

fn titles(entries: &[TestEntry]) -> String {
    let list: Vec<String> = entries.iter().map(|e| format!("{:?}", e.title)).collect();
    format!("[{}]", list.join(", "))
}

fn count_equals(label: &str, actual: u64, expected: i64) -> Option<String> {
    if i64::try_from(actual).is_ok_and(|a| a == expected) {
        None
    } else {
        Some(format!("{}: expected {}, got {}", label, expected, actual))
    }
}

// =============================================================================
// Outcome
// =============================================================================

fn json_passed_problems(r: &JsonResult) -> Vec<String> {
    let mut problems = Vec::new();
    if r.code != 0 {
        problems.push(format!("code: expected 0, got {}", r.code));
    }
    if r.stats.failures != 0 {
        problems.push(format!("stats.failures: expected 0, got {}", r.stats.failures));
    }
    if !r.failures.is_empty() {
        problems.push(format!("failures: expected empty, got {}", titles(&r.failures)));
    }
    problems
}

fn json_failed_problems(r: &JsonResult) -> Vec<String> {
    let mut problems = Vec::new();
    if r.code <= 0 {
        problems.push(format!("code: expected greater than 0, got {}", r.code));
    }
    if r.stats.failures == 0 {
        problems.push("stats.failures: expected greater than 0, got 0".to_string());
    }
    if r.failures.is_empty() {
        problems.push("failures: expected non-empty, got []".to_string());
    }
    problems
}

fn describe_code(code: Option<i32>) -> String {
    code.map_or_else(|| "none".to_string(), |c| c.to_string())
}

fn captured_passed_problems(c: Captured<'_>) -> Vec<String> {
    if c.code == Some(0) {
        vec![]
    } else {
        vec![format!("code: expected 0, got {}", describe_code(c.code))]
    }
}

fn captured_failed_problems(c: Captured<'_>) -> Vec<String> {
    if c.code.is_some_and(|code| code > 0) {
        vec![]
    } else {
        vec![format!(
            "code: expected greater than 0, got {}",
            describe_code(c.code)
        )]
    }
}

pub(crate) fn json_passed(r: &JsonResult, _: &[Arg]) -> MatchResult {
    verdict(json_passed_problems(r))
}

pub(crate) fn json_failed(r: &JsonResult, _: &[Arg]) -> MatchResult {
    verdict(json_failed_problems(r))
}

pub(crate) fn captured_passed(c: Captured<'_>, _: &[Arg]) -> MatchResult {
    verdict(captured_passed_problems(c))
}

pub(crate) fn captured_failed(c: Captured<'_>, _: &[Arg]) -> MatchResult {
    verdict(captured_failed_problems(c))
}

pub(crate) fn any_exit_code(r: &RunResult, args: &[Arg]) -> MatchResult {
    let expected = number(args, 0)?;
    match r.code() {
        Some(code) if i64::from(code) == expected => Ok(()),
        code => Err(ExpectError::mismatch(format!(
            "code: expected {}, got {}",
            expected,
            describe_code(code)
        ))),
    }
}

pub(crate) fn json_passed_with_count(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let expected = number(args, 0)?;
    let mut problems = json_passed_problems(r);
    problems.extend(count_equals("stats.passes", r.stats.passes, expected));
    verdict(problems)
}

pub(crate) fn json_failed_with_count(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let expected = number(args, 0)?;
    let mut problems = json_failed_problems(r);
    problems.extend(count_equals("stats.failures", r.stats.failures, expected));
    verdict(problems)
}

/// `not`: neither the outcome nor the count holds.
fn outcome_and_count_absent(
    outcome_problems: Vec<String>,
    outcome: &str,
    label: &str,
    actual: u64,
    expected: i64,
) -> MatchResult {
    let mut problems = Vec::new();
    if outcome_problems.is_empty() {
        problems.push(format!("expected not to have {}", outcome));
    }
    if count_equals(label, actual, expected).is_none() {
        problems.push(format!("{}: expected not {}", label, expected));
    }
    verdict(problems)
}

pub(crate) fn json_not_passed_with_count(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let expected = number(args, 0)?;
    outcome_and_count_absent(
        json_passed_problems(r),
        "passed",
        "stats.passes",
        r.stats.passes,
        expected,
    )
}

pub(crate) fn json_not_failed_with_count(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let expected = number(args, 0)?;
    outcome_and_count_absent(
        json_failed_problems(r),
        "failed",
        "stats.failures",
        r.stats.failures,
        expected,
    )
}

fn output_problem(c: Captured<'_>, pattern: &OutputPattern) -> Option<String> {
    if pattern.is_found_in(c.output) {
        None
    } else {
        Some(format!("output: expected to contain {}", pattern))
    }
}

pub(crate) fn captured_passed_with_output(c: Captured<'_>, args: &[Arg]) -> MatchResult {
    let pattern = output_pattern(args, 0)?;
    let mut problems = captured_passed_problems(c);
    problems.extend(output_problem(c, &pattern));
    verdict(problems)
}

pub(crate) fn captured_failed_with_output(c: Captured<'_>, args: &[Arg]) -> MatchResult {
    let pattern = output_pattern(args, 0)?;
    let mut problems = captured_failed_problems(c);
    problems.extend(output_problem(c, &pattern));
    verdict(problems)
}

// =============================================================================
// Counts
// =============================================================================

fn json_stat(r: &JsonResult, collection: Collection) -> u64 {
    match collection {
        Collection::Passes => r.stats.passes,
        Collection::Failures => r.stats.failures,
        Collection::Pending => r.stats.pending,
    }
}

fn json_count(r: &JsonResult, collection: Collection, args: &[Arg]) -> MatchResult {
    let expected = number(args, 0)?;
    let label = format!("stats.{}", collection.key());
    verdict(
        count_equals(&label, json_stat(r, collection), expected)
            .into_iter()
            .collect(),
    )
}

pub(crate) fn json_passes_count(r: &JsonResult, args: &[Arg]) -> MatchResult {
    json_count(r, Collection::Passes, args)
}

pub(crate) fn json_failures_count(r: &JsonResult, args: &[Arg]) -> MatchResult {
    json_count(r, Collection::Failures, args)
}

pub(crate) fn json_pending_count(r: &JsonResult, args: &[Arg]) -> MatchResult {
    json_count(r, Collection::Pending, args)
}

pub(crate) fn json_test_count(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let expected = number(args, 0)?;
    verdict(
        count_equals("stats.tests", r.stats.tests, expected)
            .into_iter()
            .collect(),
    )
}

fn summarized_count(label: &str, actual: u64, args: &[Arg]) -> MatchResult {
    let expected = number(args, 0)?;
    verdict(count_equals(label, actual, expected).into_iter().collect())
}

pub(crate) fn summarized_passing_count(r: &SummarizedResult, args: &[Arg]) -> MatchResult {
    summarized_count("passing", r.passing, args)
}

pub(crate) fn summarized_failing_count(r: &SummarizedResult, args: &[Arg]) -> MatchResult {
    summarized_count("failing", r.failing, args)
}

pub(crate) fn summarized_pending_count(r: &SummarizedResult, args: &[Arg]) -> MatchResult {
    summarized_count("pending", r.pending, args)
}

// =============================================================================
// Existence (> 0, not an exact count)
// =============================================================================

fn positive(label: &str, actual: u64) -> MatchResult {
    if actual > 0 {
        Ok(())
    } else {
        Err(ExpectError::mismatch(format!(
            "{}: expected greater than 0, got 0",
            label
        )))
    }
}

pub(crate) fn json_has_tests(r: &JsonResult, _: &[Arg]) -> MatchResult {
    positive("stats.tests", r.stats.tests)
}

pub(crate) fn json_has_passes(r: &JsonResult, _: &[Arg]) -> MatchResult {
    positive("stats.passes", r.stats.passes)
}

pub(crate) fn json_has_failures(r: &JsonResult, _: &[Arg]) -> MatchResult {
    positive("stats.failures", r.stats.failures)
}

pub(crate) fn json_has_pending(r: &JsonResult, _: &[Arg]) -> MatchResult {
    positive("stats.pending", r.stats.pending)
}

// =============================================================================
// Named tests
// =============================================================================

fn has_title(collections: &[&[TestEntry]], title: &str) -> bool {
    collections
        .iter()
        .flat_map(|entries| entries.iter())
        .any(|entry| entry.title == title)
}

fn named(collections: &[&[TestEntry]], label: &str, args: &[Arg]) -> MatchResult {
    let wanted = texts(args)?;
    let problems = wanted
        .iter()
        .filter(|title| !has_title(collections, title))
        .map(|title| format!("{}: no test titled {:?}", label, title))
        .collect();
    verdict(problems)
}

/// `not`: none of the titles may appear.
fn named_none(collections: &[&[TestEntry]], label: &str, args: &[Arg]) -> MatchResult {
    let wanted = texts(args)?;
    let problems = wanted
        .iter()
        .filter(|title| has_title(collections, title))
        .map(|title| format!("{}: found test titled {:?}", label, title))
        .collect();
    verdict(problems)
}

pub(crate) fn json_ran_tests(r: &JsonResult, args: &[Arg]) -> MatchResult {
    named(&r.all_collections(), "tests", args)
}

pub(crate) fn json_passed_tests(r: &JsonResult, args: &[Arg]) -> MatchResult {
    named(&[r.passes.as_slice()], "passes", args)
}

pub(crate) fn json_failed_tests(r: &JsonResult, args: &[Arg]) -> MatchResult {
    named(&[r.failures.as_slice()], "failures", args)
}

pub(crate) fn json_pending_tests(r: &JsonResult, args: &[Arg]) -> MatchResult {
    named(&[r.pending.as_slice()], "pending", args)
}

pub(crate) fn json_ran_no_tests(r: &JsonResult, args: &[Arg]) -> MatchResult {
    named_none(&r.all_collections(), "tests", args)
}

pub(crate) fn json_passed_no_tests(r: &JsonResult, args: &[Arg]) -> MatchResult {
    named_none(&[r.passes.as_slice()], "passes", args)
}

pub(crate) fn json_failed_no_tests(r: &JsonResult, args: &[Arg]) -> MatchResult {
    named_none(&[r.failures.as_slice()], "failures", args)
}

pub(crate) fn json_pending_no_tests(r: &JsonResult, args: &[Arg]) -> MatchResult {
    named_none(&[r.pending.as_slice()], "pending", args)
}

// =============================================================================
// Errors
// =============================================================================

/// Direct match, or the same expectation on the error's `message`.
fn err_satisfies(err: &Value, expected: &Satisfy) -> bool {
    expected.is_satisfied_by(err) || Satisfy::key("message", expected.clone()).is_satisfied_by(err)
}

fn has_error(r: &JsonResult, expected: &Satisfy) -> bool {
    r.failures.iter().any(|f| err_satisfies(&f.err, expected))
}

fn error_problems(r: &JsonResult, args: &[Arg]) -> Vec<String> {
    args.iter()
        .map(Arg::to_satisfy)
        .filter(|expected| !has_error(r, expected))
        .map(|expected| {
            format!(
                "failures: no error satisfying {} or {{message: {}}}",
                expected, expected
            )
        })
        .collect()
}

fn found_error_problems(r: &JsonResult, args: &[Arg]) -> Vec<String> {
    args.iter()
        .map(Arg::to_satisfy)
        .filter(|expected| has_error(r, expected))
        .map(|expected| format!("failures: found error satisfying {}", expected))
        .collect()
}

pub(crate) fn json_failed_with_errors(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let mut problems = json_failed_problems(r);
    problems.extend(error_problems(r, args));
    verdict(problems)
}

/// `not`: the run did not fail and no failure carries any of the errors.
pub(crate) fn json_not_failed_with_errors(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let mut problems = Vec::new();
    if json_failed_problems(r).is_empty() {
        problems.push("expected not to have failed".to_string());
    }
    problems.extend(found_error_problems(r, args));
    verdict(problems)
}

pub(crate) fn json_errors(r: &JsonResult, args: &[Arg]) -> MatchResult {
    verdict(error_problems(r, args))
}

pub(crate) fn json_no_errors(r: &JsonResult, args: &[Arg]) -> MatchResult {
    verdict(found_error_problems(r, args))
}

// =============================================================================
// Order
// =============================================================================

fn order_item(item: &Value) -> Satisfy {
    match item {
        Value::String(title) => Satisfy::title(title.clone()),
        other => Satisfy::from(other.clone()),
    }
}

fn order_expectations(args: &[Arg]) -> Result<Vec<Satisfy>, UsageError> {
    if let [Arg::Value(Value::Array(items))] = args {
        return Ok(items.iter().map(order_item).collect());
    }
    args.iter()
        .enumerate()
        .map(|(index, arg)| match arg {
            Arg::Text(title) => Ok(Satisfy::title(title.clone())),
            Arg::Pattern(re) => Ok(Satisfy::key("title", re.clone())),
            Arg::Value(v @ Value::Object(_)) => Ok(Satisfy::from(v.clone())),
            other => Err(UsageError::InvalidArgument {
                index,
                expected: "a title, a partial test object, or an array of them",
                got: other.kind().to_string(),
            }),
        })
        .collect()
}

fn order(entries: &[TestEntry], label: &str, args: &[Arg]) -> MatchResult {
    let expected = order_expectations(args)?;
    let prefix: Vec<Value> = entries
        .iter()
        .take(expected.len())
        .map(TestEntry::to_value)
        .collect();
    Satisfy::Array(expected)
        .check(&Value::Array(prefix))
        .map_err(|m| {
            ExpectError::mismatch(format!(
                "{} {}\n{} were {}",
                label,
                m,
                label,
                titles(entries)
            ))
        })
}

pub(crate) fn json_passes_order(r: &JsonResult, args: &[Arg]) -> MatchResult {
    order(&r.passes, "passes", args)
}

pub(crate) fn json_failures_order(r: &JsonResult, args: &[Arg]) -> MatchResult {
    order(&r.failures, "failures", args)
}

pub(crate) fn json_pending_order(r: &JsonResult, args: &[Arg]) -> MatchResult {
    order(&r.pending, "pending", args)
}

// =============================================================================
// Retries
// =============================================================================

fn retried(r: &JsonResult, title: &str, accept: impl Fn(u32) -> bool, wanted: &str) -> MatchResult {
    let found: Vec<&TestEntry> = r.tests.iter().filter(|t| t.title == title).collect();
    if found
        .iter()
        .any(|t| t.current_retry.is_some_and(&accept))
    {
        return Ok(());
    }
    let seen: Vec<String> = found
        .iter()
        .map(|t| describe_retry(t.current_retry))
        .collect();
    let explanation = if seen.is_empty() {
        format!("tests: no test titled {:?}", title)
    } else {
        format!(
            "tests: {:?} has currentRetry {}, expected {}",
            title,
            seen.join(", "),
            wanted
        )
    };
    Err(ExpectError::mismatch(explanation))
}

fn describe_retry(retry: Option<u32>) -> String {
    retry.map_or_else(|| "unset".to_string(), |r| r.to_string())
}

pub(crate) fn json_retried(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let title = text(args, 0)?;
    retried(r, &title, |retry| retry > 0, "a positive count")
}

pub(crate) fn json_retried_times(r: &JsonResult, args: &[Arg]) -> MatchResult {
    let title = text(args, 0)?;
    let times = number(args, 1)?;
    retried(r, &title, |retry| i64::from(retry) == times, &times.to_string())
}

// =============================================================================
// Output
// =============================================================================

pub(crate) fn captured_contains(c: Captured<'_>, args: &[Arg]) -> MatchResult {
    let pattern = output_pattern(args, 0)?;
    verdict(output_problem(c, &pattern).into_iter().collect())
}

pub(crate) fn captured_contains_once(c: Captured<'_>, args: &[Arg]) -> MatchResult {
    let pattern = output_pattern(args, 0)?;
    let found = pattern.count_in(c.output)?;
    if found == 1 {
        Ok(())
    } else {
        Err(ExpectError::mismatch(format!(
            "output: expected exactly one match of {}, found {}",
            pattern, found
        )))
    }
}
