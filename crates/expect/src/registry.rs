// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The matcher registry.
//!
//! A fixed table binds `(shape, verb, arity)` keys to typed predicates.
//! Build one [`Registry`] per process and pass it to the call sites that
//! check results.

use crate::assertion::{Arg, Arity, Assertion, TestSet, Verb};
use crate::error::{ExpectError, MatchResult, Mismatch, UsageError};
use crate::predicates::{self as p, Captured};
use crate::result::{Collection, JsonResult, RunResult, Shape, SummarizedResult};
use std::collections::HashMap;

/// A predicate over one result shape.
#[derive(Clone, Copy)]
pub enum Predicate {
    Json(fn(&JsonResult, &[Arg]) -> MatchResult),
    Summarized(fn(&SummarizedResult, &[Arg]) -> MatchResult),
    /// Raw or summarized: anything carrying output text.
    Captured(fn(Captured<'_>, &[Arg]) -> MatchResult),
    Any(fn(&RunResult, &[Arg]) -> MatchResult),
}

impl Predicate {
    fn call(&self, subject: &RunResult, assertion: &Assertion) -> MatchResult {
        let args = assertion.args.as_slice();
        match (self, subject) {
            (Predicate::Json(f), RunResult::Json(r)) => f(r, args),
            (Predicate::Summarized(f), RunResult::Summarized(r)) => f(r, args),
            (Predicate::Captured(f), RunResult::Raw(r)) => f(
                Captured {
                    code: r.code,
                    output: &r.output,
                },
                args,
            ),
            (Predicate::Captured(f), RunResult::Summarized(r)) => f(
                Captured {
                    code: Some(r.code),
                    output: &r.output,
                },
                args,
            ),
            (Predicate::Any(f), _) => f(subject, args),
            _ => Err(unsupported(subject, assertion).into()),
        }
    }
}

/// An installed matcher: the positive predicate and, for matchers whose
/// negation is not the plain complement, the predicate checked under `not`.
#[derive(Clone, Copy)]
pub struct Matcher {
    pub positive: Predicate,
    pub negative: Option<Predicate>,
}

/// Lookup key of a registry entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MatcherKey {
    pub shape: Shape,
    pub verb: Verb,
    pub arity: Arity,
}

struct Entry {
    verb: Verb,
    arity: Arity,
    shapes: &'static [Shape],
    matcher: Matcher,
}

const JSON: &[Shape] = &[Shape::Json];
const SUMMARIZED: &[Shape] = &[Shape::Summarized];
const CAPTURED: &[Shape] = &[Shape::Raw, Shape::Summarized];
const ALL: &[Shape] = &[Shape::Raw, Shape::Json, Shape::Summarized];

const PASSES: Collection = Collection::Passes;
const FAILURES: Collection = Collection::Failures;
const PENDING: Collection = Collection::Pending;

fn entry(verb: Verb, arity: Arity, shapes: &'static [Shape], predicate: Predicate) -> Entry {
    Entry {
        verb,
        arity,
        shapes,
        matcher: Matcher {
            positive: predicate,
            negative: None,
        },
    }
}

impl Entry {
    /// `not` checks this predicate instead of complementing the positive one.
    fn negated_by(mut self, predicate: Predicate) -> Self {
        self.matcher.negative = Some(predicate);
        self
    }
}

fn entries() -> Vec<Entry> {
    use Arity::{Binary, Nullary, Unary, Variadic};
    vec![
        // Outcome
        entry(Verb::Passed, Nullary, JSON, Predicate::Json(p::json_passed)),
        entry(Verb::Passed, Nullary, CAPTURED, Predicate::Captured(p::captured_passed)),
        entry(Verb::Failed, Nullary, JSON, Predicate::Json(p::json_failed)),
        entry(Verb::Failed, Nullary, CAPTURED, Predicate::Captured(p::captured_failed)),
        entry(Verb::ExitCode, Unary, ALL, Predicate::Any(p::any_exit_code)),
        entry(Verb::PassedWithCount, Unary, JSON, Predicate::Json(p::json_passed_with_count))
            .negated_by(Predicate::Json(p::json_not_passed_with_count)),
        entry(Verb::FailedWithCount, Unary, JSON, Predicate::Json(p::json_failed_with_count))
            .negated_by(Predicate::Json(p::json_not_failed_with_count)),
        entry(
            Verb::PassedWithOutput,
            Unary,
            CAPTURED,
            Predicate::Captured(p::captured_passed_with_output),
        ),
        entry(
            Verb::FailedWithOutput,
            Unary,
            CAPTURED,
            Predicate::Captured(p::captured_failed_with_output),
        ),
        // Exact counts
        entry(Verb::Count(PASSES), Unary, JSON, Predicate::Json(p::json_passes_count)),
        entry(Verb::Count(FAILURES), Unary, JSON, Predicate::Json(p::json_failures_count)),
        entry(Verb::Count(PENDING), Unary, JSON, Predicate::Json(p::json_pending_count)),
        entry(
            Verb::Count(PASSES),
            Unary,
            SUMMARIZED,
            Predicate::Summarized(p::summarized_passing_count),
        ),
        entry(
            Verb::Count(FAILURES),
            Unary,
            SUMMARIZED,
            Predicate::Summarized(p::summarized_failing_count),
        ),
        entry(
            Verb::Count(PENDING),
            Unary,
            SUMMARIZED,
            Predicate::Summarized(p::summarized_pending_count),
        ),
        entry(Verb::TestCount, Unary, JSON, Predicate::Json(p::json_test_count)),
        // Existence
        entry(Verb::Tests(TestSet::Any), Nullary, JSON, Predicate::Json(p::json_has_tests)),
        entry(
            Verb::Tests(TestSet::In(PASSES)),
            Nullary,
            JSON,
            Predicate::Json(p::json_has_passes),
        ),
        entry(
            Verb::Tests(TestSet::In(FAILURES)),
            Nullary,
            JSON,
            Predicate::Json(p::json_has_failures),
        ),
        entry(
            Verb::Tests(TestSet::In(PENDING)),
            Nullary,
            JSON,
            Predicate::Json(p::json_has_pending),
        ),
        // Named tests: `not` means none of the titles
        entry(Verb::Tests(TestSet::Any), Variadic, JSON, Predicate::Json(p::json_ran_tests))
            .negated_by(Predicate::Json(p::json_ran_no_tests)),
        entry(
            Verb::Tests(TestSet::In(PASSES)),
            Variadic,
            JSON,
            Predicate::Json(p::json_passed_tests),
        )
        .negated_by(Predicate::Json(p::json_passed_no_tests)),
        entry(
            Verb::Tests(TestSet::In(FAILURES)),
            Variadic,
            JSON,
            Predicate::Json(p::json_failed_tests),
        )
        .negated_by(Predicate::Json(p::json_failed_no_tests)),
        entry(
            Verb::Tests(TestSet::In(PENDING)),
            Variadic,
            JSON,
            Predicate::Json(p::json_pending_tests),
        )
        .negated_by(Predicate::Json(p::json_pending_no_tests)),
        // Errors: `not` means none of the errors
        entry(Verb::FailedWithErrors, Variadic, JSON, Predicate::Json(p::json_failed_with_errors))
            .negated_by(Predicate::Json(p::json_not_failed_with_errors)),
        entry(Verb::Errors, Variadic, JSON, Predicate::Json(p::json_errors))
            .negated_by(Predicate::Json(p::json_no_errors)),
        // Order
        entry(Verb::TestOrder(PASSES), Variadic, JSON, Predicate::Json(p::json_passes_order)),
        entry(Verb::TestOrder(FAILURES), Variadic, JSON, Predicate::Json(p::json_failures_order)),
        entry(Verb::TestOrder(PENDING), Variadic, JSON, Predicate::Json(p::json_pending_order)),
        // Retries
        entry(Verb::RetriedTest, Unary, JSON, Predicate::Json(p::json_retried)),
        entry(Verb::RetriedTest, Binary, JSON, Predicate::Json(p::json_retried_times)),
        // Output
        entry(Verb::ContainOutput, Unary, CAPTURED, Predicate::Captured(p::captured_contains)),
        entry(
            Verb::ContainOutputOnce,
            Unary,
            CAPTURED,
            Predicate::Captured(p::captured_contains_once),
        ),
    ]
}

fn unsupported(subject: &RunResult, assertion: &Assertion) -> UsageError {
    UsageError::Unsupported {
        assertion: assertion.verb.to_string(),
        shape: subject.shape(),
        count: assertion.args.len(),
    }
}

/// Immutable table of matchers.
pub struct Registry {
    table: HashMap<MatcherKey, Matcher>,
}

impl Registry {
    /// Build the registry with every built-in matcher installed.
    pub fn new() -> Self {
        let mut table = HashMap::new();
        for e in entries() {
            for &shape in e.shapes {
                table.insert(
                    MatcherKey {
                        shape,
                        verb: e.verb,
                        arity: e.arity,
                    },
                    e.matcher,
                );
            }
        }
        Self { table }
    }

    /// Number of installed `(shape, verb, arity)` bindings.
    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn contains(&self, key: &MatcherKey) -> bool {
        self.table.contains_key(key)
    }

    /// Find the matcher for an assertion against a result.
    pub fn resolve(&self, subject: &RunResult, assertion: &Assertion) -> Result<Matcher, UsageError> {
        Arity::candidates(assertion.args.len())
            .iter()
            .find_map(|&arity| {
                self.table.get(&MatcherKey {
                    shape: subject.shape(),
                    verb: assertion.verb,
                    arity,
                })
            })
            .copied()
            .ok_or_else(|| unsupported(subject, assertion))
    }

    /// Evaluate an assertion. Usage errors are returned as-is, even when negated.
    ///
    /// `not` complements the positive predicate unless the matcher carries its
    /// own negative form, which is then checked as stated.
    pub fn check(&self, subject: &RunResult, assertion: &Assertion) -> MatchResult {
        let matcher = self.resolve(subject, assertion)?;
        let (outcome, complement) = match (assertion.negated, matcher.negative) {
            (true, Some(negative)) => (negative.call(subject, assertion), false),
            (negated, _) => (matcher.positive.call(subject, assertion), negated),
        };
        let failure = |explanation: String| {
            ExpectError::Mismatch(Mismatch {
                subject: subject.to_string(),
                assertion: assertion.to_string(),
                explanation,
            })
        };
        match (outcome, complement) {
            (Ok(()), false) => Ok(()),
            (Ok(()), true) => Err(failure(String::new())),
            (Err(ExpectError::Mismatch(_)), true) => Ok(()),
            (Err(ExpectError::Mismatch(m)), false) => Err(failure(m.explanation)),
            (Err(usage @ ExpectError::Usage(_)), _) => Err(usage),
        }
    }

    /// Like [`Registry::check`], but panics on any error, failing the calling test.
    #[track_caller]
    #[allow(clippy::panic)]
    pub fn assert(&self, subject: &RunResult, assertion: &Assertion) {
        if let Err(e) = self.check(subject, assertion) {
            panic!("{}", e);
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
