// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed assertions and the phrase surface that produces them.
//!
//! An [`Assertion`] is a [`Verb`], a negation flag, and its arguments.
//! Phrases such as `"not to have passed test order"` are resolved to a
//! verb once, by [`Assertion::parse`]; evaluation never looks at text.

use crate::error::UsageError;
use crate::pattern::OutputPattern;
use crate::result::Collection;
use crate::satisfy::Satisfy;
use regex::{Captures, Regex};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// Which tests a named-test or existence check looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TestSet {
    /// Every test the runner reported.
    Any,
    In(Collection),
}

/// What an assertion checks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Verb {
    Passed,
    Failed,
    ExitCode,
    PassedWithCount,
    FailedWithCount,
    PassedWithOutput,
    FailedWithOutput,
    Count(Collection),
    TestCount,
    /// Existence without arguments, named titles with arguments.
    Tests(TestSet),
    FailedWithErrors,
    Errors,
    TestOrder(Collection),
    RetriedTest,
    ContainOutput,
    ContainOutputOnce,
}

fn outcome_word(collection: Collection) -> &'static str {
    match collection {
        Collection::Passes => "passed",
        Collection::Failures => "failed",
        Collection::Pending => "pending",
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verb::Passed => f.write_str("to have passed"),
            Verb::Failed => f.write_str("to have failed"),
            Verb::ExitCode => f.write_str("to have exit code"),
            Verb::PassedWithCount => f.write_str("to have passed with count"),
            Verb::FailedWithCount => f.write_str("to have failed with count"),
            Verb::PassedWithOutput => f.write_str("to have passed with output"),
            Verb::FailedWithOutput => f.write_str("to have failed with output"),
            Verb::Count(c) => write!(f, "to have {} test count", outcome_word(*c)),
            Verb::TestCount => f.write_str("to have test count"),
            Verb::Tests(TestSet::Any) => f.write_str("to have run tests"),
            Verb::Tests(TestSet::In(c)) => write!(f, "to have {} tests", outcome_word(*c)),
            Verb::FailedWithErrors => f.write_str("to have failed with errors"),
            Verb::Errors => f.write_str("to have errors"),
            Verb::TestOrder(c) => write!(f, "to have {} test order", outcome_word(*c)),
            Verb::RetriedTest => f.write_str("to have retried test"),
            Verb::ContainOutput => f.write_str("to contain output"),
            Verb::ContainOutputOnce => f.write_str("to contain output once"),
        }
    }
}

/// How many arguments an entry takes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Arity {
    Nullary,
    Unary,
    Binary,
    /// One or more.
    Variadic,
}

impl Arity {
    /// Arities that accept `count` arguments, most specific first.
    pub fn candidates(count: usize) -> &'static [Arity] {
        match count {
            0 => &[Arity::Nullary],
            1 => &[Arity::Unary, Arity::Variadic],
            2 => &[Arity::Binary, Arity::Variadic],
            _ => &[Arity::Variadic],
        }
    }
}

/// A typed assertion argument.
#[derive(Clone, Debug)]
pub enum Arg {
    Number(i64),
    Text(String),
    Pattern(Regex),
    Value(Value),
}

impl Arg {
    /// Short description used in usage errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Arg::Number(_) => "a number",
            Arg::Text(_) => "a string",
            Arg::Pattern(_) => "a regex",
            Arg::Value(Value::Array(_)) => "an array",
            Arg::Value(Value::Object(_)) => "an object",
            Arg::Value(_) => "a JSON value",
        }
    }

    /// Structural expectation for this argument.
    pub fn to_satisfy(&self) -> Satisfy {
        match self {
            Arg::Number(n) => Satisfy::Equal(Value::from(*n)),
            Arg::Text(s) => Satisfy::from(s.as_str()),
            Arg::Pattern(re) => Satisfy::Matches(re.clone()),
            Arg::Value(v) => Satisfy::from(v.clone()),
        }
    }

    /// Text or regex; anything else is a usage error.
    pub fn to_output_pattern(&self, index: usize) -> Result<OutputPattern, UsageError> {
        match self {
            Arg::Text(s) => Ok(OutputPattern::Text(s.clone())),
            Arg::Pattern(re) => Ok(OutputPattern::Regex(re.clone())),
            other => Err(UsageError::InvalidArgument {
                index,
                expected: "a string or regex",
                got: other.kind().to_string(),
            }),
        }
    }
}

impl FromStr for Arg {
    type Err = UsageError;

    /// `/re/` is a regex, an integer is a number, a leading `{` or `[` is
    /// JSON, anything else is text.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() >= 2 && s.starts_with('/') && s.ends_with('/') {
            let inner = &s[1..s.len() - 1];
            return Regex::new(inner)
                .map(Arg::Pattern)
                .map_err(|e| UsageError::InvalidPattern {
                    pattern: inner.to_string(),
                    error: e.to_string(),
                });
        }
        if let Ok(n) = s.parse::<i64>() {
            return Ok(Arg::Number(n));
        }
        let trimmed = s.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(value) = serde_json::from_str(s) {
                return Ok(Arg::Value(value));
            }
        }
        Ok(Arg::Text(s.to_string()))
    }
}

impl fmt::Display for Arg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arg::Number(n) => write!(f, "{}", n),
            Arg::Text(s) => write!(f, "{:?}", s),
            Arg::Pattern(re) => write!(f, "/{}/", re.as_str()),
            Arg::Value(v) => write!(f, "{}", v),
        }
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Number(n)
    }
}

impl From<i32> for Arg {
    fn from(n: i32) -> Self {
        Arg::Number(i64::from(n))
    }
}

impl From<u32> for Arg {
    fn from(n: u32) -> Self {
        Arg::Number(i64::from(n))
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl From<String> for Arg {
    fn from(s: String) -> Self {
        Arg::Text(s)
    }
}

impl From<Regex> for Arg {
    fn from(re: Regex) -> Self {
        Arg::Pattern(re)
    }
}

impl From<Value> for Arg {
    fn from(v: Value) -> Self {
        Arg::Value(v)
    }
}

impl From<OutputPattern> for Arg {
    fn from(p: OutputPattern) -> Self {
        match p {
            OutputPattern::Text(s) => Arg::Text(s),
            OutputPattern::Regex(re) => Arg::Pattern(re),
        }
    }
}

/// A verb, its arguments, and whether it is negated.
#[derive(Clone, Debug)]
pub struct Assertion {
    pub negated: bool,
    pub verb: Verb,
    pub args: Vec<Arg>,
}

/// How a matched phrase becomes a verb.
#[derive(Clone, Copy)]
enum PhraseKind {
    Fixed(Verb),
    Count,
    Tests,
    TestOrder,
}

fn collection_word(caps: &Captures<'_>) -> Option<Collection> {
    match caps.get(1)?.as_str() {
        "passed" => Some(Collection::Passes),
        "failed" => Some(Collection::Failures),
        "pending" => Some(Collection::Pending),
        _ => None,
    }
}

impl PhraseKind {
    fn verb(self, caps: &Captures<'_>) -> Option<Verb> {
        match self {
            PhraseKind::Fixed(verb) => Some(verb),
            PhraseKind::Count => collection_word(caps).map(Verb::Count),
            PhraseKind::Tests => collection_word(caps).map(|c| Verb::Tests(TestSet::In(c))),
            PhraseKind::TestOrder => collection_word(caps).map(Verb::TestOrder),
        }
    }
}

static PHRASES: LazyLock<Vec<(Regex, PhraseKind)>> = LazyLock::new(|| {
    [
        (r"^to have (?:passed|succeeded)$", PhraseKind::Fixed(Verb::Passed)),
        (r"^to have failed$", PhraseKind::Fixed(Verb::Failed)),
        (
            r"^to have (?:completed with )?(?:exit )?code$",
            PhraseKind::Fixed(Verb::ExitCode),
        ),
        (
            r"^to have passed (?:with|having) count$",
            PhraseKind::Fixed(Verb::PassedWithCount),
        ),
        (
            r"^to have failed (?:with|having) count$",
            PhraseKind::Fixed(Verb::FailedWithCount),
        ),
        (
            r"^to have passed (?:with|having) output$",
            PhraseKind::Fixed(Verb::PassedWithOutput),
        ),
        (
            r"^to have failed (?:with|having) output$",
            PhraseKind::Fixed(Verb::FailedWithOutput),
        ),
        (r"^to have (passed|failed|pending) (?:test )?count$", PhraseKind::Count),
        (r"^to have test count$", PhraseKind::Fixed(Verb::TestCount)),
        (
            r"^to have (?:tests|run tests?)$",
            PhraseKind::Fixed(Verb::Tests(TestSet::Any)),
        ),
        (r"^to have (passed|failed|pending) tests?$", PhraseKind::Tests),
        (
            r"^to have failed with errors?$",
            PhraseKind::Fixed(Verb::FailedWithErrors),
        ),
        (r"^to have errors?$", PhraseKind::Fixed(Verb::Errors)),
        (r"^to have (passed|failed|pending) test order$", PhraseKind::TestOrder),
        (r"^to have retried test$", PhraseKind::Fixed(Verb::RetriedTest)),
        (
            r"^to contain (?:output )?once$",
            PhraseKind::Fixed(Verb::ContainOutputOnce),
        ),
        (r"^to contain(?: output)?$", PhraseKind::Fixed(Verb::ContainOutput)),
    ]
    .into_iter()
    .filter_map(|(pattern, kind)| Regex::new(pattern).ok().map(|re| (re, kind)))
    .collect()
});

impl Assertion {
    pub fn new(verb: Verb) -> Self {
        Self {
            negated: false,
            verb,
            args: Vec::new(),
        }
    }

    /// Toggle negation.
    #[allow(clippy::should_implement_trait)]
    pub fn not(mut self) -> Self {
        self.negated = !self.negated;
        self
    }

    pub fn with_arg(mut self, arg: impl Into<Arg>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn with_args<A: Into<Arg>>(mut self, args: impl IntoIterator<Item = A>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Resolve a phrase such as `"not to have failed test count"`.
    pub fn parse(phrase: &str, args: Vec<Arg>) -> Result<Self, UsageError> {
        let normalized = phrase
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let (negated, rest) = match normalized.strip_prefix("not ") {
            Some(rest) => (true, rest),
            None => (false, normalized.as_str()),
        };

        let verb = PHRASES
            .iter()
            .find_map(|(re, kind)| re.captures(rest).and_then(|caps| kind.verb(&caps)))
            .ok_or_else(|| UsageError::UnknownPhrase(phrase.to_string()))?;

        Ok(Self {
            negated,
            verb,
            args,
        })
    }

    pub fn passed() -> Self {
        Self::new(Verb::Passed)
    }

    pub fn failed() -> Self {
        Self::new(Verb::Failed)
    }

    pub fn exit_code(code: i32) -> Self {
        Self::new(Verb::ExitCode).with_arg(code)
    }

    pub fn passed_with_count(count: i64) -> Self {
        Self::new(Verb::PassedWithCount).with_arg(count)
    }

    pub fn failed_with_count(count: i64) -> Self {
        Self::new(Verb::FailedWithCount).with_arg(count)
    }

    pub fn passed_with_output(output: impl Into<OutputPattern>) -> Self {
        Self::new(Verb::PassedWithOutput).with_arg(output.into())
    }

    pub fn failed_with_output(output: impl Into<OutputPattern>) -> Self {
        Self::new(Verb::FailedWithOutput).with_arg(output.into())
    }

    /// Exact count of one collection.
    pub fn count(collection: Collection, count: i64) -> Self {
        Self::new(Verb::Count(collection)).with_arg(count)
    }

    pub fn test_count(count: i64) -> Self {
        Self::new(Verb::TestCount).with_arg(count)
    }

    /// At least one test of the set exists.
    pub fn has_tests(set: TestSet) -> Self {
        Self::new(Verb::Tests(set))
    }

    /// Every title appears in the set.
    pub fn named_tests<S: Into<String>>(set: TestSet, titles: impl IntoIterator<Item = S>) -> Self {
        Self::new(Verb::Tests(set)).with_args(titles.into_iter().map(|t| Arg::Text(t.into())))
    }

    pub fn failed_with_errors<A: Into<Arg>>(errors: impl IntoIterator<Item = A>) -> Self {
        Self::new(Verb::FailedWithErrors).with_args(errors)
    }

    pub fn errors<A: Into<Arg>>(errors: impl IntoIterator<Item = A>) -> Self {
        Self::new(Verb::Errors).with_args(errors)
    }

    /// Titles (or partial objects) in prefix order.
    pub fn test_order<A: Into<Arg>>(collection: Collection, titles: impl IntoIterator<Item = A>) -> Self {
        Self::new(Verb::TestOrder(collection)).with_args(titles)
    }

    pub fn retried_test(title: impl Into<String>) -> Self {
        Self::new(Verb::RetriedTest).with_arg(Arg::Text(title.into()))
    }

    pub fn retried_test_times(title: impl Into<String>, times: u32) -> Self {
        Self::retried_test(title).with_arg(times)
    }

    pub fn contain_output(output: impl Into<OutputPattern>) -> Self {
        Self::new(Verb::ContainOutput).with_arg(output.into())
    }

    pub fn contain_output_once(output: impl Into<OutputPattern>) -> Self {
        Self::new(Verb::ContainOutputOnce).with_arg(output.into())
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negated {
            f.write_str("not ")?;
        }
        write!(f, "{}", self.verb)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "assertion_tests.rs"]
mod tests;
