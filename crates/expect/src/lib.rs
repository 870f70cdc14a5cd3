// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Typed matchers over test-runner results.
//!
//! A runner invocation produces a [`RunResult`] (raw capture, parsed JSON
//! report, or summarized counts). An [`Assertion`] describes what to check,
//! and a [`Registry`] resolves it to a predicate for the result's shape.
//!
//! ```
//! use runcheck_expect::{Assertion, RawResult, Registry, RunResult};
//!
//! let registry = Registry::new();
//! let result = RunResult::from(RawResult {
//!     output: "setup: ok\n  1 passing\n".to_string(),
//!     code: Some(0),
//!     args: vec![],
//! });
//!
//! registry.assert(&result, &Assertion::passed());
//! registry.assert(&result, &Assertion::contain_output_once("setup"));
//! assert!(registry.check(&result, &Assertion::failed()).is_err());
//! ```

pub mod assertion;
pub mod error;
pub mod pattern;
mod predicates;
pub mod registry;
pub mod result;
pub mod satisfy;

pub use assertion::{Arg, Arity, Assertion, TestSet, Verb};
pub use error::{ExpectError, MatchResult, Mismatch, UsageError};
pub use pattern::OutputPattern;
pub use predicates::Captured;
pub use registry::{Matcher, MatcherKey, Predicate, Registry};
pub use result::{
    Collection, IdentifyError, JsonReport, JsonResult, RawResult, RunResult, Shape, Stats,
    SummarizedResult, TestEntry,
};
pub use satisfy::{Satisfy, SatisfyMismatch};
