// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Assertion failures and usage errors.

use crate::result::Shape;
use std::fmt;
use thiserror::Error;

/// The subject did not meet the assertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mismatch {
    /// Rendered subject, filled in by the registry.
    pub subject: String,
    /// Rendered assertion phrase, filled in by the registry.
    pub assertion: String,
    pub explanation: String,
}

impl Mismatch {
    pub fn new(explanation: impl Into<String>) -> Self {
        Self {
            subject: String::new(),
            assertion: String::new(),
            explanation: explanation.into(),
        }
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.assertion.is_empty() {
            return f.write_str(&self.explanation);
        }
        write!(f, "expected {} {}", self.subject, self.assertion)?;
        if !self.explanation.is_empty() {
            write!(f, "\n  {}", self.explanation.replace('\n', "\n  "))?;
        }
        Ok(())
    }
}

/// The assertion itself was malformed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum UsageError {
    #[error("unknown assertion: {0:?}")]
    UnknownPhrase(String),

    #[error("'{assertion}' is not defined for {shape} with {count} argument(s)")]
    Unsupported {
        assertion: String,
        shape: Shape,
        count: usize,
    },

    #[error("argument {index}: expected {expected}, got {got}")]
    InvalidArgument {
        index: usize,
        expected: &'static str,
        got: String,
    },

    #[error("missing argument {index}: expected {expected}")]
    MissingArgument {
        index: usize,
        expected: &'static str,
    },

    #[error("invalid pattern '{pattern}': {error}")]
    InvalidPattern { pattern: String, error: String },
}

/// Outcome of evaluating one assertion.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExpectError {
    #[error("{0}")]
    Mismatch(Mismatch),

    #[error("usage error: {0}")]
    Usage(#[from] UsageError),
}

impl ExpectError {
    pub fn mismatch(explanation: impl Into<String>) -> Self {
        ExpectError::Mismatch(Mismatch::new(explanation))
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, ExpectError::Mismatch(_))
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, ExpectError::Usage(_))
    }
}

/// Result type returned by predicates.
pub type MatchResult = Result<(), ExpectError>;
