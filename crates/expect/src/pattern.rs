// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text-or-regex patterns searched for in captured output.

use crate::error::UsageError;
use regex::Regex;
use std::fmt;

/// A literal string or a regular expression.
#[derive(Clone, Debug)]
pub enum OutputPattern {
    Text(String),
    Regex(Regex),
}

impl OutputPattern {
    /// Compile a regex pattern.
    pub fn regex(pattern: &str) -> Result<Self, UsageError> {
        Regex::new(pattern)
            .map(OutputPattern::Regex)
            .map_err(|e| UsageError::InvalidPattern {
                pattern: pattern.to_string(),
                error: e.to_string(),
            })
    }

    /// Unanchored search.
    pub fn is_found_in(&self, haystack: &str) -> bool {
        match self {
            OutputPattern::Text(text) => haystack.contains(text.as_str()),
            OutputPattern::Regex(re) => re.is_match(haystack),
        }
    }

    /// Number of non-overlapping matches. Literal text is escaped first.
    pub fn count_in(&self, haystack: &str) -> Result<usize, UsageError> {
        let re = match self {
            OutputPattern::Text(text) => {
                let escaped = regex::escape(text);
                Regex::new(&escaped).map_err(|e| UsageError::InvalidPattern {
                    pattern: escaped,
                    error: e.to_string(),
                })?
            }
            OutputPattern::Regex(re) => re.clone(),
        };
        Ok(re.find_iter(haystack).count())
    }
}

impl From<&str> for OutputPattern {
    fn from(s: &str) -> Self {
        OutputPattern::Text(s.to_string())
    }
}

impl From<String> for OutputPattern {
    fn from(s: String) -> Self {
        OutputPattern::Text(s)
    }
}

impl From<Regex> for OutputPattern {
    fn from(re: Regex) -> Self {
        OutputPattern::Regex(re)
    }
}

impl fmt::Display for OutputPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputPattern::Text(text) => write!(f, "{:?}", text),
            OutputPattern::Regex(re) => write!(f, "/{}/", re.as_str()),
        }
    }
}

#[cfg(test)]
#[path = "pattern_tests.rs"]
mod tests;
