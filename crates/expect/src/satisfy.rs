// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Structural "satisfy" matching over JSON values.
//!
//! An expectation only constrains what it names: objects may carry extra
//! keys, while arrays must match element for element.

use regex::Regex;
use serde_json::Value;
use std::fmt;

/// An expectation tree checked against a JSON value.
#[derive(Clone, Debug)]
pub enum Satisfy {
    /// Scalar equality; numbers compare numerically.
    Equal(Value),
    /// Regex search over a string value.
    Matches(Regex),
    /// Every listed key must exist and satisfy its expectation.
    Object(Vec<(String, Satisfy)>),
    /// Same length, element-wise.
    Array(Vec<Satisfy>),
}

/// Where and why a value failed to satisfy an expectation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SatisfyMismatch {
    pub path: String,
    pub reason: String,
}

impl fmt::Display for SatisfyMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.path.is_empty() {
            f.write_str(&self.reason)
        } else {
            write!(f, "at {}: {}", self.path, self.reason)
        }
    }
}

impl Satisfy {
    /// Expectation on a single key.
    pub fn key(key: impl Into<String>, expected: impl Into<Satisfy>) -> Self {
        Satisfy::Object(vec![(key.into(), expected.into())])
    }

    /// `{title: <title>}`.
    pub fn title(title: impl Into<String>) -> Self {
        Satisfy::key("title", Value::String(title.into()))
    }

    pub fn check(&self, actual: &Value) -> Result<(), SatisfyMismatch> {
        self.check_at(actual, String::new())
    }

    pub fn is_satisfied_by(&self, actual: &Value) -> bool {
        self.check(actual).is_ok()
    }

    fn check_at(&self, actual: &Value, path: String) -> Result<(), SatisfyMismatch> {
        match self {
            Satisfy::Equal(expected) => {
                if values_equal(expected, actual) {
                    Ok(())
                } else {
                    Err(SatisfyMismatch {
                        path,
                        reason: format!("expected {}, got {}", expected, actual),
                    })
                }
            }
            Satisfy::Matches(re) => match actual.as_str() {
                Some(s) if re.is_match(s) => Ok(()),
                Some(_) => Err(SatisfyMismatch {
                    path,
                    reason: format!("expected to match /{}/, got {}", re.as_str(), actual),
                }),
                None => Err(SatisfyMismatch {
                    path,
                    reason: format!("expected a string matching /{}/, got {}", re.as_str(), actual),
                }),
            },
            Satisfy::Object(fields) => {
                let Some(obj) = actual.as_object() else {
                    return Err(SatisfyMismatch {
                        path,
                        reason: format!("expected an object, got {}", actual),
                    });
                };
                for (key, expected) in fields {
                    let child = format!("{}.{}", path, key);
                    match obj.get(key) {
                        Some(value) => expected.check_at(value, child)?,
                        None => {
                            return Err(SatisfyMismatch {
                                path: child,
                                reason: "missing".to_string(),
                            })
                        }
                    }
                }
                Ok(())
            }
            Satisfy::Array(items) => {
                let Some(arr) = actual.as_array() else {
                    return Err(SatisfyMismatch {
                        path,
                        reason: format!("expected an array, got {}", actual),
                    });
                };
                if arr.len() != items.len() {
                    return Err(SatisfyMismatch {
                        path,
                        reason: format!("expected {} items, got {}", items.len(), arr.len()),
                    });
                }
                for (i, (expected, value)) in items.iter().zip(arr).enumerate() {
                    expected.check_at(value, format!("{}[{}]", path, i))?;
                }
                Ok(())
            }
        }
    }
}

fn values_equal(expected: &Value, actual: &Value) -> bool {
    match (expected, actual) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        _ => expected == actual,
    }
}

impl From<Value> for Satisfy {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => {
                Satisfy::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
            Value::Array(items) => Satisfy::Array(items.into_iter().map(Satisfy::from).collect()),
            other => Satisfy::Equal(other),
        }
    }
}

impl From<&str> for Satisfy {
    fn from(s: &str) -> Self {
        Satisfy::Equal(Value::String(s.to_string()))
    }
}

impl From<String> for Satisfy {
    fn from(s: String) -> Self {
        Satisfy::Equal(Value::String(s))
    }
}

impl From<Regex> for Satisfy {
    fn from(re: Regex) -> Self {
        Satisfy::Matches(re)
    }
}

impl fmt::Display for Satisfy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Satisfy::Equal(v) => write!(f, "{}", v),
            Satisfy::Matches(re) => write!(f, "/{}/", re.as_str()),
            Satisfy::Object(fields) => {
                f.write_str("{")?;
                for (i, (key, expected)) in fields.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {}", key, expected)?;
                }
                f.write_str("}")
            }
            Satisfy::Array(items) => {
                f.write_str("[")?;
                for (i, expected) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", expected)?;
                }
                f.write_str("]")
            }
        }
    }
}

#[cfg(test)]
#[path = "satisfy_tests.rs"]
mod tests;
