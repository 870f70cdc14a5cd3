// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Global setup and teardown fixtures loaded with `--require`.
//!
//! ```toml
//! [[global_setup]]
//! set = { foo = "bar" }
//! log = "setup: this.foo = {foo}"
//!
//! [[global_teardown]]
//! log = "teardown: this.foo = {foo}"
//! ```

use crate::suite::{read_toml, LoadError};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;
use toml::Value;

static PLACEHOLDER: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)\}").ok());

/// One global fixture step. Applied in order: `set`, `increment`, `log`.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Step {
    #[serde(default)]
    pub set: BTreeMap<String, Value>,

    #[serde(default)]
    pub increment: Vec<String>,

    /// Line printed after the step, with `{key}` replaced from the context
    #[serde(default)]
    pub log: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plugin {
    #[serde(default)]
    pub global_setup: Vec<Step>,

    #[serde(default)]
    pub global_teardown: Vec<Step>,
}

impl Plugin {
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        read_toml(path)
    }
}

/// Values shared by every global fixture of one process
#[derive(Clone, Debug, Default)]
pub struct Context {
    values: BTreeMap<String, Value>,
}

impl Context {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Apply a step, returning the line it logs.
    pub fn apply(&mut self, step: &Step) -> Result<Option<String>, LoadError> {
        for (key, value) in &step.set {
            self.values.insert(key.clone(), value.clone());
        }
        for key in &step.increment {
            let next = match self.values.get(key) {
                None => Value::Integer(1),
                Some(Value::Integer(n)) => Value::Integer(n + 1),
                Some(Value::Float(f)) => Value::Float(f + 1.0),
                Some(_) => return Err(LoadError::NotANumber { key: key.clone() }),
            };
            self.values.insert(key.clone(), next);
        }
        Ok(step.log.as_deref().map(|template| self.render(template)))
    }

    /// Substitute `{key}` placeholders; unknown keys render as `undefined`.
    pub fn render(&self, template: &str) -> String {
        let Some(re) = PLACEHOLDER.as_ref() else {
            return template.to_string();
        };
        re.replace_all(template, |caps: &Captures<'_>| match self.get(&caps[1]) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => "undefined".to_string(),
        })
        .into_owned()
    }
}

/// Every required plugin plus the context they share
#[derive(Debug, Default)]
pub struct GlobalFixtures {
    plugins: Vec<Plugin>,
    context: Context,
}

impl GlobalFixtures {
    pub fn load(paths: &[impl AsRef<Path>]) -> Result<Self, LoadError> {
        let plugins = paths
            .iter()
            .map(|p| Plugin::load(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(plugins))
    }

    pub fn new(plugins: Vec<Plugin>) -> Self {
        Self {
            plugins,
            context: Context::default(),
        }
    }

    /// Run every setup step, plugin by plugin. Returns the logged lines.
    pub fn setup(&mut self) -> Result<Vec<String>, LoadError> {
        let steps: Vec<Step> = self
            .plugins
            .iter()
            .flat_map(|p| p.global_setup.iter().cloned())
            .collect();
        self.apply_all(&steps)
    }

    pub fn teardown(&mut self) -> Result<Vec<String>, LoadError> {
        let steps: Vec<Step> = self
            .plugins
            .iter()
            .flat_map(|p| p.global_teardown.iter().cloned())
            .collect();
        self.apply_all(&steps)
    }

    fn apply_all(&mut self, steps: &[Step]) -> Result<Vec<String>, LoadError> {
        let mut lines = Vec::new();
        for step in steps {
            lines.extend(self.context.apply(step)?);
        }
        Ok(lines)
    }
}

#[cfg(test)]
#[path = "plugin_tests.rs"]
mod tests;
