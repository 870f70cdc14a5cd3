// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command-line interface of `runcheck`.

use crate::runner::{ExecMode, ReportFormat, RunOptions};
use clap::{Args, Parser, Subcommand};
use runcheck_expect::{Arg, Assertion, UsageError};
use std::path::PathBuf;

/// Run a test runner and check its result against one assertion
#[derive(Parser, Debug)]
#[command(name = "runcheck", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Launch the runner and check what it produced
    Run(RunArgs),
    /// Check a saved result file
    Check(CheckArgs),
}

/// The assertion to evaluate
#[derive(Args, Debug)]
pub struct ExpectArgs {
    /// Assertion phrase, e.g. "not to have failed"
    #[arg(long, value_name = "PHRASE")]
    pub expect: String,

    /// Assertion argument; `/re/` is a regex, integers are numbers, `{`/`[` start JSON
    #[arg(long = "arg", value_name = "VALUE", allow_hyphen_values = true)]
    pub args: Vec<String>,
}

impl ExpectArgs {
    /// Parse the phrase and its arguments
    pub fn assertion(&self) -> Result<Assertion, UsageError> {
        let args = self
            .args
            .iter()
            .map(|raw| raw.parse::<Arg>())
            .collect::<Result<Vec<_>, _>>()?;
        Assertion::parse(&self.expect, args)
    }
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Runner configuration file (TOML)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Result shape to produce
    #[arg(long, value_enum, default_value = "raw")]
    pub format: ReportFormat,

    /// Run the runner in parallel mode
    #[arg(long)]
    pub parallel: bool,

    /// Working directory of the runner
    #[arg(long, value_name = "DIR")]
    pub cwd: Option<PathBuf>,

    #[command(flatten)]
    pub expect: ExpectArgs,

    /// Arguments passed to the runner
    #[arg(last = true, value_name = "RUNNER_ARGS")]
    pub runner_args: Vec<String>,
}

impl RunArgs {
    pub fn options(&self) -> RunOptions {
        let mode = if self.parallel {
            ExecMode::Parallel
        } else {
            ExecMode::Serial
        };
        let options = RunOptions::new().with_format(self.format).with_mode(mode);
        match &self.cwd {
            Some(dir) => options.with_cwd(dir),
            None => options,
        }
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Saved result (JSON)
    #[arg(long, value_name = "FILE")]
    pub result: PathBuf,

    #[command(flatten)]
    pub expect: ExpectArgs,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
