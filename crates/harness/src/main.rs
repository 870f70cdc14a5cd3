// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use anyhow::{Context, Result};
use clap::Parser;
use runcheck_expect::{ExpectError, Mismatch, Registry, RunResult};
use runcheck_harness::cli::{CheckArgs, Cli, Command, RunArgs};
use runcheck_harness::{env, Runner, RunnerConfig};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env(env::RUNCHECK_LOG).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();

    let cli = Cli::parse();
    let registry = Registry::new();

    match execute(cli, &registry).await {
        Ok(None) => ExitCode::SUCCESS,
        Ok(Some(mismatch)) => {
            eprintln!("{}", mismatch);
            ExitCode::from(1)
        }
        Err(e) => {
            eprintln!("runcheck: {:#}", e);
            ExitCode::from(2)
        }
    }
}

async fn execute(cli: Cli, registry: &Registry) -> Result<Option<Mismatch>> {
    let (result, assertion) = match cli.command {
        Command::Run(args) => {
            let assertion = args.expect.assertion()?;
            (run(&args).await?, assertion)
        }
        Command::Check(args) => {
            let assertion = args.expect.assertion()?;
            (load(&args)?, assertion)
        }
    };

    match registry.check(&result, &assertion) {
        Ok(()) => Ok(None),
        Err(ExpectError::Mismatch(m)) => Ok(Some(m)),
        Err(ExpectError::Usage(u)) => Err(u.into()),
    }
}

async fn run(args: &RunArgs) -> Result<RunResult> {
    let config = match &args.config {
        Some(path) => RunnerConfig::load(path)?,
        None => RunnerConfig::default(),
    }
    .apply_env();
    let runner = Runner::new(config)?;
    Ok(runner.run_args(&args.runner_args, &args.options()).await?)
}

fn load(args: &CheckArgs) -> Result<RunResult> {
    let content = std::fs::read_to_string(&args.result)
        .with_context(|| format!("failed to read {}", args.result.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse {}", args.result.display()))?;
    Ok(RunResult::identify(value)?)
}
