// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Deterministic test-runner double.
//!
//! Reads TOML test files, runs global fixtures from `--require`d plugins
//! once per process, and reports like a typical JavaScript test runner.
//! Used by the lifecycle tests in place of a real runner.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

mod plugin;
mod report;
mod suite;
mod watch;

use plugin::GlobalFixtures;
use report::Reporter;
use suite::FileRun;
use watch::{Interrupt, Watcher, POLL_INTERVAL_MS, READY_LINE};

#[derive(Parser, Debug)]
#[command(name = "stub-runner", about = "Deterministic test runner driven by TOML test files")]
struct Args {
    /// Plugin with global setup/teardown fixtures (repeatable)
    #[arg(long = "require", value_name = "PLUGIN")]
    require: Vec<PathBuf>,

    /// Run each file on its own task
    #[arg(long)]
    parallel: bool,

    /// Re-run when a test file changes, until interrupted
    #[arg(long)]
    watch: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "spec")]
    reporter: Reporter,

    /// Test files
    #[arg(required = true, value_name = "FILES")]
    files: Vec<PathBuf>,
}

async fn run_files(files: &[PathBuf], parallel: bool) -> Result<Vec<FileRun>> {
    if !parallel {
        return Ok(files
            .iter()
            .map(|f| suite::run_file(f))
            .collect::<Result<_, _>>()?);
    }
    let handles: Vec<_> = files
        .iter()
        .cloned()
        .map(|f| tokio::spawn(async move { suite::run_file(&f) }))
        .collect();
    let mut runs = Vec::with_capacity(handles.len());
    for handle in handles {
        runs.push(handle.await??);
    }
    Ok(runs)
}

/// Run every file, print the report, and return the failure count.
async fn run_and_report(args: &Args) -> Result<usize> {
    let runs = run_files(&args.files, args.parallel).await?;
    println!("{}", args.reporter.render(&runs)?);
    Ok(runs.iter().map(FileRun::failures).sum())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn exit_code(failures: usize) -> i32 {
    i32::try_from(failures.min(255)).unwrap_or(255)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Listen before the first ready line so an early interrupt is not lost.
    let interrupt = if args.watch {
        Some(Interrupt::listen()?)
    } else {
        None
    };
    let mut watcher = Watcher::new(&args.files);

    let mut fixtures = GlobalFixtures::load(&args.require)?;
    print_lines(fixtures.setup()?);

    let mut failures = run_and_report(&args).await?;

    if let Some(mut interrupt) = interrupt {
        println!("{}", READY_LINE);
        let mut ticker = tokio::time::interval(Duration::from_millis(POLL_INTERVAL_MS));
        loop {
            tokio::select! {
                _ = interrupt.recv() => break,
                _ = ticker.tick() => {
                    if watcher.changed() {
                        match run_and_report(&args).await {
                            Ok(count) => failures = count,
                            Err(e) => eprintln!("stub-runner: {:#}", e),
                        }
                        println!("{}", READY_LINE);
                    }
                }
            }
        }
    }

    print_lines(fixtures.teardown()?);
    std::process::exit(exit_code(failures));
}
