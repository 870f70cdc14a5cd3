// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Launch a test runner as a subprocess and capture its result.
//!
//! [`Runner::run`] and [`Runner::run_args`] wait for the process to exit.
//! [`Runner::run_watch`] drives a watching runner through one change:
//! wait for the ready line, call the trigger, wait for the next ready line,
//! then interrupt the process and collect what it printed on the way out.

use crate::config::RunnerConfig;
use crate::error::HarnessError;
use crate::fixture::Fixtures;
use regex::Regex;
use runcheck_expect::{JsonReport, JsonResult, RawResult, RunResult, SummarizedResult};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tracing::debug;

/// Which result shape a run produces
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    /// Output and exit code as captured
    #[default]
    Raw,
    /// Parsed JSON reporter output
    Json,
    /// Counts parsed from the human-readable summary
    Summarized,
}

/// Serial or parallel execution of the runner's test files
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecMode {
    #[default]
    Serial,
    Parallel,
}

/// Per-run options
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    pub format: ReportFormat,
    pub mode: ExecMode,
    /// Working directory of the runner (default: inherited)
    pub cwd: Option<PathBuf>,
}

impl RunOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_mode(mut self, mode: ExecMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn parallel(self) -> Self {
        self.with_mode(ExecMode::Parallel)
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Stream {
    Stdout,
    Stderr,
}

#[derive(Debug)]
struct Line {
    stream: Stream,
    text: String,
}

/// Output gathered from a run, merged in arrival order.
#[derive(Debug, Default)]
struct Capture {
    output: String,
    stdout: String,
}

impl Capture {
    fn push(&mut self, line: Line) {
        self.output.push_str(&line.text);
        self.output.push('\n');
        if line.stream == Stream::Stdout {
            self.stdout.push_str(&line.text);
            self.stdout.push('\n');
        }
    }
}

/// Subprocess runner for one configured program
#[derive(Debug)]
pub struct Runner {
    config: RunnerConfig,
    fixtures: Fixtures,
    ready: Regex,
}

impl Runner {
    /// Create a runner from a validated config
    pub fn new(config: RunnerConfig) -> Result<Self, HarnessError> {
        config.validate()?;
        let ready = config.ready_regex()?;
        let fixtures = Fixtures::from_config(&config);
        Ok(Self {
            config,
            fixtures,
            ready,
        })
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Full argument list for a run
    pub fn command_args(&self, args: &[String], options: &RunOptions, watch: bool) -> Vec<String> {
        let mut argv = self.config.base_args.clone();
        if options.mode == ExecMode::Parallel {
            argv.push(self.config.parallel_flag.clone());
        }
        if options.format == ReportFormat::Json {
            argv.extend(self.config.json_args.iter().cloned());
        }
        if watch {
            argv.push(self.config.watch_flag.clone());
        }
        argv.extend(args.iter().cloned());
        argv
    }

    /// Run a fixture to completion. The fixture path goes after `args`.
    pub async fn run(
        &self,
        fixture: &str,
        args: &[String],
        options: &RunOptions,
    ) -> Result<RunResult, HarnessError> {
        let mut all = args.to_vec();
        all.push(self.fixtures.resolve(fixture).display().to_string());
        self.run_args(&all, options).await
    }

    /// Run with exactly the given arguments
    pub async fn run_args(
        &self,
        args: &[String],
        options: &RunOptions,
    ) -> Result<RunResult, HarnessError> {
        let argv = self.command_args(args, options, false);
        let mut child = self.spawn(&argv, options.cwd.as_deref())?;
        let mut lines = pipe_lines(&mut child);

        let mut capture = Capture::default();
        while let Some(line) = lines.recv().await {
            capture.push(line);
        }
        let status = child.wait().await?;
        debug!(code = ?status.code(), "runner exited");

        self.finish(capture, status.code(), argv, options.format)
    }

    /// Run in watch mode, calling `trigger` once the first run is done.
    ///
    /// Resolves after the run caused by the trigger has finished and the
    /// process has been interrupted and exited.
    pub async fn run_watch<F>(
        &self,
        args: &[String],
        cwd: &Path,
        trigger: F,
        options: &RunOptions,
    ) -> Result<RunResult, HarnessError>
    where
        F: FnOnce() -> std::io::Result<()>,
    {
        let argv = self.command_args(args, options, true);
        let mut child = self.spawn(&argv, Some(cwd))?;
        let mut lines = pipe_lines(&mut child);
        let mut capture = Capture::default();

        self.await_ready(&mut lines, &mut capture).await?;
        debug!("runner ready, invoking trigger");
        trigger().map_err(HarnessError::Trigger)?;

        self.await_ready(&mut lines, &mut capture).await?;
        debug!("rerun finished, interrupting runner");
        interrupt(&mut child)?;

        let limit = self.ready_timeout();
        let drained = tokio::time::timeout(limit, async {
            while let Some(line) = lines.recv().await {
                capture.push(line);
            }
            child.wait().await
        })
        .await;
        let status = match drained {
            Ok(status) => status?,
            Err(_) => {
                return Err(HarnessError::ShutdownTimeout {
                    timeout_ms: self.config.ready_timeout_ms,
                })
            }
        };
        debug!(code = ?status.code(), "runner exited");

        self.finish(capture, status.code(), argv, options.format)
    }

    fn ready_timeout(&self) -> Duration {
        Duration::from_millis(self.config.ready_timeout_ms)
    }

    fn spawn(&self, argv: &[String], cwd: Option<&Path>) -> Result<Child, HarnessError> {
        let mut command = Command::new(&self.config.program);
        command
            .args(argv)
            .envs(&self.config.env)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = cwd {
            command.current_dir(dir);
        }
        debug!(program = %self.config.program, args = ?argv, "spawning runner");
        command.spawn().map_err(|source| HarnessError::Spawn {
            program: self.config.program.clone(),
            source,
        })
    }

    /// Consume lines until one matches the ready pattern.
    async fn await_ready(
        &self,
        lines: &mut mpsc::UnboundedReceiver<Line>,
        capture: &mut Capture,
    ) -> Result<(), HarnessError> {
        let ready = &self.ready;
        let wait = async {
            while let Some(line) = lines.recv().await {
                let matched = ready.is_match(&line.text);
                capture.push(line);
                if matched {
                    return true;
                }
            }
            false
        };
        let outcome = tokio::time::timeout(self.ready_timeout(), wait).await;
        match outcome {
            Ok(true) => Ok(()),
            Ok(false) => Err(HarnessError::ExitedBeforeReady {
                output: capture.output.clone(),
            }),
            Err(_) => Err(HarnessError::ReadyTimeout {
                timeout_ms: self.config.ready_timeout_ms,
            }),
        }
    }

    fn finish(
        &self,
        capture: Capture,
        code: Option<i32>,
        argv: Vec<String>,
        format: ReportFormat,
    ) -> Result<RunResult, HarnessError> {
        let result = match format {
            ReportFormat::Raw => RunResult::Raw(RawResult {
                output: capture.output,
                code,
                args: argv,
            }),
            ReportFormat::Summarized => RunResult::Summarized(SummarizedResult::from_output(
                capture.output,
                code.unwrap_or(-1),
            )),
            ReportFormat::Json => {
                let report = extract_report(&capture.stdout)?;
                let command = std::iter::once(self.config.program.as_str())
                    .chain(argv.iter().map(String::as_str))
                    .collect::<Vec<_>>()
                    .join(" ");
                RunResult::Json(JsonResult::from_report(report, code.unwrap_or(-1), command))
            }
        };
        Ok(result)
    }
}

/// Parse the JSON report from stdout.
///
/// The report starts at the first line opening a JSON object; lines before
/// and after it are ignored.
pub fn extract_report(stdout: &str) -> Result<JsonReport, HarnessError> {
    let mut offset = 0;
    let mut found = false;
    for line in stdout.split_inclusive('\n') {
        if line.trim_start().starts_with('{') {
            found = true;
            break;
        }
        offset += line.len();
    }
    if !found {
        return Err(HarnessError::MissingReport);
    }
    serde_json::Deserializer::from_str(&stdout[offset..])
        .into_iter::<JsonReport>()
        .next()
        .ok_or(HarnessError::MissingReport)?
        .map_err(HarnessError::Report)
}

/// Forward stdout and stderr lines into one channel.
fn pipe_lines(child: &mut Child) -> mpsc::UnboundedReceiver<Line> {
    let (tx, rx) = mpsc::unbounded_channel();
    if let Some(stdout) = child.stdout.take() {
        forward(stdout, Stream::Stdout, tx.clone());
    }
    if let Some(stderr) = child.stderr.take() {
        forward(stderr, Stream::Stderr, tx);
    }
    rx
}

fn forward<R>(reader: R, stream: Stream, tx: mpsc::UnboundedSender<Line>)
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(read_lines(reader, stream, tx));
}

/// Send each line until EOF. Invalid UTF-8 is replaced, never dropped.
async fn read_lines<R>(reader: R, stream: Stream, tx: mpsc::UnboundedSender<Line>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                debug!(?stream, error = %e, "output stream closed");
                break;
            }
        }
        if buf.last() == Some(&b'\n') {
            buf.pop();
            if buf.last() == Some(&b'\r') {
                buf.pop();
            }
        }
        let text = String::from_utf8_lossy(&buf).into_owned();
        if tx.send(Line { stream, text }).is_err() {
            break;
        }
    }
}

#[cfg(unix)]
fn interrupt(child: &mut Child) -> Result<(), HarnessError> {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    // Already reaped; nothing to signal.
    let Some(pid) = child.id() else {
        return Ok(());
    };
    let pid = i32::try_from(pid).map_err(|e| HarnessError::Signal(e.to_string()))?;
    kill(Pid::from_raw(pid), Signal::SIGINT).map_err(|e| HarnessError::Signal(e.to_string()))
}

#[cfg(not(unix))]
fn interrupt(child: &mut Child) -> Result<(), HarnessError> {
    child.start_kill().map_err(HarnessError::Io)
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
