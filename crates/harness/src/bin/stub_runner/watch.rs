// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Modification-time polling for watch mode.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Printed after every run while watching
pub const READY_LINE: &str = "[watch] waiting for changes...";

/// Poll interval in milliseconds
pub const POLL_INTERVAL_MS: u64 = 50;

fn modified(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).and_then(|m| m.modified()).ok()
}

/// Tracks the last seen mtime of each watched file
#[derive(Debug)]
pub struct Watcher {
    files: Vec<(PathBuf, Option<SystemTime>)>,
}

impl Watcher {
    pub fn new(paths: &[PathBuf]) -> Self {
        let files = paths.iter().map(|p| (p.clone(), modified(p))).collect();
        Self { files }
    }

    /// True if any file's mtime differs from the last poll.
    pub fn changed(&mut self) -> bool {
        let mut changed = false;
        for (path, seen) in &mut self.files {
            let now = modified(path);
            if now != *seen {
                *seen = now;
                changed = true;
            }
        }
        changed
    }
}

#[cfg(unix)]
pub struct Interrupt(tokio::signal::unix::Signal);

#[cfg(unix)]
impl Interrupt {
    /// Start listening for SIGINT.
    pub fn listen() -> std::io::Result<Self> {
        use tokio::signal::unix::{signal, SignalKind};
        signal(SignalKind::interrupt()).map(Self)
    }

    pub async fn recv(&mut self) {
        self.0.recv().await;
    }
}

#[cfg(not(unix))]
pub struct Interrupt;

#[cfg(not(unix))]
impl Interrupt {
    pub fn listen() -> std::io::Result<Self> {
        Ok(Self)
    }

    pub async fn recv(&mut self) {
        let _ = tokio::signal::ctrl_c().await;
    }
}

#[cfg(test)]
#[path = "watch_tests.rs"]
mod tests;
