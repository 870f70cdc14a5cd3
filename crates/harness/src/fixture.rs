// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Named fixture files on disk.

use crate::config::RunnerConfig;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Fixture run when a test does not name one
pub const DEFAULT_FIXTURE: &str = "__default__";

/// Resolves fixture names to paths under a fixtures directory
#[derive(Clone, Debug)]
pub struct Fixtures {
    dir: PathBuf,
    extension: String,
}

impl Fixtures {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn from_config(config: &RunnerConfig) -> Self {
        Self::new(&config.fixtures_dir, &config.fixture_extension)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of a fixture. Names without an extension get the fixture suffix;
    /// absolute names are returned unchanged.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else if path.extension().is_some() {
            self.dir.join(name)
        } else {
            self.dir.join(format!("{}{}", name, self.extension))
        }
    }

    /// Copy a fixture to `dest`, creating parent directories.
    pub fn copy(&self, name: &str, dest: &Path) -> io::Result<u64> {
        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::copy(self.resolve(name), dest)
    }
}

/// Set a file's modification time to now.
pub fn touch_file(path: &Path) -> io::Result<()> {
    File::options()
        .write(true)
        .open(path)?
        .set_modified(SystemTime::now())
}

#[cfg(test)]
#[path = "fixture_tests.rs"]
mod tests;
