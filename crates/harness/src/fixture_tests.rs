// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use rstest::rstest;
use std::time::Duration;
use tempfile::TempDir;

#[rstest]
#[case("__default__", "/fx/__default__.fixture.toml")]
#[case("plugins/setup/setup", "/fx/plugins/setup/setup.fixture.toml")]
#[case("plugins/setup/setup.fixture.toml", "/fx/plugins/setup/setup.fixture.toml")]
#[case("/abs/test.toml", "/abs/test.toml")]
#[case("/abs/plugin", "/abs/plugin")]
fn resolve_appends_extension_when_missing(#[case] name: &str, #[case] expected: &str) {
    let fixtures = Fixtures::new("/fx", ".fixture.toml");
    assert_eq!(fixtures.resolve(name), PathBuf::from(expected));
}

#[test]
fn from_config_uses_configured_dir() {
    let config = RunnerConfig::default().with_fixtures_dir("/data");
    let fixtures = Fixtures::from_config(&config);
    assert_eq!(fixtures.dir(), Path::new("/data"));
    assert_eq!(
        fixtures.resolve(DEFAULT_FIXTURE),
        PathBuf::from("/data/__default__.fixture.toml")
    );
}

#[test]
fn copy_creates_parent_directories() {
    let src = TempDir::new().unwrap();
    std::fs::write(src.path().join("a.fixture.toml"), "suite = \"a\"\n").unwrap();
    let fixtures = Fixtures::new(src.path(), ".fixture.toml");

    let dest = TempDir::new().unwrap();
    let target = dest.path().join("nested/dir/test.toml");
    fixtures.copy("a", &target).unwrap();

    assert_eq!(std::fs::read_to_string(target).unwrap(), "suite = \"a\"\n");
}

#[test]
fn copy_missing_fixture_fails() {
    let fixtures = Fixtures::new("/nonexistent", ".fixture.toml");
    let dest = TempDir::new().unwrap();
    assert!(fixtures.copy("missing", &dest.path().join("x")).is_err());
}

#[test]
fn touch_updates_mtime() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("test.toml");
    std::fs::write(&path, "").unwrap();
    let past = SystemTime::now() - Duration::from_secs(3600);
    File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(past)
        .unwrap();

    touch_file(&path).unwrap();

    let modified = std::fs::metadata(&path).unwrap().modified().unwrap();
    assert!(modified > past + Duration::from_secs(60));
}

#[test]
fn touch_missing_file_fails() {
    assert!(touch_file(Path::new("/nonexistent/file")).is_err());
}
