#![allow(dead_code)]

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use walkdir::WalkDir;

/// Helper to get a Command for the tsconform binary.
/// Wraps the deprecated cargo_bin to centralize the deprecation warning.
#[allow(deprecated)]
pub fn tsconform_cmd() -> Command {
    Command::cargo_bin("tsconform").expect("tsconform binary not found - run `cargo build` first")
}

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tsconform-cli crate should have a parent directory")
        .parent()
        .expect("crates directory should have a parent (repo root)")
        .join("tests")
        .join("fixtures")
}

/// Copy a fixture into a scratch directory so emit and build info never touch the tree.
pub fn scratch_fixture(name: &str) -> TempDir {
    let src = fixtures_dir().join(name);
    let temp = TempDir::new().expect("Failed to create temp dir");
    for entry in WalkDir::new(&src) {
        let entry = entry.expect("walk fixture");
        let rel = entry.path().strip_prefix(&src).expect("inside fixture");
        let dest = temp.path().join(rel);
        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&dest).expect("create dir");
        } else {
            std::fs::copy(entry.path(), &dest).expect("copy file");
        }
    }
    temp
}

pub fn stdout_of(dir: &Path, args: &[&str]) -> (i32, String, String) {
    let output = tsconform_cmd()
        .current_dir(dir)
        .args(args)
        .output()
        .expect("Failed to run command");
    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}
