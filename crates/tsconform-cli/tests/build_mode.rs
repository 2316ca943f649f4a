//! `tsconform -b` against multi-project fixtures.

mod common;

use common::{scratch_fixture, stdout_of, tsconform_cmd};
use predicates::prelude::*;

#[test]
fn referenced_project_is_checked() {
    let dir = scratch_fixture("solution");
    let (code, stdout, _) = stdout_of(dir.path(), &["-b", "app"]);

    assert_eq!(code, 1);
    assert!(
        stdout.starts_with("core/src/render.ts(1,16): error TS21222: "),
        "{stdout}"
    );
    assert!(stdout.ends_with("Found 1 error.\n"));
    assert!(dir.path().join("core/out/src/render.js").exists());
    assert!(dir.path().join("app/out/tsconfig.tsbuildinfo").exists());
}

#[test]
fn second_build_still_runs_conformance() {
    let dir = scratch_fixture("solution");
    let first = stdout_of(dir.path(), &["--build", "app"]);
    let second = stdout_of(dir.path(), &["--build", "app"]);
    assert_eq!(first.0, 1);
    assert_eq!(first.1, second.1);
    assert_eq!(second.0, 1);
}

#[test]
fn project_defaults_to_current_directory() {
    let dir = scratch_fixture("solution");
    tsconform_cmd()
        .current_dir(dir.path().join("core"))
        .arg("build")
        .assert()
        .code(1)
        .stdout(predicate::str::starts_with(
            "src/render.ts(1,16): error TS21222: ",
        ));
}

#[test]
fn more_than_one_project_is_rejected_before_building() {
    let dir = scratch_fixture("solution");
    tsconform_cmd()
        .current_dir(dir.path())
        .args(["-b", "app", "core"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains(
            "tsconform: build mode supports exactly one project",
        ))
        .stdout("");
    assert!(!dir.path().join("core/out").exists());
    assert!(!dir.path().join("app/out").exists());
}

#[test]
fn failed_build_prints_compiler_errors_and_the_notice() {
    let dir = scratch_fixture("solution_broken");
    let (code, stdout, _) = stdout_of(dir.path(), &["-b", "app"]);

    assert_eq!(code, 1);
    assert_eq!(
        stdout,
        "core/src/render.ts(1,14): error TS2322: Type 'boolean' is not assignable to type 'string'.\n\
         \n\
         Found 1 error.\n\
         Build failed; conformance checks were not run.\n"
    );
}

#[test]
fn build_report_records_mode_and_notice() {
    let dir = scratch_fixture("solution_broken");
    let (code, _, _) = stdout_of(dir.path(), &["-b", "app", "--report-out", "report.json"]);
    assert_eq!(code, 1);

    let text = std::fs::read_to_string(dir.path().join("report.json")).expect("read report");
    let report: serde_json::Value = serde_json::from_str(&text).expect("parse report");
    assert_eq!(report["mode"], "build");
    assert_eq!(
        report["notice"],
        "Build failed; conformance checks were not run."
    );
    assert_eq!(report["data"]["compiler"], 1);
}
