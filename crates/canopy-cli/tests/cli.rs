//! End-to-end tests: the demo suite binary directly, and the `canopy`
//! driver launching it. NO_COLOR is pinned so the expected output is
//! byte-exact.

use assert_cmd::Command;
use predicates::prelude::*;
use pretty_assertions::assert_eq;

fn demo() -> Command {
    let mut command = Command::cargo_bin("canopy-demo").unwrap();
    command.env("NO_COLOR", "1");
    command
}

fn canopy() -> Command {
    let mut command = Command::cargo_bin("canopy").unwrap();
    command.env("NO_COLOR", "1");
    command
}

#[test]
fn demo_suite_passes_and_reports_every_event() {
    demo().assert().success().stderr(
        "arithmetic -> adds ...\n\
         arithmetic -> adds PASSED\n\
         arithmetic -> multiplies ...\n\
         arithmetic -> multiplies PASSED\n\
         arithmetic -> division -> divides evenly ...\n\
         arithmetic -> division -> divides evenly PASSED\n\
         arithmetic -> division -> handles division by zero IGNORED\n\
         fixtures -> sees the fixture ...\n\
         fixtures -> sees the fixture PASSED\n\
         Ran 4 tests, 4 passed, 0 failed, 1 ignored.\n",
    );
}

#[test]
fn demo_failure_mode_exits_nonzero_with_the_diagnostic() {
    demo().arg("failing").assert().failure().stderr(
        "arithmetic -> adds ...\n\
         arithmetic -> adds PASSED\n\
         arithmetic -> is wrong about addition ...\n\
         4\n    !==\n5\n\
         arithmetic -> is wrong about addition FAILED\n\
         Ran 2 tests, 1 passed, 1 failed.\n",
    );
}

#[test]
fn demo_fatal_mode_reports_the_hook_fault_without_a_summary() {
    demo()
        .arg("fatal")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "before_all hook failed at broken fixtures: could not reach the database",
        ))
        .stderr(predicate::str::contains("Ran ").not());
}

#[test]
fn run_propagates_success() {
    canopy()
        .arg("run")
        .arg(assert_cmd::cargo::cargo_bin("canopy-demo"))
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "Ran 4 tests, 4 passed, 0 failed, 1 ignored.",
        ));
}

#[test]
fn run_streams_several_binaries_in_order() {
    let demo_bin = assert_cmd::cargo::cargo_bin("canopy-demo");
    let output = canopy()
        .arg("run")
        .arg(&demo_bin)
        .arg(&demo_bin)
        .assert()
        .success()
        .get_output()
        .clone();
    let stderr = String::from_utf8(output.stderr).unwrap();
    let summaries = stderr
        .matches("Ran 4 tests, 4 passed, 0 failed, 1 ignored.")
        .count();
    assert_eq!(summaries, 2);
}

#[test]
fn run_propagates_test_failures() {
    canopy()
        .arg("run")
        .arg(assert_cmd::cargo::cargo_bin("canopy-demo"))
        .env("CANOPY_DEMO_MODE", "failing")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Ran 2 tests, 1 passed, 1 failed."));
}

#[test]
fn run_reports_unlaunchable_binaries_as_errors() {
    canopy()
        .arg("run")
        .arg("/nonexistent/test-binary")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to launch test binary"));
}

#[test]
fn run_requires_at_least_one_binary() {
    canopy().arg("run").assert().failure();
}
