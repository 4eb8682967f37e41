//! Smoke tests for the presta binary. Nothing here needs tesseract or a
//! real PDF; extraction behavior is covered by the library tests.

use assert_cmd::Command;
use predicates::prelude::*;

fn presta() -> Command {
    Command::cargo_bin("presta").unwrap()
}

#[test]
fn help_lists_subcommands() {
    presta()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("process"))
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("rename"))
        .stdout(predicate::str::contains("report"));
}

#[test]
fn config_show_prints_defaults() {
    presta()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"reconcile\": \"single-pass\""))
        .stdout(predicate::str::contains("\"command\": \"tesseract\""));
}

#[test]
fn config_init_writes_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presta.json");

    presta()
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    // A second init without --force must refuse to overwrite.
    presta()
        .args(["config", "init", "-o"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn report_fails_on_empty_directory() {
    let dir = tempfile::tempdir().unwrap();
    presta()
        .arg("report")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no documents found"));
}

#[test]
fn process_fails_on_missing_input() {
    presta()
        .args(["process", "/definitely/not/there.pdf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
