//! Tests for help, version and completions.

use crate::support::*;
use predicates::prelude::*;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("secrets"))
        .stdout(predicate::str::contains("collaborators"))
        .stdout(predicate::str::contains("check"));
}

#[test]
fn test_unknown_command_fails() {
    let t = Test::new();

    t.cmd().arg("unknown-command").assert().failure();
}

#[test]
fn test_version_flag() {
    let t = Test::new();

    t.cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("ghcrew"));
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    let output = t.cmd().args(["completions", "bash"]).output().unwrap();
    assert_success(&output);
    let out = stdout(&output);
    assert!(out.contains("_ghcrew") || out.contains("complete"));
}

#[test]
fn test_completions_need_no_configuration() {
    let t = Test::new();

    t.cmd().args(["completions", "zsh"]).assert().success();
}

#[test]
fn test_accept_attempts_must_be_positive() {
    let t = Test::new();

    t.cmd()
        .args(["collaborators", "--accept-attempts", "0"])
        .assert()
        .failure();
}
