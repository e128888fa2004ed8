//! Configuration errors abort before any network call.

use crate::support::*;

#[test]
fn test_missing_admin_token_aborts() {
    let t = Test::with_env_file("TARGET_REPO=octo/shared\n");

    let output = t.cmd().arg("secrets").output().unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "admin token not found");
    assert_stdout_excludes(&output, "checking admin token");
}

#[test]
fn test_missing_repository_aborts() {
    let t = Test::with_env_file("PAT1=ghp_admin\n");

    let output = t.cmd().arg("setup").output().unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "target repository not set");
}

#[test]
fn test_malformed_repository_aborts() {
    let t = Test::with_env_file("PAT1=ghp_admin\nTARGET_REPO=not-a-repo\n");

    let output = t.cmd().arg("collaborators").output().unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "invalid repository 'not-a-repo'");
    assert_stdout_excludes(&output, "checking admin token");
}

#[test]
fn test_repo_flag_fixes_malformed_env() {
    let t = Test::with_env_file("PAT1=ghp_admin\nTARGET_REPO=not-a-repo\n");

    // Configuration passes; the run then stops at the unreachable preflight
    let output = t
        .cmd()
        .args(["check", "--repo", "octo/shared"])
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "admin token is invalid");
}

#[test]
fn test_explicit_env_file_missing() {
    let t = Test::new();

    let output = t
        .cmd()
        .args(["--env-file", "does-not-exist.env", "check"])
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "failed to read env file");
}

#[test]
fn test_process_environment_is_read() {
    let t = Test::new();

    let output = t
        .cmd()
        .env("PAT1", "ghp_admin")
        .env("TARGET_REPO", "octo/shared")
        .arg("check")
        .output()
        .unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "admin token is invalid");
}
