//! A failed preflight aborts the whole run.

use crate::support::*;

const ENV: &str = "TARGET_REPO=octo/shared\nPAT1=ghp_admin\nPAT2=ghp_alice\nUSERNAME2=alice\n";

#[test]
fn test_unreachable_host_fails_preflight() {
    let t = Test::with_env_file(ENV);

    let output = t.cmd().arg("check").output().unwrap();
    assert_exit_code(&output, 1);
    assert_stderr_contains(&output, "admin token is invalid or expired");
    assert_stderr_contains(&output, "setup aborted");
}

#[test]
fn test_secrets_not_attempted_after_failed_preflight() {
    let t = Test::with_env_file(ENV);

    let output = t.cmd().arg("secrets").output().unwrap();
    assert_exit_code(&output, 1);
    assert_stdout_excludes(&output, "adding PAT1");
}

#[test]
fn test_invites_not_attempted_after_failed_preflight() {
    let t = Test::with_env_file(ENV);

    let output = t.cmd().arg("setup").output().unwrap();
    assert_exit_code(&output, 1);
    assert_stdout_excludes(&output, "invitation sent");
    assert_stdout_excludes(&output, "failed to invite");
}

#[test]
fn test_tokens_never_printed() {
    let t = Test::with_env_file(ENV);

    let output = t.cmd().args(["--verbose", "setup"]).output().unwrap();
    assert!(!stdout(&output).contains("ghp_admin"));
    assert!(!stderr(&output).contains("ghp_admin"));
}
