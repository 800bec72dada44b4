//! Integration tests for the circle CLI binary.
//!
//! Each test writes its own config with an offline account directory.

use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const ACCOUNTS: &str = r#"
[[accounts]]
email = "ada@circle.app"
password = "secret"

[[accounts]]
email = "grace@circle.app"
password = "hunter2"
user_id = "user:42"
"#;

fn write_config(dir: &Path, extra: &str) -> std::path::PathBuf {
    let path = dir.join("config.toml");
    std::fs::write(&path, format!("{extra}\n{ACCOUNTS}")).unwrap();
    path
}

fn circle_cmd(dir: &TempDir, extra: &str) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_circle"));
    cmd.arg("--config").arg(write_config(dir.path(), extra));
    cmd.current_dir(dir.path());
    cmd
}

fn output(cmd: &mut Command) -> (Output, String) {
    let output = cmd.output().expect("Failed to execute command");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    (output, stdout)
}

fn run(cmd: &mut Command) -> String {
    let (output, stdout) = output(cmd);
    if !output.status.success() {
        panic!(
            "Command failed with status {:?}\nstdout: {stdout}\nstderr: {}",
            output.status,
            String::from_utf8_lossy(&output.stderr)
        );
    }
    stdout
}

fn run_failing(cmd: &mut Command) -> String {
    let (output, stdout) = output(cmd);
    assert!(
        !output.status.success(),
        "Command unexpectedly succeeded\nstdout: {stdout}"
    );
    stdout
}

#[test]
fn login_with_valid_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(circle_cmd(&dir, "")
        .args(["login", "--email", "grace@circle.app"])
        .args(["--password", "hunter2", "--remember-me"]));

    assert!(out.contains("Signed in as user:42"), "Got: {out}");
    assert!(out.contains("Destination: home"), "Got: {out}");
}

#[test]
fn login_with_wrong_password() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_failing(
        circle_cmd(&dir, "")
            .args(["login", "--email", "ada@circle.app"])
            .args(["--password", "wrong"]),
    );

    assert_eq!(out.trim(), "submit: Invalid credentials");
}

#[test]
fn login_with_missing_fields_reports_each() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_failing(circle_cmd(&dir, "").arg("login"));

    assert!(out.contains("email: Email is required"), "Got: {out}");
    assert!(out.contains("password: Password is required"), "Got: {out}");
}

#[test]
fn refresh_failure_after_accepted_credentials() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_failing(
        circle_cmd(&dir, "[auth]\nfail_refresh = true\n")
            .args(["login", "--email", "ada@circle.app"])
            .args(["--password", "secret"]),
    );

    assert_eq!(out.trim(), "submit: Session service unavailable");
}

#[test]
fn validate_prints_json_errors() {
    let dir = tempfile::tempdir().unwrap();
    let out = run_failing(
        circle_cmd(&dir, "")
            .args(["validate", "--email", "not-an-email", "--json"]),
    );

    assert_eq!(
        out.trim(),
        r#"{"email":"Invalid email format","password":"Password is required"}"#
    );
}

#[test]
fn validate_accepts_good_input() {
    let dir = tempfile::tempdir().unwrap();
    let out = run(circle_cmd(&dir, "")
        .args(["validate", "--email", "a@b.com", "--password", "x"]));

    assert_eq!(out.trim(), "valid");
}
