#![allow(dead_code)]
use assert_cmd::Command;
use std::io::Write;
use std::process::Output;
use tempfile::NamedTempFile;

pub const SUCCESS: i32 = 0;
pub const STATIC_ERROR: i32 = 65;
pub const RUNTIME_ERROR: i32 = 70;

/// Writes the source to a temp file and runs the interpreter on it.
pub fn run(source: &str) -> Output {
    let mut temp_file = NamedTempFile::new().expect("Failed to create temp file");
    write!(temp_file, "{source}").expect("Failed to write to temp file");

    let mut cmd = Command::cargo_bin("treelox").expect("Binary not found");
    cmd.arg(temp_file.path());
    // Keep stderr deterministic even when the host shell sets RUST_LOG.
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to run binary")
}

/// Runs a program expected to succeed: exact stdout, clean stderr.
pub fn run_program(source: &str, expected_stdout: &str, expected_code: i32) {
    let output = run(source);

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code().unwrap_or(-1);

    assert_eq!(stdout, expected_stdout);
    assert_eq!(stderr, "");
    assert_eq!(exit_code, expected_code);
}

/// Runs a program expected to fail: exact stdout (everything printed before
/// the failure), a fragment the diagnostic must contain, and the exit code.
pub fn run_error(source: &str, expected_stdout: &str, stderr_fragment: &str, expected_code: i32) {
    let output = run(source);

    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let exit_code = output.status.code().unwrap_or(-1);

    assert_eq!(stdout, expected_stdout);
    assert!(
        stderr.contains(stderr_fragment),
        "stderr {stderr:?} does not contain {stderr_fragment:?}"
    );
    assert_eq!(exit_code, expected_code);
}
