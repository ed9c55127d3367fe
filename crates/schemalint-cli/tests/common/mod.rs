#![allow(dead_code)]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Run the schemalint CLI with the given arguments.
pub fn run_cli(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_schemalint"))
        .args(args)
        .stdin(Stdio::null())
        .output()
        .expect("failed to execute schemalint CLI")
}

/// Run the schemalint CLI feeding `input` on stdin.
pub fn run_cli_with_stdin(args: &[&str], input: &[u8]) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_schemalint"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn schemalint CLI");

    let mut stdin = child.stdin.take().expect("stdin");
    let payload = input.to_vec();
    let writer = std::thread::spawn(move || {
        stdin.write_all(&payload).expect("write stdin");
    });

    let output = child.wait_with_output().expect("wait for schemalint CLI");
    writer.join().expect("stdin writer");
    output
}

/// Run the CLI and assert it succeeds, returning stdout.
pub fn run_cli_success(args: &[&str]) -> String {
    let output = run_cli(args);
    assert_success(&output);
    String::from_utf8(output.stdout).expect("utf-8 stdout")
}

pub fn assert_success(output: &Output) {
    if !output.status.success() {
        panic!(
            "CLI failed with status {:?}\nstderr: {}\nstdout: {}",
            output.status.code(),
            String::from_utf8_lossy(&output.stderr),
            String::from_utf8_lossy(&output.stdout)
        );
    }
}

/// Assert a failing run: exit status 1 and exactly one line on stderr.
pub fn assert_single_diagnostic(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.starts_with("schemalint: error: "), "stderr: {stderr}");
    stderr
}

pub fn path_str(path: &Path) -> &str {
    path.to_str().expect("utf-8 path")
}
