//! `fatal` and `panic` terminate the process.

use std::io::Write;
use std::process::Command;

mod common;

use common::strip_ansi;

fn demo() -> Command {
    Command::new(env!("CARGO_BIN_EXE_slogger-demo"))
}

#[test]
fn test_fatal_exits_with_error_attr() {
    let output = demo()
        .args(["--format", "text", "fatal", "cannot start", "disk full"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255));

    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("level=ERROR msg=\"cannot start\" error=\"disk full\""));
}

#[test]
fn test_panic_exits_with_panic_attr() {
    let output = demo()
        .args(["panic", "invariant broken", "nil map"])
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stdout = strip_ansi(&String::from_utf8(output.stdout).unwrap());
    assert!(stdout.contains("ERROR: invariant broken panic=nil map "));
    // Exiting is not unwinding: no panic message on stderr.
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(!stderr.contains("panicked"));
}

#[test]
fn test_emit_respects_level_flag() {
    let output = demo()
        .args(["--level", "error", "emit", "warn", "quiet"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
}

#[test]
fn test_emit_console_attrs() {
    let output = demo()
        .args(["emit", "info", "listening", "port=8080", "env=prod"])
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = strip_ansi(&String::from_utf8(output.stdout).unwrap());
    assert!(stdout.ends_with("INFO: listening port=8080 env=prod "));
}

#[test]
fn test_stderr_output_from_config() {
    let mut config = tempfile::NamedTempFile::new().unwrap();
    writeln!(config, "format = \"text\"").unwrap();
    writeln!(config, "output = \"stderr\"").unwrap();

    let output = demo()
        .arg("--config")
        .arg(config.path())
        .args(["emit", "error", "replica lagging"])
        .output()
        .unwrap();

    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("level=ERROR msg=\"replica lagging\""));
}
