#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::{NamedTempFile, TempDir};

fn leaktriage_cmd() -> Command {
    Command::cargo_bin("leaktriage-cli").expect("binary should be built")
}

/// Writes `<dir>/run-out` and returns the `<dir>/run` prefix.
fn write_log(dir: &TempDir, text: &str) -> PathBuf {
    let prefix = dir.path().join("run");
    fs::write(dir.path().join("run-out"), text).expect("write log");
    prefix
}

fn summary(entries: &[&str]) -> String {
    let mut text = String::from("nsTraceRefcntImpl::DumpStatistics: summary\n");
    for e in entries {
        text.push_str(e);
        text.push('\n');
    }
    text.push_str("nsStringStats\n");
    text
}

#[test]
fn clean_log_exits_0() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(&dir, &summary(&["  1 nsRunnable 8 8"]));

    leaktriage_cmd()
        .arg(&prefix)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Verdict: CLEAN"))
        .stdout(predicate::str::contains("Leaked:").not());
}

#[test]
fn small_leak_exits_2_and_prints_report() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(&dir, &summary(&["  1 nsNovelWidget 8 8"]));

    leaktriage_cmd()
        .arg(&prefix)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("Verdict: SMALL_LEAK"))
        .stdout(predicate::str::ends_with("Leaked:\nnsNovelWidget\n"));
}

#[test]
fn entraining_leak_exits_0() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(
        &dir,
        &summary(&["  1 nsGlobalWindow 8 8", "  2 nsNovelWidget 8 8"]),
    );

    leaktriage_cmd()
        .arg(&prefix)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Verdict: SUPPRESSED_ENTRAINING"))
        .stdout(predicate::str::contains("nsGlobalWindow (bug 429085)"));
}

#[test]
fn missing_sentinel_exits_0() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(&dir, "Assertion failure: crashed early\n");

    leaktriage_cmd()
        .arg(&prefix)
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Verdict: NO_SUMMARY"));
}

#[test]
fn missing_log_fails() {
    let dir = TempDir::new().unwrap();

    leaktriage_cmd()
        .arg(dir.path().join("absent"))
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("leak log not found"));
}

#[test]
fn malformed_entry_fails() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(&dir, &summary(&["  1 nsFoo 8 8", "lonely"]));

    leaktriage_cmd()
        .arg(&prefix)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("malformed leak entry on line 3"));
}

#[test]
fn json_output_is_valid() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(&dir, &summary(&["  1 nsNovelWidget 8 8"]));

    let output = leaktriage_cmd()
        .arg(&prefix)
        .arg("--format")
        .arg("json")
        .output()
        .expect("command should run");

    let parsed: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be valid JSON");

    assert!(parsed.get("schema_version").is_some());
    assert!(parsed.get("tool").is_some());
    assert!(parsed.get("log").is_some());
    assert!(parsed.get("section").is_some());
    assert!(parsed.get("buckets").is_some());
    assert_eq!(parsed["classification"]["verdict"], "SMALL_LEAK");
    assert_eq!(parsed["classification"]["exit_code"], 2);
    assert_eq!(
        parsed["classification"]["report_text"],
        "Leaked:\nnsNovelWidget\n"
    );
}

#[test]
fn json_output_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(
        &dir,
        &summary(&["  1 nsNovelWidget 8 8", "  2 AtomImpl 8 8"]),
    );

    let run = || {
        leaktriage_cmd()
            .arg(&prefix)
            .args(["--format", "json"])
            .output()
            .expect("command should run")
            .stdout
    };

    assert_eq!(run(), run());
}

#[test]
fn commit_is_recorded_in_json() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(&dir, &summary(&[]));

    let output = leaktriage_cmd()
        .arg(&prefix)
        .args(["--format", "json", "--commit", "abc123"])
        .output()
        .expect("command should run");

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["tool"]["commit"], "abc123");
    assert_eq!(parsed["classification"]["verdict"], "CLEAN");
}

#[test]
fn out_flag_writes_file() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(&dir, &summary(&["  1 nsNovelWidget 8 8"]));
    let out = NamedTempFile::new().unwrap();

    leaktriage_cmd()
        .arg(&prefix)
        .arg("--out")
        .arg(out.path())
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty());

    let written = fs::read_to_string(out.path()).unwrap();
    assert!(written.ends_with("Leaked:\nnsNovelWidget\n"));
}

#[test]
fn verbose_logs_to_stderr_only() {
    let dir = TempDir::new().unwrap();
    let prefix = write_log(&dir, &summary(&["  1 nsRunnable 8 8"]));

    let output = leaktriage_cmd()
        .env_remove("RUST_LOG")
        .arg(&prefix)
        .args(["--format", "json", "--verbose"])
        .output()
        .expect("command should run");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("found leak summary sentinel"));
    serde_json::from_slice::<serde_json::Value>(&output.stdout)
        .expect("stdout should stay valid JSON");
}

#[test]
fn missing_argument_fails() {
    leaktriage_cmd().assert().failure();
}
