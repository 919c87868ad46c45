use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

#[allow(deprecated)]
fn verlock_cmd() -> Command {
    Command::cargo_bin("verlock").unwrap()
}

const MANIFEST: &str = r#"
dependencies = ["commons-io:commons-io:2.4", "com.example:foo:2.0"]

[[override]]
group = "commons-io"
version = "2.1"

[[override]]
group = "commons-io"
version = "2.6"
scope = "test"
"#;

fn project() -> TempDir {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("Verlock.toml"), MANIFEST).unwrap();
    tmp
}

#[test]
fn test_resolve_default_context() {
    let tmp = project();

    verlock_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "--context", "default"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commons-io:commons-io 2.1"))
        .stdout(predicate::str::contains("com.example:foo 2.0"))
        .stdout(predicate::str::contains("[test]").not());
}

#[test]
fn test_resolve_test_context() {
    let tmp = project();

    verlock_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "-c", "test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("commons-io:commons-io 2.6"));
}

#[test]
fn test_resolve_json() {
    let tmp = project();

    verlock_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"version\": \"2.6\""))
        .stdout(predicate::str::contains("\"context\": \"default\""));
}

#[test]
fn test_resolve_does_not_write_lock() {
    let tmp = project();
    verlock_cmd().current_dir(tmp.path()).arg("resolve").assert().success();
    assert!(!tmp.path().join("Verlock.lock").exists());
}

#[test]
fn test_resolve_unknown_context_is_usage_error() {
    let tmp = project();

    verlock_cmd()
        .current_dir(tmp.path())
        .args(["resolve", "--context", "runtime"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown context"));
}

#[test]
fn test_explain_marks_deciding_rule() {
    let tmp = project();

    verlock_cmd()
        .current_dir(tmp.path())
        .args(["explain", "commons-io:commons-io", "--context", "test"])
        .assert()
        .success()
        .stdout(predicate::str::contains("rule *   commons-io:* -> 2.6 (scope: test)"))
        .stdout(predicate::str::contains("resolved:  2.6"));
}
