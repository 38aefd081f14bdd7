//! Tests for error handling and CLI flags.

use predicates::prelude::*;

use crate::support::*;

#[test]
fn test_help() {
    let t = Test::new();

    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("encrypt").and(predicate::str::contains("decrypt")));
}

#[test]
fn test_no_command_fails() {
    let t = Test::new();

    t.cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
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
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_config_fails_with_hint() {
    let t = Test::new();

    t.cmd()
        .arg("encrypt")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(".cici.yml").and(predicate::str::contains("→")));
}

#[test]
fn test_invalid_config_fails() {
    let t = Test::new();
    t.write(".cici.yml", "default:\n  secrets:\n    - ../escape.txt\n");

    t.cmd()
        .arg("encrypt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("default.secrets"));
}

#[test]
fn test_escaping_set_path_fails() {
    let t = Test::new();
    t.write(".cici.yml", "sets:\n  prod:\n    path: ../../outside\n");

    t.cmd()
        .arg("encrypt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sets.prod.path"));
}

#[test]
fn test_debug_flag_logs_to_stderr() {
    let t = Test::with_files(BASIC_CONFIG, &[]);

    t.cmd()
        .args(["--debug", "encrypt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loading config"));
}

#[test]
fn test_default_no_log_output() {
    let t = Test::with_files(BASIC_CONFIG, &[]);

    t.cmd()
        .arg("encrypt")
        .assert()
        .failure()
        .stderr(
            predicate::str::contains("DEBUG")
                .or(predicate::str::contains("TRACE"))
                .not(),
        );
}

#[test]
fn test_completions_bash_outputs_script() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("_cici").or(predicate::str::contains("complete")));
}

#[test]
fn test_completions_zsh() {
    let t = Test::new();

    t.cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}
