//! CLI integration tests
//!
//! Tests the command-line interface using assert_cmd

mod common;

use predicates::prelude::*;

use common::Sandbox;

// ─────────────────────────────────────────────────────────────────
// Help and Version Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    Sandbox::new()
        .cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona"))
        .stdout(predicate::str::contains("bump"))
        .stdout(predicate::str::contains("classify"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_version_command() {
    Sandbox::new()
        .cmd()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains("persona-version"))
        .stdout(predicate::str::contains("Build Information"))
        .stdout(predicate::str::contains("Git Hash"));
}

// ─────────────────────────────────────────────────────────────────
// Versioning Commands
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_parse_valid() {
    Sandbox::new()
        .cmd()
        .args(["parse", "01.2.3"])
        .assert()
        .success()
        .stdout("1.2.3\n");
}

#[test]
fn test_parse_invalid_exits_one() {
    Sandbox::new()
        .cmd()
        .args(["parse", "1.2.3-beta"])
        .assert()
        .code(1)
        .stdout("invalid\n");
}

#[test]
fn test_parse_json() {
    Sandbox::new()
        .cmd()
        .args(["parse", "4.5.6", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"major\":4"))
        .stdout(predicate::str::contains("\"patch\":6"));
}

#[test]
fn test_format() {
    Sandbox::new()
        .cmd()
        .args(["format", "3", "0", "12"])
        .assert()
        .success()
        .stdout("3.0.12\n");
}

#[test]
fn test_bump_each_kind() {
    for (kind, expected) in [("major", "2.0.0\n"), ("minor", "1.3.0\n"), ("patch", "1.2.4\n")] {
        Sandbox::new()
            .cmd()
            .args(["bump", "1.2.3", kind])
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn test_bump_invalid_version_starts_history() {
    Sandbox::new()
        .cmd()
        .args(["bump", "not-a-version", "patch"])
        .assert()
        .success()
        .stdout("1.0.0\n");
}

#[test]
fn test_rust_log_enables_crate_debug() {
    Sandbox::new()
        .cmd()
        .env("RUST_LOG", "persona_version=debug")
        .args(["bump", "not-a-version", "patch"])
        .assert()
        .success()
        .stdout("1.0.0\n")
        .stderr(predicate::str::contains("Unparsable version"));
}

#[test]
fn test_quiet_overrides_rust_log() {
    Sandbox::new()
        .cmd()
        .env("RUST_LOG", "persona_version=debug")
        .args(["-q", "bump", "not-a-version", "patch"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unparsable version").not());
}

#[test]
fn test_bump_unknown_kind() {
    Sandbox::new()
        .cmd()
        .args(["bump", "1.2.3", "huge"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown bump kind"));
}

#[test]
fn test_classify() {
    let cases: [(&[&str], &str); 5] = [
        (&["purpose"], "major\n"),
        (&["reasoning", "purpose"], "major\n"),
        (&["reasoning"], "minor\n"),
        (&["unknown_section"], "patch\n"),
        (&[], "patch\n"),
    ];
    for (sections, expected) in cases {
        Sandbox::new()
            .cmd()
            .arg("classify")
            .args(sections)
            .assert()
            .success()
            .stdout(expected);
    }
}

#[test]
fn test_classify_warns_on_unknown_section() {
    Sandbox::new()
        .cmd()
        .args(["classify", "tone"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Unrecognized section"));
}

#[test]
fn test_classify_json() {
    Sandbox::new()
        .cmd()
        .args(["classify", "--json", "rubric", "tone"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"kind\": \"major\""))
        .stdout(predicate::str::contains("\"tone\""));
}

#[test]
fn test_next() {
    Sandbox::new()
        .cmd()
        .args(["next", "1.4.2", "-s", "interaction", "-s", "typo"])
        .assert()
        .success()
        .stdout("1.5.0\n");
}

#[test]
fn test_next_forced_bump() {
    Sandbox::new()
        .cmd()
        .args(["next", "1.4.2", "--bump", "major", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"next\": \"2.0.0\""))
        .stdout(predicate::str::contains("\"inferred\": false"));
}

// ─────────────────────────────────────────────────────────────────
// Config Command Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_config_show_default() {
    Sandbox::new()
        .cmd()
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[personas]"))
        .stdout(predicate::str::contains("[logging]"));
}

#[test]
fn test_config_validate_nonexistent_file() {
    Sandbox::new()
        .cmd()
        .args(["config", "validate", "--config", "/nonexistent/path/config.toml"])
        .assert()
        .code(10)
        .stderr(predicate::str::contains("E100"));
}

// ─────────────────────────────────────────────────────────────────
// Error Handling Tests
// ─────────────────────────────────────────────────────────────────

#[test]
fn test_unknown_command() {
    Sandbox::new()
        .cmd()
        .arg("unknown-command")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}

#[test]
fn test_missing_subcommand() {
    Sandbox::new().cmd().assert().failure();
}
