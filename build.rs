//! Build script for persona-version
//!
//! Embeds git revision, build timestamp, target and compiler details so
//! `persona-version version` can report exactly which build produced a
//! changelog entry.

use std::env;
use std::process::Command;

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let git_hash = command_output("git", &["rev-parse", "--short=8", "HEAD"]);
    let git_branch = command_output("git", &["rev-parse", "--abbrev-ref", "HEAD"]);
    let git_dirty = match Command::new("git").args(["status", "--porcelain"]).output() {
        Ok(out) if out.status.success() => (!out.stdout.is_empty()).to_string(),
        _ => "unknown".to_string(),
    };

    let build_timestamp = chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string();

    let vars = [
        ("PERSONA_VERSION_GIT_HASH", git_hash),
        ("PERSONA_VERSION_GIT_BRANCH", git_branch),
        ("PERSONA_VERSION_GIT_DIRTY", git_dirty),
        ("PERSONA_VERSION_BUILD_TIMESTAMP", build_timestamp),
        ("PERSONA_VERSION_TARGET", env_or_unknown("TARGET")),
        ("PERSONA_VERSION_PROFILE", env_or_unknown("PROFILE")),
        ("PERSONA_VERSION_RUSTC_VERSION", command_output("rustc", &["--version"])),
        ("PERSONA_VERSION_HOST", env_or_unknown("HOST")),
    ];

    for (key, value) in &vars {
        println!("cargo:rustc-env={}={}", key, value);
    }
}

/// Run a command and return its trimmed stdout, or "unknown" on any failure
fn command_output(program: &str, args: &[&str]) -> String {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn env_or_unknown(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| "unknown".to_string())
}
