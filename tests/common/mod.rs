//! Common test utilities and fixtures
//!
//! This module provides shared test infrastructure

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Get the path to the test fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Get a path to a specific fixture file
pub fn fixture_path(name: &str) -> PathBuf {
    fixtures_dir().join(name)
}

/// Scratch HOME with an empty persona directory.
///
/// Commands built from it never see the developer's real configuration.
pub struct Sandbox {
    pub root: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp directory"),
        }
    }

    pub fn persona_dir(&self) -> PathBuf {
        self.root.path().join("personas")
    }

    /// Copy a fixture into the persona directory as `<id>.toml`
    pub fn install_fixture(&self, fixture: &str, id: &str) -> PathBuf {
        std::fs::create_dir_all(self.persona_dir()).unwrap();
        let dest = self.persona_dir().join(format!("{}.toml", id));
        std::fs::copy(fixture_path(fixture), &dest).unwrap();
        dest
    }

    /// A `persona-version` command isolated to this sandbox
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("persona-version").unwrap();
        isolate(&mut cmd, self.root.path());
        cmd.env("PERSONA_VERSION_PERSONA_DIR", self.persona_dir())
            .env("PERSONA_VERSION_AUTHOR", "test-author");
        cmd
    }
}

/// Point HOME and XDG config lookups at `home` and drop inherited overrides
pub fn isolate(cmd: &mut Command, home: &Path) {
    cmd.env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env_remove("PERSONA_VERSION_CONFIG")
        .env_remove("PERSONA_VERSION_PERSONA_DIR")
        .env_remove("PERSONA_VERSION_AUTHOR")
        .env_remove("PERSONA_VERSION_LOG_LEVEL")
        .env_remove("PERSONA_VERSION_LOG_FILE")
        .env_remove("PERSONA_VERSION_LOG_JSON")
        .env_remove("RUST_LOG");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_dir_exists() {
        assert!(fixtures_dir().exists(), "Fixtures directory should exist");
    }

    #[test]
    fn test_persona_fixtures_exist() {
        for name in ["skeptic.toml", "skeptic_rubric.toml", "skeptic_reasoning.toml"] {
            assert!(fixture_path(name).exists(), "Missing fixture {}", name);
        }
    }
}
