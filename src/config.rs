//! Configuration system for persona-version
//!
//! Supports multiple configuration sources with the following precedence (highest to lowest):
//! 1. CLI arguments
//! 2. Environment variables (PERSONA_VERSION_* prefix)
//! 3. Configuration file (TOML)
//! 4. Default values

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where persona documents live
    pub personas: PersonaSettings,

    /// Defaults for new changelog entries
    pub changelog: ChangelogSettings,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Persona store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PersonaSettings {
    /// Directory holding one `<id>.toml` file per persona
    pub dir: String,
}

/// Changelog settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogSettings {
    /// Author recorded when `--author` is not given (falls back to $USER)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_author: Option<String>,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,

    /// Log file path (empty = no file logging)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,

    /// Maximum log file size in MB before rotation
    pub max_file_size_mb: u64,

    /// Number of rotated log files to keep
    pub max_files: u32,

    /// Enable JSON formatted logging
    pub json_format: bool,
}

impl Default for PersonaSettings {
    fn default() -> Self {
        Self {
            dir: "~/.persona-version/personas".to_string(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            file: None,
            max_file_size_mb: 10,
            max_files: 5,
            json_format: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from file with environment variable overrides
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = Self::find_config_file(config_path)? {
            debug!(path = %path.display(), "Loading configuration file");
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            config = toml::from_str(&content).map_err(|e| {
                Error::config_parse(format!("{}: {}", path.display(), e.message()), Some(e))
            })?;
            info!(path = %path.display(), "Configuration loaded from file");
        }

        config.apply_env_overrides();
        config.expand_paths();
        config.validate()?;

        Ok(config)
    }

    /// Find the configuration file to use
    fn find_config_file(explicit_path: Option<&str>) -> Result<Option<PathBuf>> {
        if let Some(path) = explicit_path {
            let path = PathBuf::from(expand_path(path));
            if path.exists() {
                return Ok(Some(path));
            }
            return Err(Error::config_not_found(path));
        }

        let search_paths = [
            Some(PathBuf::from("persona-version.toml")),
            dirs::config_dir().map(|p| p.join("persona-version").join("config.toml")),
            dirs::home_dir().map(|p| p.join(".persona-version").join("config.toml")),
        ];

        for path in search_paths.into_iter().flatten() {
            if path.exists() {
                debug!(path = %path.display(), "Found configuration file");
                return Ok(Some(path));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("PERSONA_VERSION_PERSONA_DIR") {
            self.personas.dir = val;
        }
        if let Ok(val) = std::env::var("PERSONA_VERSION_AUTHOR") {
            self.changelog.default_author = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_VERSION_LOG_LEVEL") {
            self.logging.level = val;
        }
        if let Ok(val) = std::env::var("PERSONA_VERSION_LOG_FILE") {
            self.logging.file = Some(val);
        }
        if let Ok(val) = std::env::var("PERSONA_VERSION_LOG_JSON") {
            self.logging.json_format = val.to_lowercase() == "true" || val == "1";
        }
    }

    /// Expand ~ and other path variables
    fn expand_paths(&mut self) {
        self.personas.dir = expand_path(&self.personas.dir);
        if let Some(ref file) = self.logging.file {
            self.logging.file = Some(expand_path(file));
        }
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.personas.dir.trim().is_empty() {
            return Err(Error::config_field_invalid(
                "personas.dir",
                "Persona directory cannot be empty",
            ));
        }

        if let Some(ref author) = self.changelog.default_author {
            if author.trim().is_empty() {
                return Err(Error::config_field_invalid(
                    "changelog.default_author",
                    "Default author cannot be blank",
                ));
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(Error::config_field_invalid(
                "logging.level",
                format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Persona directory as a PathBuf
    pub fn persona_dir(&self) -> PathBuf {
        PathBuf::from(&self.personas.dir)
    }

    /// Author for new changelog entries: explicit setting, then $USER, then "unknown"
    pub fn author(&self) -> String {
        self.changelog
            .default_author
            .clone()
            .or_else(|| std::env::var("USER").ok())
            .or_else(|| std::env::var("USERNAME").ok())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

/// Expand ~ and environment variables in paths
fn expand_path(path: &str) -> String {
    shellexpand::full(path)
        .unwrap_or(std::borrow::Cow::Borrowed(path))
        .into_owned()
}

/// Initialize a new configuration file, returning its path
pub fn init_config(path: Option<&str>, force: bool) -> Result<PathBuf> {
    let config_path = path
        .map(|p| PathBuf::from(expand_path(p)))
        .unwrap_or_else(|| {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".persona-version")
                .join("config.toml")
        });

    if config_path.exists() && !force {
        return Err(Error::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::IoWrite {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    fs::write(&config_path, generate_default_config()).map_err(|e| Error::IoWrite {
        path: config_path.clone(),
        source: e,
    })?;

    info!(path = %config_path.display(), "Configuration file created");
    Ok(config_path)
}

/// Generate default configuration content with comments
fn generate_default_config() -> String {
    r#"# persona-version configuration

[personas]
# Directory holding one <id>.toml file per persona
dir = "~/.persona-version/personas"

[changelog]
# Author recorded in changelog entries when --author is not given
# default_author = "alice"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log file path (comment out to disable file logging)
# file = "~/.persona-version/logs/persona-version.log"

# Maximum log file size in MB before rotation
max_file_size_mb = 10

# Number of rotated log files to keep
max_files = 5

# Enable JSON formatted logging
json_format = false
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.personas.dir, "~/.persona-version/personas");
        assert_eq!(config.logging.level, "warn");
        assert!(config.changelog.default_author.is_none());
    }

    #[test]
    fn test_env_override() {
        env::set_var("PERSONA_VERSION_PERSONA_DIR", "/tmp/board");
        env::set_var("PERSONA_VERSION_AUTHOR", "env-author");
        env::set_var("PERSONA_VERSION_LOG_JSON", "1");

        let mut config = AppConfig::default();
        config.apply_env_overrides();

        assert_eq!(config.personas.dir, "/tmp/board");
        assert_eq!(config.author(), "env-author");
        assert!(config.logging.json_format);

        env::remove_var("PERSONA_VERSION_PERSONA_DIR");
        env::remove_var("PERSONA_VERSION_AUTHOR");
        env::remove_var("PERSONA_VERSION_LOG_JSON");
    }

    #[test]
    fn test_validation_invalid_log_level() {
        let mut config = AppConfig::default();
        config.logging.level = "loud".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_empty_dir() {
        let mut config = AppConfig::default();
        config.personas.dir = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_path_expansion() {
        let mut config = AppConfig::default();
        config.expand_paths();
        assert!(!config.personas.dir.contains('~'));
    }

    #[test]
    fn test_default_config_text_parses() {
        let parsed: AppConfig = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(parsed.personas.dir, "~/.persona-version/personas");
        assert_eq!(parsed.logging.max_files, 5);
    }

    #[test]
    fn test_parse_config_file() {
        let config: AppConfig = toml::from_str(
            r#"
[personas]
dir = "/srv/board/personas"

[changelog]
default_author = "alice"

[logging]
level = "debug"
"#,
        )
        .unwrap();

        assert_eq!(config.personas.dir, "/srv/board/personas");
        assert_eq!(config.author(), "alice");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.max_files, 5);
    }

    #[test]
    fn test_init_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("config.toml");
        let path_str = path.to_str().unwrap();

        let written = init_config(Some(path_str), false).unwrap();
        assert_eq!(written, path);
        assert!(init_config(Some(path_str), false).is_err());
        assert!(init_config(Some(path_str), true).is_ok());
    }

    #[test]
    fn test_load_explicit_missing() {
        let err = AppConfig::load(Some("/nonexistent/persona-version.toml")).unwrap_err();
        assert_eq!(err.code(), crate::error::ErrorCode::ConfigNotFound);
    }
}
