//! Error types for persona-version
//!
//! Provides structured error handling with:
//! - Numeric error codes for machine parsing
//! - User-friendly messages with suggestions
//! - Exit codes for CLI
//!
//! The versioning functions themselves never fail; errors come from the
//! persona store, configuration and CLI layers.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for persona-version operations
pub type Result<T> = std::result::Result<T, Error>;

/// Numeric error codes for machine parsing and documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum ErrorCode {
    // Configuration errors (1xx)
    ConfigNotFound = 100,
    ConfigParseError = 101,
    ConfigValidation = 102,

    // IO errors (2xx)
    IoRead = 200,
    IoWrite = 201,
    IoPermission = 202,
    IoNotFound = 203,

    // Persona errors (3xx)
    PersonaNotFound = 300,
    PersonaExists = 301,
    PersonaInvalid = 302,
    PersonaParse = 303,
    PersonaIdInvalid = 304,

    // Version / changelog errors (4xx)
    ChangelogInvalid = 400,
    VersionInvalid = 401,

    // Internal errors (9xx)
    InternalError = 900,
}

impl ErrorCode {
    /// Get the string code (e.g., "E100")
    pub fn as_str(&self) -> String {
        format!("E{}", *self as u16)
    }

    /// Get the exit code for CLI (maps to 1-125 range)
    pub fn exit_code(&self) -> i32 {
        match *self as u16 {
            100..=199 => 10, // Config errors
            200..=299 => 20, // IO errors
            300..=399 => 30, // Persona errors
            400..=499 => 40, // Version errors
            900..=999 => 90, // Internal errors
            _ => 1,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Main error type
#[derive(Error, Debug)]
pub enum Error {
    // ─────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────

    /// Configuration file not found
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Configuration parse error
    #[error("Failed to parse configuration: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<toml::de::Error>,
    },

    /// Configuration validation error
    #[error("Configuration validation failed: {message}")]
    ConfigValidation { message: String, field: Option<String> },

    /// Generic configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    // ─────────────────────────────────────────────────────────────
    // IO Errors
    // ─────────────────────────────────────────────────────────────

    /// File read error
    #[error("Failed to read file: {path}")]
    IoRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File write error
    #[error("Failed to write file: {path}")]
    IoWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// JSON serialization error
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    // ─────────────────────────────────────────────────────────────
    // Persona Errors
    // ─────────────────────────────────────────────────────────────

    /// No stored persona with this id
    #[error("Persona not found: {id}")]
    PersonaNotFound { id: String },

    /// Persona already stored
    #[error("Persona already exists: {id}")]
    PersonaExists { id: String },

    /// Persona document is well-formed TOML but semantically wrong
    #[error("Persona {id} is invalid: {reason}")]
    PersonaInvalid { id: String, reason: String },

    /// Persona document failed to parse
    #[error("Failed to parse persona {path}: {message}")]
    PersonaParse { path: PathBuf, message: String },

    /// Persona id cannot be used as a file name
    #[error("Invalid persona id '{id}': use lowercase letters, digits, '-' and '_'")]
    InvalidPersonaId { id: String },

    // ─────────────────────────────────────────────────────────────
    // Version / Changelog Errors
    // ─────────────────────────────────────────────────────────────

    /// Changelog is not a coherent history
    #[error("Changelog for {id} is invalid: {message}")]
    ChangelogInvalid { id: String, message: String },

    /// Version string is not `major.minor.patch`
    #[error("Invalid version '{value}': expected major.minor.patch")]
    VersionInvalid { value: String },

    // ─────────────────────────────────────────────────────────────
    // Internal Errors
    // ─────────────────────────────────────────────────────────────

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    // ─────────────────────────────────────────────────────────────
    // Error Classification
    // ─────────────────────────────────────────────────────────────

    /// Get the numeric error code
    pub fn code(&self) -> ErrorCode {
        match self {
            Error::ConfigNotFound { .. } => ErrorCode::ConfigNotFound,
            Error::ConfigParse { .. } => ErrorCode::ConfigParseError,
            Error::ConfigValidation { .. } => ErrorCode::ConfigValidation,
            Error::Config(_) => ErrorCode::ConfigValidation,

            Error::IoRead { .. } => ErrorCode::IoRead,
            Error::IoWrite { .. } => ErrorCode::IoWrite,
            Error::Io(e) => match e.kind() {
                std::io::ErrorKind::NotFound => ErrorCode::IoNotFound,
                std::io::ErrorKind::PermissionDenied => ErrorCode::IoPermission,
                _ => ErrorCode::IoRead,
            },
            Error::Toml(_) => ErrorCode::InternalError,
            Error::Json(_) => ErrorCode::InternalError,

            Error::PersonaNotFound { .. } => ErrorCode::PersonaNotFound,
            Error::PersonaExists { .. } => ErrorCode::PersonaExists,
            Error::PersonaInvalid { .. } => ErrorCode::PersonaInvalid,
            Error::PersonaParse { .. } => ErrorCode::PersonaParse,
            Error::InvalidPersonaId { .. } => ErrorCode::PersonaIdInvalid,

            Error::ChangelogInvalid { .. } => ErrorCode::ChangelogInvalid,
            Error::VersionInvalid { .. } => ErrorCode::VersionInvalid,

            Error::Internal(_) => ErrorCode::InternalError,
        }
    }

    /// Get the exit code for CLI
    pub fn exit_code(&self) -> i32 {
        self.code().exit_code()
    }

    // ─────────────────────────────────────────────────────────────
    // User-Friendly Messages
    // ─────────────────────────────────────────────────────────────

    /// Get a user-friendly suggestion for how to fix this error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::ConfigNotFound { .. } => Some(
                "Run 'persona-version config init' to create a default configuration file."
            ),
            Error::ConfigParse { .. } => Some(
                "Check your configuration file syntax. Run 'persona-version config validate' to see details."
            ),
            Error::ConfigValidation { .. } | Error::Config(_) => Some(
                "Review the configuration file and fix the invalid values."
            ),

            Error::PersonaNotFound { .. } => Some(
                "Run 'persona-version persona list' to see stored personas, or 'persona new' to create one."
            ),
            Error::PersonaExists { .. } => Some(
                "Use --force to overwrite it, or 'persona revise' to publish a new version."
            ),
            Error::PersonaParse { .. } => Some(
                "The persona file is not valid TOML or is missing id, name or version."
            ),
            Error::InvalidPersonaId { .. } => Some(
                "Persona ids are used as file names, e.g. 'the-skeptic' or 'cfo_advisor'."
            ),

            Error::ChangelogInvalid { .. } => Some(
                "Changelog entries must have strictly increasing versions ending at the document version."
            ),
            Error::VersionInvalid { .. } => Some(
                "Use a plain version such as 1.0.0. Pre-release and build suffixes are not supported."
            ),

            _ => None,
        }
    }

    /// Format the error for terminal display with colors
    pub fn format_for_terminal(&self) -> String {
        let code = self.code();

        let mut output = format!(
            "\x1b[31mError [{}]\x1b[0m: {}\n",
            code.as_str(),
            self
        );

        if let Some(hint) = self.suggestion() {
            output.push_str(&format!("\n\x1b[33mHint\x1b[0m: {}\n", hint));
        }

        output
    }

    /// Format the error for logging (no colors)
    pub fn format_for_log(&self) -> String {
        format!("[{}] {}", self.code().as_str(), self)
    }
}

// ─────────────────────────────────────────────────────────────────
// Error Constructors
// ─────────────────────────────────────────────────────────────────

impl Error {
    /// Create a config not found error
    pub fn config_not_found(path: impl Into<PathBuf>) -> Self {
        Error::ConfigNotFound { path: path.into() }
    }

    /// Create a config parse error
    pub fn config_parse(message: impl Into<String>, source: Option<toml::de::Error>) -> Self {
        Error::ConfigParse {
            message: message.into(),
            source,
        }
    }

    /// Create a config validation error with field name
    pub fn config_field_invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ConfigValidation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a changelog error
    pub fn changelog_invalid(id: impl Into<String>, message: impl Into<String>) -> Self {
        Error::ChangelogInvalid {
            id: id.into(),
            message: message.into(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_format() {
        assert_eq!(ErrorCode::ConfigNotFound.as_str(), "E100");
        assert_eq!(ErrorCode::PersonaNotFound.as_str(), "E300");
        assert_eq!(ErrorCode::VersionInvalid.as_str(), "E401");
    }

    #[test]
    fn test_error_exit_codes() {
        assert_eq!(ErrorCode::ConfigNotFound.exit_code(), 10);
        assert_eq!(ErrorCode::IoWrite.exit_code(), 20);
        assert_eq!(ErrorCode::PersonaExists.exit_code(), 30);
        assert_eq!(ErrorCode::ChangelogInvalid.exit_code(), 40);
        assert_eq!(ErrorCode::InternalError.exit_code(), 90);
    }

    #[test]
    fn test_error_codes() {
        let err = Error::config_not_found("/test");
        assert_eq!(err.code(), ErrorCode::ConfigNotFound);

        let err = Error::PersonaNotFound { id: "skeptic".into() };
        assert_eq!(err.code(), ErrorCode::PersonaNotFound);
        assert_eq!(err.exit_code(), 30);

        let err = Error::changelog_invalid("skeptic", "out of order");
        assert_eq!(err.code(), ErrorCode::ChangelogInvalid);
    }

    #[test]
    fn test_error_suggestions() {
        let err = Error::config_not_found("/test");
        assert!(err.suggestion().unwrap().contains("config init"));

        let err = Error::PersonaExists { id: "skeptic".into() };
        assert!(err.suggestion().unwrap().contains("--force"));

        assert!(Error::Internal("boom".into()).suggestion().is_none());
    }

    #[test]
    fn test_format_for_terminal() {
        let err = Error::VersionInvalid { value: "1.2".into() };
        let formatted = err.format_for_terminal();

        assert!(formatted.contains("E401"));
        assert!(formatted.contains("\x1b[31m"));
        assert!(formatted.contains("Hint"));
    }

    #[test]
    fn test_format_for_log() {
        let err = Error::PersonaNotFound { id: "ghost".into() };
        let formatted = err.format_for_log();

        assert_eq!(formatted, "[E300] Persona not found: ghost");
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_toml_serialization_is_internal() {
        let ser_err = <toml::ser::Error as serde::ser::Error>::custom("unsupported value");
        let err: Error = ser_err.into();

        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.exit_code(), 90);
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();

        assert_eq!(err.code(), ErrorCode::IoNotFound);
    }
}
