//! CLI argument parsing using clap v4
//!
//! Defines the command-line interface for persona-version.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::versioning::BumpKind;

/// persona-version - semantic versioning for advisor persona documents
///
/// Classifies persona edits into major/minor/patch bumps, computes the next
/// version and keeps each persona's changelog.
#[derive(Parser, Debug)]
#[command(name = "persona-version")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase logging verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(short, long, env = "PERSONA_VERSION_CONFIG", global = true)]
    pub config: Option<String>,

    /// Override the persona directory
    #[arg(long, global = true)]
    pub persona_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a major.minor.patch version (prints "invalid" and exits 1 otherwise)
    Parse {
        /// Version text
        text: String,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Format a version triple
    Format {
        major: u64,
        minor: u64,
        patch: u64,
    },

    /// Bump a version (unparsable input yields 1.0.0)
    Bump {
        /// Current version
        current: String,

        /// Bump kind: major, minor, patch
        kind: BumpKind,
    },

    /// Classify a set of changed sections into a bump kind
    Classify {
        /// Changed section names (e.g. rubric reasoning)
        sections: Vec<String>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Compute the next version for a set of changed sections
    Next {
        /// Current version
        current: String,

        /// Changed section (repeatable)
        #[arg(short, long = "section")]
        sections: Vec<String>,

        /// Force a bump kind instead of inferring it
        #[arg(short, long)]
        bump: Option<BumpKind>,

        /// Print JSON
        #[arg(long)]
        json: bool,
    },

    /// Persona document management
    Persona {
        #[command(subcommand)]
        subcommand: PersonaSubcommand,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        subcommand: ConfigSubcommand,
    },

    /// Display version and build information
    Version,
}

/// Persona subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum PersonaSubcommand {
    /// Create a new persona at version 1.0.0
    New {
        /// Persona id (file name), e.g. the-skeptic
        id: String,

        /// Display name (defaults to the id)
        #[arg(short, long)]
        name: Option<String>,

        /// Changelog author
        #[arg(short, long)]
        author: Option<String>,

        /// Overwrite an existing persona
        #[arg(short, long)]
        force: bool,
    },

    /// List stored personas
    List {
        #[arg(long)]
        json: bool,
    },

    /// Show a stored persona
    Show {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Show which sections differ between two persona files
    Diff {
        old: PathBuf,
        new: PathBuf,

        #[arg(long)]
        json: bool,
    },

    /// Publish an edited persona file as the next version
    Revise {
        /// Persona id
        id: String,

        /// Edited persona document
        #[arg(long)]
        from: PathBuf,

        /// Changelog author
        #[arg(short, long)]
        author: Option<String>,

        /// Change description (repeatable)
        #[arg(long = "change")]
        changes: Vec<String>,

        /// Force a bump kind instead of inferring it
        #[arg(short, long)]
        bump: Option<BumpKind>,

        /// Show the planned revision without saving
        #[arg(long)]
        dry_run: bool,

        #[arg(long)]
        json: bool,
    },

    /// Print a persona's changelog
    History {
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Check a persona's changelog is consistent
    Validate { id: String },
}

/// Configuration subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum ConfigSubcommand {
    /// Display the current configuration
    Show,

    /// Initialize a new configuration file
    Init {
        /// Path where to create the config file
        #[arg(short, long)]
        path: Option<String>,

        /// Overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },

    /// Validate the configuration
    Validate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bump_command() {
        let cli = Cli::parse_from(["persona-version", "bump", "1.2.3", "minor"]);
        match cli.command {
            Commands::Bump { current, kind } => {
                assert_eq!(current, "1.2.3");
                assert_eq!(kind, BumpKind::Minor);
            }
            _ => panic!("Expected Bump command"),
        }
    }

    #[test]
    fn test_bump_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["persona-version", "bump", "1.2.3", "huge"]).is_err());
    }

    #[test]
    fn test_classify_empty() {
        let cli = Cli::parse_from(["persona-version", "classify"]);
        match cli.command {
            Commands::Classify { sections, json } => {
                assert!(sections.is_empty());
                assert!(!json);
            }
            _ => panic!("Expected Classify command"),
        }
    }

    #[test]
    fn test_next_with_sections() {
        let cli = Cli::parse_from([
            "persona-version",
            "next",
            "1.0.0",
            "-s",
            "rubric",
            "--section",
            "reasoning",
        ]);
        match cli.command {
            Commands::Next { current, sections, bump, .. } => {
                assert_eq!(current, "1.0.0");
                assert_eq!(sections, vec!["rubric", "reasoning"]);
                assert!(bump.is_none());
            }
            _ => panic!("Expected Next command"),
        }
    }

    #[test]
    fn test_persona_revise() {
        let cli = Cli::parse_from([
            "persona-version",
            "persona",
            "revise",
            "skeptic",
            "--from",
            "edited.toml",
            "--change",
            "Reweighted rubric",
            "--bump",
            "major",
            "--dry-run",
        ]);
        match cli.command {
            Commands::Persona {
                subcommand: PersonaSubcommand::Revise { id, from, changes, bump, dry_run, .. },
            } => {
                assert_eq!(id, "skeptic");
                assert_eq!(from, PathBuf::from("edited.toml"));
                assert_eq!(changes, vec!["Reweighted rubric"]);
                assert_eq!(bump, Some(BumpKind::Major));
                assert!(dry_run);
            }
            _ => panic!("Expected Persona Revise command"),
        }
    }

    #[test]
    fn test_global_flags() {
        let cli = Cli::parse_from([
            "persona-version",
            "-vv",
            "persona",
            "list",
            "--persona-dir",
            "/tmp/board",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.persona_dir, Some(PathBuf::from("/tmp/board")));
    }

    #[test]
    fn test_config_init() {
        let cli = Cli::parse_from(["persona-version", "config", "init", "--force"]);
        match cli.command {
            Commands::Config { subcommand: ConfigSubcommand::Init { path, force } } => {
                assert!(path.is_none());
                assert!(force);
            }
            _ => panic!("Expected Config Init command"),
        }
    }
}
