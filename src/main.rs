//! persona-version - semantic versioning for advisor persona documents
//!
//! Entry point for the `persona-version` binary.

use std::path::Path;

use chrono::Local;
use clap::Parser;
use serde_json::json;
use tracing::{debug, warn};

use persona_version::build_info::BuildInfo;
use persona_version::cli::{Cli, Commands, ConfigSubcommand, PersonaSubcommand};
use persona_version::config::{self, AppConfig};
use persona_version::error::Result;
use persona_version::logging::{self, LogGuards};
use persona_version::persona::{
    changed_sections, load_from_path, validate_changelog, PersonaDocument, PersonaStore,
    ReviseOptions, Revision,
};
use persona_version::versioning::{self, ChangeSet, SemanticVersion};

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprint!("{}", e.format_for_terminal());
        std::process::exit(e.exit_code());
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Version => {
            print!("{}", BuildInfo::current());
            Ok(())
        }
        Commands::Parse { text, json } => {
            init_simple_logging(cli.verbose, cli.quiet)?;
            handle_parse(&text, json)
        }
        Commands::Format { major, minor, patch } => {
            println!("{}", versioning::format(&SemanticVersion::new(major, minor, patch)));
            Ok(())
        }
        Commands::Bump { current, kind } => {
            init_simple_logging(cli.verbose, cli.quiet)?;
            println!("{}", versioning::bump(&current, kind));
            Ok(())
        }
        Commands::Classify { sections, json } => {
            init_simple_logging(cli.verbose, cli.quiet)?;
            handle_classify(sections, json)
        }
        Commands::Next { current, sections, bump, json } => {
            init_simple_logging(cli.verbose, cli.quiet)?;
            let sections: ChangeSet = sections.into_iter().collect();
            warn_unrecognized(&sections);
            let mut revision = Revision::plan(&current, sections);
            if let Some(kind) = bump {
                revision = revision.with_kind(kind);
            }
            if json {
                println!("{}", serde_json::to_string_pretty(&revision)?);
            } else {
                println!("{}", revision.next);
            }
            Ok(())
        }
        Commands::Config { subcommand } => {
            init_simple_logging(cli.verbose, cli.quiet)?;
            handle_config_command(subcommand, cli.config.as_deref())
        }
        Commands::Persona { subcommand } => {
            let config = AppConfig::load(cli.config.as_deref())?;
            let _log_guards = init_logging_from_config(&config, cli.verbose, cli.quiet)?;

            let dir = cli.persona_dir.unwrap_or_else(|| config.persona_dir());
            debug!(dir = %dir.display(), "Using persona directory");
            let store = PersonaStore::new(dir);
            let result = handle_persona_command(subcommand, &store, &config);
            if let Err(ref e) = result {
                debug!(error = %e.format_for_log(), "Persona command failed");
            }
            result
        }
    }
}

/// Initialize logging from configuration
fn init_logging_from_config(config: &AppConfig, verbose: u8, quiet: bool) -> Result<LogGuards> {
    logging::init_logging(&config.logging, verbose, quiet)
}

/// Console-only logging for commands that don't read configuration
fn init_simple_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = match (quiet, verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    logging::init_simple(level, quiet || verbose > 0)
}

fn warn_unrecognized(sections: &ChangeSet) {
    for name in versioning::unrecognized_sections(sections) {
        warn!(section = %name, "Unrecognized section, classified as patch");
    }
}

// ─────────────────────────────────────────────────────────────────
// Versioning Commands
// ─────────────────────────────────────────────────────────────────

fn handle_parse(text: &str, json: bool) -> Result<()> {
    let parsed = versioning::parse(text);
    if json {
        println!("{}", serde_json::to_string(&parsed)?);
    } else {
        match parsed {
            Some(version) => println!("{}", version),
            None => println!("invalid"),
        }
    }

    // an absent result is an answer, not an error
    if parsed.is_none() {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_classify(sections: Vec<String>, json: bool) -> Result<()> {
    let sections: ChangeSet = sections.into_iter().collect();
    warn_unrecognized(&sections);
    let kind = versioning::infer_bump_kind(&sections);

    if json {
        let output = json!({
            "kind": kind,
            "sections": sections,
            "unrecognized": versioning::unrecognized_sections(&sections),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", kind);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Persona Commands
// ─────────────────────────────────────────────────────────────────

fn handle_persona_command(
    subcommand: PersonaSubcommand,
    store: &PersonaStore,
    config: &AppConfig,
) -> Result<()> {
    let today = Local::now().date_naive();

    match subcommand {
        PersonaSubcommand::New { id, name, author, force } => {
            let name = name.unwrap_or_else(|| id.clone());
            let author = author.unwrap_or_else(|| config.author());
            let doc = store.create(&id, &name, &author, today, force)?;
            println!(
                "Created persona {} at {} ({})",
                doc.id,
                doc.version,
                store.persona_path(&doc.id).display()
            );
        }

        PersonaSubcommand::List { json } => {
            let personas = store.list()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&personas)?);
            } else if personas.is_empty() {
                println!("No personas in {}", store.dir().display());
            } else {
                println!("{:<24} {:<10} {:>9}  NAME", "ID", "VERSION", "REVISIONS");
                for p in personas {
                    println!("{:<24} {:<10} {:>9}  {}", p.id, p.version, p.revisions, p.name);
                }
            }
        }

        PersonaSubcommand::Show { id, json } => {
            let doc = store.load(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc)?);
            } else {
                print!("{}", doc.to_toml()?);
            }
        }

        PersonaSubcommand::Diff { old, new, json } => {
            handle_diff(&old, &new, json)?;
        }

        PersonaSubcommand::Revise { id, from, author, changes, bump, dry_run, json } => {
            let updated = load_from_path(&from)?;
            let options = ReviseOptions {
                author: author.unwrap_or_else(|| config.author()),
                date: today,
                changes,
                bump,
                dry_run,
            };
            let (revision, doc) = store.revise(&id, updated, options)?;
            warn_unrecognized(&revision.sections);

            if json {
                let output = json!({ "revision": revision, "entry": doc.latest_entry() });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                println!(
                    "{}: {} -> {} ({}{})",
                    doc.id,
                    revision.previous,
                    revision.next,
                    revision.kind,
                    if revision.inferred { "" } else { ", forced" }
                );
                if let Some(entry) = doc.latest_entry() {
                    for change in &entry.changes {
                        println!("  - {}", change);
                    }
                }
                if dry_run {
                    println!("Dry run: nothing saved.");
                }
            }
        }

        PersonaSubcommand::History { id, json } => {
            let doc = store.load(&id)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&doc.changelog)?);
            } else {
                for entry in doc.changelog.iter().rev() {
                    println!("{}  {}  {}", entry.version, entry.date, entry.author);
                    for change in &entry.changes {
                        println!("  - {}", change);
                    }
                }
            }
        }

        PersonaSubcommand::Validate { id } => {
            let doc = store.load(&id)?;
            validate_changelog(&doc)?;
            println!(
                "{} {}: changelog is valid ({} entries).",
                doc.id,
                doc.version,
                doc.changelog.len()
            );
        }
    }

    Ok(())
}

fn handle_diff(old_path: &Path, new_path: &Path, json: bool) -> Result<()> {
    let old: PersonaDocument = load_from_path(old_path)?;
    let new: PersonaDocument = load_from_path(new_path)?;
    let sections = changed_sections(&old, &new);
    let revision = Revision::plan(&old.version, sections);

    if json {
        println!("{}", serde_json::to_string_pretty(&revision)?);
        return Ok(());
    }

    if revision.sections.is_empty() {
        println!("No section changes.");
    }
    for name in &revision.sections {
        let tier = match versioning::tier_of(name) {
            Some(tier) => tier.bump_kind().as_str(),
            None => "patch",
        };
        println!("  {:<16} {}", name, tier);
    }
    println!("Bump: {} ({} -> {})", revision.kind, revision.previous, revision.next);
    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Config Commands
// ─────────────────────────────────────────────────────────────────

fn handle_config_command(subcommand: ConfigSubcommand, config_path: Option<&str>) -> Result<()> {
    match subcommand {
        ConfigSubcommand::Show => {
            let cfg = AppConfig::load(config_path)?;
            println!("{}", toml::to_string_pretty(&cfg)?);
        }
        ConfigSubcommand::Init { path, force } => {
            let written = config::init_config(path.as_deref(), force)?;
            println!("Configuration file created: {}", written.display());
        }
        ConfigSubcommand::Validate => {
            AppConfig::load(config_path)?;
            println!("Configuration is valid.");
        }
    }

    Ok(())
}
