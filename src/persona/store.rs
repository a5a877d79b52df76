//! Persona store — create, load, list, and revise persona documents on disk.
//!
//! Each persona lives in `<dir>/<id>.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::versioning::{self, BumpKind, DEFAULT_INITIAL_VERSION};

use super::changelog::Revision;
use super::diff::changed_sections;
use super::types::{ChangelogEntry, PersonaDocument, PersonaSummary};

// ─────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────

const PERSONA_EXTENSION: &str = "toml";
const INITIAL_CHANGE: &str = "Initial version";

// ─────────────────────────────────────────────────────────────────
// Revise Options
// ─────────────────────────────────────────────────────────────────

/// Caller-supplied details for a revision.
#[derive(Debug, Clone)]
pub struct ReviseOptions {
    pub author: String,
    pub date: NaiveDate,
    /// Change descriptions; generated from the touched sections when empty.
    pub changes: Vec<String>,
    /// Force a bump kind instead of inferring it.
    pub bump: Option<BumpKind>,
    /// Plan only, leave the stored document untouched.
    pub dry_run: bool,
}

impl ReviseOptions {
    pub fn new(author: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            author: author.into(),
            date,
            changes: Vec::new(),
            bump: None,
            dry_run: false,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona Store
// ─────────────────────────────────────────────────────────────────

/// Directory-backed collection of persona documents.
pub struct PersonaStore {
    dir: PathBuf,
}

impl PersonaStore {
    /// Create a store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Get the store directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document for `id`.
    pub fn persona_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.{}", id, PERSONA_EXTENSION))
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| Error::IoWrite {
                path: self.dir.clone(),
                source: e,
            })?;
            debug!(path = %self.dir.display(), "Created persona directory");
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Create
    // ─────────────────────────────────────────────────────────────

    /// Write a new persona scaffold at the default initial version.
    pub fn create(
        &self,
        id: &str,
        name: &str,
        author: &str,
        date: NaiveDate,
        force: bool,
    ) -> Result<PersonaDocument> {
        validate_id(id)?;
        let path = self.persona_path(id);
        if path.exists() && !force {
            return Err(Error::PersonaExists { id: id.to_string() });
        }

        let mut doc = PersonaDocument::new(id, name, DEFAULT_INITIAL_VERSION);
        doc.changelog.push(ChangelogEntry::new(
            DEFAULT_INITIAL_VERSION,
            date,
            author,
            vec![INITIAL_CHANGE.to_string()],
        ));

        self.save(&doc)?;
        info!(persona = %id, path = %path.display(), "Persona created");
        Ok(doc)
    }

    // ─────────────────────────────────────────────────────────────
    // List / Load / Save
    // ─────────────────────────────────────────────────────────────

    /// Summaries of every readable persona, sorted by id.
    ///
    /// Files that fail to parse are skipped with a warning.
    pub fn list(&self) -> Result<Vec<PersonaSummary>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir).map_err(|e| Error::IoRead {
            path: self.dir.clone(),
            source: e,
        })?;

        let mut result = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PERSONA_EXTENSION) {
                continue;
            }
            match load_from_path(&path) {
                Ok(doc) => result.push(PersonaSummary::from(&doc)),
                Err(e) => warn!(path = %path.display(), error = %e, "Skipping unreadable persona"),
            }
        }

        result.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(result)
    }

    /// Load the persona `id`.
    pub fn load(&self, id: &str) -> Result<PersonaDocument> {
        validate_id(id)?;
        let path = self.persona_path(id);
        if !path.exists() {
            return Err(Error::PersonaNotFound { id: id.to_string() });
        }
        let doc = load_from_path(&path)?;
        if doc.id != id {
            return Err(Error::PersonaInvalid {
                id: id.to_string(),
                reason: format!("document id '{}' does not match file name", doc.id),
            });
        }
        Ok(doc)
    }

    /// Write a document to `<dir>/<doc.id>.toml`, replacing any existing file.
    pub fn save(&self, doc: &PersonaDocument) -> Result<PathBuf> {
        validate_id(&doc.id)?;
        self.ensure_dir()?;
        let path = self.persona_path(&doc.id);
        let content = doc.to_toml().map_err(|e| Error::PersonaInvalid {
            id: doc.id.clone(),
            reason: format!("cannot be written as TOML: {}", e),
        })?;
        fs::write(&path, content).map_err(|e| Error::IoWrite {
            path: path.clone(),
            source: e,
        })?;
        debug!(persona = %doc.id, version = %doc.version, "Persona saved");
        Ok(path)
    }

    // ─────────────────────────────────────────────────────────────
    // Revise
    // ─────────────────────────────────────────────────────────────

    /// Publish `updated` as the next revision of `id`.
    ///
    /// The stored changelog is authoritative; whatever history `updated`
    /// carries is replaced by it before the new entry is appended. When the
    /// stored version does not parse, the bump starts from the latest
    /// changelog entry so the history stays valid.
    pub fn revise(
        &self,
        id: &str,
        mut updated: PersonaDocument,
        options: ReviseOptions,
    ) -> Result<(Revision, PersonaDocument)> {
        let stored = self.load(id)?;
        if updated.id != id {
            return Err(Error::PersonaInvalid {
                id: id.to_string(),
                reason: format!("updated document has id '{}'", updated.id),
            });
        }

        let base = revision_base(&stored)?.to_string();
        let sections = changed_sections(&stored, &updated);
        let mut revision = Revision::plan(&base, sections);
        if let Some(kind) = options.bump {
            revision = revision.with_kind(kind);
        }

        updated.changelog = stored.changelog;
        revision.apply(&mut updated, &options.author, options.date, options.changes);

        if options.dry_run {
            info!(persona = %id, version = %revision.next, "Dry run, not saving");
        } else {
            self.save(&updated)?;
        }
        Ok((revision, updated))
    }
}

/// Version a revision of `doc` is bumped from.
///
/// An unparsable version with no history recovers to the initial version
/// through `bump`. With history, the latest entry is used instead, and an
/// unparsable latest entry is an error.
fn revision_base(doc: &PersonaDocument) -> Result<&str> {
    if versioning::parse(&doc.version).is_some() {
        return Ok(&doc.version);
    }
    match doc.latest_entry() {
        None => Ok(&doc.version),
        Some(entry) if versioning::parse(&entry.version).is_some() => {
            warn!(
                persona = %doc.id,
                version = %doc.version,
                latest = %entry.version,
                "Unparsable document version, revising from latest changelog entry"
            );
            Ok(&entry.version)
        }
        Some(_) => Err(Error::VersionInvalid {
            value: doc.version.clone(),
        }),
    }
}

/// Persona ids double as file names: lowercase ASCII, digits, `-` and `_`.
pub fn validate_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
    if valid {
        Ok(())
    } else {
        Err(Error::InvalidPersonaId { id: id.to_string() })
    }
}

/// Read and parse a persona document from any path.
pub fn load_from_path(path: &Path) -> Result<PersonaDocument> {
    let content = fs::read_to_string(path).map_err(|e| Error::IoRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    PersonaDocument::from_toml(&content).map_err(|e| Error::PersonaParse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
