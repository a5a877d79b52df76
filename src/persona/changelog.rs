//! Revision planning and changelog bookkeeping.
//!
//! A revision takes the current version and the change set of an edit,
//! classifies it, bumps the version and records a changelog entry.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::versioning::{self, BumpKind, ChangeSet};

use super::types::{ChangelogEntry, PersonaDocument};

/// Outcome of classifying one edit to a persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Revision {
    /// Version before the edit, as stored (may be unparsable).
    pub previous: String,
    /// Bump applied.
    pub kind: BumpKind,
    /// Version after the edit.
    pub next: String,
    /// Sections touched by the edit.
    pub sections: ChangeSet,
    /// False when `kind` was forced by the caller.
    pub inferred: bool,
}

impl Revision {
    /// Classify `sections` and compute the next version from `current`.
    pub fn plan(current: &str, sections: ChangeSet) -> Self {
        let kind = versioning::infer_bump_kind(&sections);
        let next = versioning::bump(current, kind);
        debug!(previous = %current, next = %next, kind = %kind, "Planned revision");
        Self {
            previous: current.to_string(),
            kind,
            next,
            sections,
            inferred: true,
        }
    }

    /// Override the inferred bump kind.
    pub fn with_kind(mut self, kind: BumpKind) -> Self {
        if kind != self.kind {
            self.kind = kind;
            self.next = versioning::bump(&self.previous, kind);
            self.inferred = false;
        }
        self
    }

    /// Build the changelog entry for this revision.
    ///
    /// Empty `changes` are replaced by one line per touched section.
    pub fn entry(&self, author: &str, date: NaiveDate, changes: Vec<String>) -> ChangelogEntry {
        let changes = if changes.is_empty() {
            describe_sections(&self.sections)
        } else {
            changes
        };
        ChangelogEntry::new(self.next.clone(), date, author, changes)
    }

    /// Stamp `doc` with the next version and append the changelog entry.
    pub fn apply(
        &self,
        doc: &mut PersonaDocument,
        author: &str,
        date: NaiveDate,
        changes: Vec<String>,
    ) {
        let entry = self.entry(author, date, changes);
        doc.version = self.next.clone();
        doc.changelog.push(entry);
        info!(
            persona = %doc.id,
            previous = %self.previous,
            version = %self.next,
            kind = %self.kind,
            "Revision applied"
        );
    }
}

/// Default change descriptions for a set of touched sections.
pub fn describe_sections(sections: &ChangeSet) -> Vec<String> {
    if sections.is_empty() {
        return vec!["Editorial revision".to_string()];
    }
    sections.iter().map(|s| format!("Updated {}", s)).collect()
}

/// Check that a document's changelog is a coherent audit trail.
///
/// Every entry version must parse, versions must strictly increase, and the
/// newest entry must match the document version.
pub fn validate_changelog(doc: &PersonaDocument) -> Result<()> {
    let current = versioning::parse(&doc.version).ok_or_else(|| Error::VersionInvalid {
        value: doc.version.clone(),
    })?;

    let mut previous = None;
    for (index, entry) in doc.changelog.iter().enumerate() {
        let version = versioning::parse(&entry.version).ok_or_else(|| {
            Error::changelog_invalid(
                &doc.id,
                format!("entry {} has invalid version '{}'", index + 1, entry.version),
            )
        })?;

        if let Some(prev) = previous {
            if version <= prev {
                return Err(Error::changelog_invalid(
                    &doc.id,
                    format!(
                        "entry {} version {} does not follow {}",
                        index + 1,
                        version,
                        prev
                    ),
                ));
            }
        }
        previous = Some(version);
    }

    if let Some(latest) = previous {
        if latest != current {
            return Err(Error::changelog_invalid(
                &doc.id,
                format!(
                    "document version {} does not match latest changelog entry {}",
                    current, latest
                ),
            ));
        }
    }

    Ok(())
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
