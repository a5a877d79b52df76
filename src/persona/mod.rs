//! Persona documents — the advisor definitions whose revisions are versioned.
//!
//! Each advisor on the board is a persona document split into named sections.
//! Editing a section produces a revision whose bump kind depends on which
//! sections were touched, and every revision is recorded in the document's
//! changelog.

pub mod changelog;
pub mod diff;
pub mod store;
pub mod types;

pub use changelog::{describe_sections, validate_changelog, Revision};
pub use diff::changed_sections;
pub use store::{load_from_path, validate_id, PersonaStore, ReviseOptions};
pub use types::{ChangelogEntry, PersonaDocument, PersonaSection, PersonaSummary};
