//! persona-version
//!
//! Semantic versioning for the advisor persona documents of the Personal
//! Board of Directors. The [`versioning`] module holds the pure classifier
//! (`parse`, `format`, `bump`, `infer_bump_kind`); [`persona`] builds the
//! authoring workflow on top of it: section diffs, revisions, changelogs and
//! a directory-backed store.

pub mod build_info;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod persona;
pub mod versioning;

pub use error::{Error, ErrorCode, Result};
pub use persona::{ChangelogEntry, PersonaDocument, PersonaSection, PersonaStore, Revision};
pub use versioning::{bump, format, infer_bump_kind, parse, BumpKind, ChangeSet, SemanticVersion};
