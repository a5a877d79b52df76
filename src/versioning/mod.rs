//! Persona versioning
//!
//! Pure, stateless helpers for semantic versions and for classifying which
//! kind of bump a persona revision deserves.

pub mod classifier;
pub mod semver;

pub use classifier::{
    infer_bump_kind, tier_of, unrecognized_sections, ChangeSet, SectionTier,
    MAJOR_TIER_SECTIONS, MINOR_TIER_SECTIONS,
};
pub use semver::{bump, format, parse, BumpKind, SemanticVersion, DEFAULT_INITIAL_VERSION};
