//! Change classification for persona revisions
//!
//! Maps the set of persona sections touched by a revision to the bump kind
//! it implies. Edits to the rubric, boundaries or purpose change how an
//! advisor judges a decision and always produce a major bump.

use std::collections::BTreeSet;

use super::semver::BumpKind;

/// Sections whose edits force a major bump
pub const MAJOR_TIER_SECTIONS: &[&str] = &["rubric", "boundaries", "purpose"];

/// Sections whose edits force at least a minor bump
pub const MINOR_TIER_SECTIONS: &[&str] = &[
    "panel_role",
    "reasoning",
    "interaction",
    "knowledge_base",
    "invocation",
];

/// Names of the sections touched by one revision
pub type ChangeSet = BTreeSet<String>;

/// Classification tier of a known section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionTier {
    Major,
    Minor,
}

impl SectionTier {
    /// Bump kind implied by an edit in this tier
    pub fn bump_kind(&self) -> BumpKind {
        match self {
            SectionTier::Major => BumpKind::Major,
            SectionTier::Minor => BumpKind::Minor,
        }
    }
}

/// Look up the tier of a section name. Matching is exact and case-sensitive.
pub fn tier_of(section: &str) -> Option<SectionTier> {
    if MAJOR_TIER_SECTIONS.contains(&section) {
        Some(SectionTier::Major)
    } else if MINOR_TIER_SECTIONS.contains(&section) {
        Some(SectionTier::Minor)
    } else {
        None
    }
}

/// Infer the bump kind for a set of changed section names.
///
/// Any major-tier section wins outright; otherwise any minor-tier section
/// gives `minor`; an empty or unrecognized set gives `patch`.
pub fn infer_bump_kind<I, S>(changed_sections: I) -> BumpKind
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut kind = BumpKind::Patch;
    for section in changed_sections {
        match tier_of(section.as_ref()) {
            Some(SectionTier::Major) => return BumpKind::Major,
            Some(SectionTier::Minor) => kind = BumpKind::Minor,
            None => {}
        }
    }
    kind
}

/// Section names in `changed_sections` that belong to neither tier
pub fn unrecognized_sections<I, S>(changed_sections: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    changed_sections
        .into_iter()
        .filter(|s| tier_of(s.as_ref()).is_none())
        .map(|s| s.as_ref().to_string())
        .collect()
}
