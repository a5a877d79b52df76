//! Semantic version triples for persona documents
//!
//! Persona versions are plain `major.minor.patch` strings. Anything else
//! (pre-release tags, build metadata, whitespace, signs) is treated as
//! "unversioned" rather than as an error.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Version assigned when a persona has no usable prior version
pub const DEFAULT_INITIAL_VERSION: &str = "1.0.0";

/// A `major.minor.patch` version
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SemanticVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl SemanticVersion {
    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self { major, minor, patch }
    }

    /// The default initial version, `1.0.0`
    pub const fn initial() -> Self {
        Self::new(1, 0, 0)
    }

    /// Return the version produced by applying `kind` to this one.
    ///
    /// A higher-order bump zeroes every lower-order component. When the
    /// bumped component is already `u64::MAX` the version is returned
    /// unchanged, so a bump never lowers it.
    pub fn bumped(&self, kind: BumpKind) -> Self {
        let next = match kind {
            BumpKind::Major => self.major.checked_add(1).map(|major| Self::new(major, 0, 0)),
            BumpKind::Minor => self
                .minor
                .checked_add(1)
                .map(|minor| Self::new(self.major, minor, 0)),
            BumpKind::Patch => self
                .patch
                .checked_add(1)
                .map(|patch| Self::new(self.major, self.minor, patch)),
        };
        next.unwrap_or(*self)
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

// ─────────────────────────────────────────────────────────────────
// Bump Kind
// ─────────────────────────────────────────────────────────────────

/// Severity of a version increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpKind {
    Patch,
    Minor,
    Major,
}

impl BumpKind {
    /// Lowercase name used in CLI args and JSON output
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }

    /// All bump kinds, most severe first
    pub fn all() -> &'static [BumpKind] {
        &[BumpKind::Major, BumpKind::Minor, BumpKind::Patch]
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            _ => Err(format!(
                "Unknown bump kind '{}'. Valid: major, minor, patch",
                s
            )),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Operations
// ─────────────────────────────────────────────────────────────────

/// Parse a strict `<digits>.<digits>.<digits>` string.
///
/// Returns `None` for anything else, including surrounding whitespace,
/// pre-release or build suffixes, and components that overflow `u64`.
pub fn parse(text: &str) -> Option<SemanticVersion> {
    let mut parts = text.split('.');
    let major = parse_component(parts.next()?)?;
    let minor = parse_component(parts.next()?)?;
    let patch = parse_component(parts.next()?)?;
    if parts.next().is_some() {
        return None;
    }
    Some(SemanticVersion::new(major, minor, patch))
}

/// `u64::from_str` accepts a leading `+`, so check the digits first
fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Canonical `major.minor.patch` form
pub fn format(version: &SemanticVersion) -> String {
    version.to_string()
}

/// Bump `current` by `kind`, recovering to `1.0.0` when it does not parse
pub fn bump(current: &str, kind: BumpKind) -> String {
    match parse(current) {
        Some(version) => format(&version.bumped(kind)),
        None => {
            tracing::debug!(
                current = %current,
                kind = %kind,
                "Unparsable version, starting history at {}",
                DEFAULT_INITIAL_VERSION
            );
            format(&SemanticVersion::initial())
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────
