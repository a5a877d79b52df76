//! Core types for persona documents.
//!
//! A persona document defines one advisor on the board: its purpose, how it
//! scores a decision, what it will not do, and how it reasons. Documents are
//! stored as TOML and carry their own changelog.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::versioning::{tier_of, SectionTier};

// ─────────────────────────────────────────────────────────────────
// Persona Section
// ─────────────────────────────────────────────────────────────────

/// The named sections of a persona document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersonaSection {
    /// Why this advisor exists and what it optimises for.
    Purpose,
    /// The seat this advisor takes on the panel.
    PanelRole,
    /// How the advisor scores a decision.
    Rubric,
    /// Hard behavioural limits.
    Boundaries,
    /// Reasoning style and heuristics.
    Reasoning,
    /// Tone and interaction rules with the user and other advisors.
    Interaction,
    /// Reference material the advisor draws on.
    KnowledgeBase,
    /// When the advisor should be called in.
    Invocation,
}

impl PersonaSection {
    /// Name used in persona TOML and in change sets.
    pub fn name(&self) -> &'static str {
        match self {
            PersonaSection::Purpose => "purpose",
            PersonaSection::PanelRole => "panel_role",
            PersonaSection::Rubric => "rubric",
            PersonaSection::Boundaries => "boundaries",
            PersonaSection::Reasoning => "reasoning",
            PersonaSection::Interaction => "interaction",
            PersonaSection::KnowledgeBase => "knowledge_base",
            PersonaSection::Invocation => "invocation",
        }
    }

    /// All sections in document order.
    pub fn all() -> &'static [PersonaSection] {
        &[
            PersonaSection::Purpose,
            PersonaSection::PanelRole,
            PersonaSection::Rubric,
            PersonaSection::Boundaries,
            PersonaSection::Reasoning,
            PersonaSection::Interaction,
            PersonaSection::KnowledgeBase,
            PersonaSection::Invocation,
        ]
    }

    /// Classification tier of this section. Every known section has one.
    pub fn tier(&self) -> SectionTier {
        tier_of(self.name()).unwrap_or(SectionTier::Minor)
    }
}

impl fmt::Display for PersonaSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PersonaSection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PersonaSection::all()
            .iter()
            .copied()
            .find(|section| section.name() == s)
            .ok_or_else(|| format!("Unknown persona section '{}'", s))
    }
}

// ─────────────────────────────────────────────────────────────────
// Changelog Entry
// ─────────────────────────────────────────────────────────────────

/// One published revision of a persona. Never modified once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Version published by this revision.
    pub version: String,

    /// Date the revision was published.
    pub date: NaiveDate,

    /// Who made the revision.
    pub author: String,

    /// Human-readable descriptions, in the order they were written.
    #[serde(default)]
    pub changes: Vec<String>,
}

impl ChangelogEntry {
    pub fn new(
        version: impl Into<String>,
        date: NaiveDate,
        author: impl Into<String>,
        changes: Vec<String>,
    ) -> Self {
        Self {
            version: version.into(),
            date,
            author: author.into(),
            changes,
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Persona Document (loaded from TOML)
// ─────────────────────────────────────────────────────────────────

/// Full persona document, deserialized from TOML.
///
/// Section bodies are free-form TOML values; only their equality matters to
/// versioning. Top-level keys outside the known sections are kept in
/// `extra` so a rewrite never drops them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonaDocument {
    /// Stable identifier, also the file stem on disk.
    pub id: String,

    /// Display name shown on the board.
    pub name: String,

    /// Current semantic version (e.g. "1.0.0").
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purpose: Option<toml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_role: Option<toml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rubric: Option<toml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<toml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reasoning: Option<toml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interaction: Option<toml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub knowledge_base: Option<toml::Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invocation: Option<toml::Value>,

    /// Published revisions, oldest first.
    #[serde(default)]
    pub changelog: Vec<ChangelogEntry>,

    /// Unrecognized top-level keys, written back unchanged.
    #[serde(flatten)]
    pub extra: BTreeMap<String, toml::Value>,
}

impl PersonaDocument {
    /// Create an empty document with no sections and no history.
    pub fn new(id: impl Into<String>, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            version: version.into(),
            description: None,
            purpose: None,
            panel_role: None,
            rubric: None,
            boundaries: None,
            reasoning: None,
            interaction: None,
            knowledge_base: None,
            invocation: None,
            changelog: Vec::new(),
            extra: BTreeMap::new(),
        }
    }

    /// Borrow the body of a section, if present.
    pub fn section(&self, section: PersonaSection) -> Option<&toml::Value> {
        match section {
            PersonaSection::Purpose => self.purpose.as_ref(),
            PersonaSection::PanelRole => self.panel_role.as_ref(),
            PersonaSection::Rubric => self.rubric.as_ref(),
            PersonaSection::Boundaries => self.boundaries.as_ref(),
            PersonaSection::Reasoning => self.reasoning.as_ref(),
            PersonaSection::Interaction => self.interaction.as_ref(),
            PersonaSection::KnowledgeBase => self.knowledge_base.as_ref(),
            PersonaSection::Invocation => self.invocation.as_ref(),
        }
    }

    /// Replace the body of a section.
    pub fn set_section(&mut self, section: PersonaSection, value: Option<toml::Value>) {
        let slot = match section {
            PersonaSection::Purpose => &mut self.purpose,
            PersonaSection::PanelRole => &mut self.panel_role,
            PersonaSection::Rubric => &mut self.rubric,
            PersonaSection::Boundaries => &mut self.boundaries,
            PersonaSection::Reasoning => &mut self.reasoning,
            PersonaSection::Interaction => &mut self.interaction,
            PersonaSection::KnowledgeBase => &mut self.knowledge_base,
            PersonaSection::Invocation => &mut self.invocation,
        };
        *slot = value;
    }

    /// Most recent changelog entry.
    pub fn latest_entry(&self) -> Option<&ChangelogEntry> {
        self.changelog.last()
    }

    /// Parse a document from TOML text.
    pub fn from_toml(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize the document to pretty TOML.
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

/// Summary of a stored persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersonaSummary {
    pub id: String,
    pub name: String,
    pub version: String,
    pub revisions: usize,
}

impl From<&PersonaDocument> for PersonaSummary {
    fn from(doc: &PersonaDocument) -> Self {
        Self {
            id: doc.id.clone(),
            name: doc.name.clone(),
            version: doc.version.clone(),
            revisions: doc.changelog.len(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
id = "skeptic"
name = "The Skeptic"
version = "1.4.2"
description = "Stress-tests every assumption"
purpose = "Find the weakest link in the plan"

[rubric]
downside_weight = 0.6
evidence_weight = 0.4

[boundaries]
never = ["give legal advice", "predict markets"]

[[changelog]]
version = "1.4.2"
date = "2026-03-01"
author = "alice"
changes = ["Tightened evidence weighting"]
"#;

    #[test]
    fn test_section_names() {
        assert_eq!(PersonaSection::PanelRole.name(), "panel_role");
        assert_eq!(PersonaSection::KnowledgeBase.name(), "knowledge_base");
        assert_eq!(PersonaSection::all().len(), 8);
    }

    #[test]
    fn test_section_from_str() {
        assert_eq!("rubric".parse::<PersonaSection>().unwrap(), PersonaSection::Rubric);
        assert_eq!(
            "invocation".parse::<PersonaSection>().unwrap(),
            PersonaSection::Invocation
        );
        assert!("Rubric".parse::<PersonaSection>().is_err());
        assert!("tone".parse::<PersonaSection>().is_err());
    }

    #[test]
    fn test_section_tiers() {
        assert_eq!(PersonaSection::Purpose.tier(), SectionTier::Major);
        assert_eq!(PersonaSection::Rubric.tier(), SectionTier::Major);
        assert_eq!(PersonaSection::Boundaries.tier(), SectionTier::Major);
        assert_eq!(PersonaSection::Reasoning.tier(), SectionTier::Minor);
        assert_eq!(PersonaSection::Invocation.tier(), SectionTier::Minor);
    }

    #[test]
    fn test_parse_document() {
        let doc = PersonaDocument::from_toml(SAMPLE).unwrap();
        assert_eq!(doc.id, "skeptic");
        assert_eq!(doc.version, "1.4.2");
        assert!(doc.section(PersonaSection::Rubric).is_some());
        assert!(doc.section(PersonaSection::Reasoning).is_none());
        assert!(doc.extra.is_empty());
        let entry = doc.latest_entry().unwrap();
        assert_eq!(entry.date, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(entry.author, "alice");
    }

    #[test]
    fn test_document_toml_roundtrip() {
        let doc = PersonaDocument::from_toml(SAMPLE).unwrap();
        let text = doc.to_toml().unwrap();
        let parsed = PersonaDocument::from_toml(&text).unwrap();
        assert_eq!(doc, parsed);
    }

    #[test]
    fn test_unknown_keys_survive_rewrite() {
        let text = SAMPLE.replacen("purpose =", "tone = \"dry\"\npurpose =", 1);
        let doc = PersonaDocument::from_toml(&text).unwrap();
        assert_eq!(
            doc.extra.get("tone").and_then(|v| v.as_str()),
            Some("dry")
        );

        let rewritten = doc.to_toml().unwrap();
        assert!(rewritten.contains("tone = \"dry\""));
        assert_eq!(PersonaDocument::from_toml(&rewritten).unwrap(), doc);
    }

    #[test]
    fn test_set_section() {
        let mut doc = PersonaDocument::new("optimist", "The Optimist", "1.0.0");
        assert!(doc.section(PersonaSection::Reasoning).is_none());
        doc.set_section(
            PersonaSection::Reasoning,
            Some(toml::Value::String("Look for upside".into())),
        );
        assert_eq!(
            doc.section(PersonaSection::Reasoning).and_then(|v| v.as_str()),
            Some("Look for upside")
        );
    }

    #[test]
    fn test_summary() {
        let doc = PersonaDocument::from_toml(SAMPLE).unwrap();
        let summary = PersonaSummary::from(&doc);
        assert_eq!(summary.id, "skeptic");
        assert_eq!(summary.revisions, 1);
    }
}
