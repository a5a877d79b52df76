//! Section-level diff between two revisions of a persona document.

use crate::versioning::ChangeSet;

use super::types::{PersonaDocument, PersonaSection};

/// Compute the set of section names that differ between `old` and `new`.
///
/// A section counts as changed when it was added, removed, or its body is
/// not equal. `id`, `version` and `changelog` are bookkeeping and ignored.
/// Unrecognized top-level keys are compared the same way and reported by
/// their own name.
pub fn changed_sections(old: &PersonaDocument, new: &PersonaDocument) -> ChangeSet {
    let mut changes: ChangeSet = PersonaSection::all()
        .iter()
        .filter(|s| old.section(**s) != new.section(**s))
        .map(|s| s.name().to_string())
        .collect();

    // metadata edits are reported but belong to no tier
    if old.name != new.name {
        changes.insert("name".to_string());
    }
    if old.description != new.description {
        changes.insert("description".to_string());
    }

    for key in old.extra.keys().chain(new.extra.keys()) {
        if old.extra.get(key) != new.extra.get(key) {
            changes.insert(key.clone());
        }
    }

    changes
}
