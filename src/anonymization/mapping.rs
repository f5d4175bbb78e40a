//! Real name ↔ pseudonym mapping
//!
//! Pseudonyms are derived purely from a child's position in the form
//! (`Child_1`, `Child_2`, ...). They are rebuilt per request and never
//! looked up across requests.

use crate::domain::ChildProfile;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Prefix of every pseudonym label
pub const PSEUDONYM_PREFIX: &str = "Child_";

/// Pseudonym label for the child at `index` (zero-based)
pub fn pseudonym_for(index: usize) -> String {
    format!("{PSEUDONYM_PREFIX}{}", index + 1)
}

/// A declared name and its position in the caller's list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameEntry {
    /// Zero-based position in the caller's list
    pub index: usize,
    /// Trimmed, non-empty real name
    pub real_name: String,
}

impl NameEntry {
    /// Create an entry, or `None` when the name is blank
    pub fn new(index: usize, real_name: &str) -> Option<Self> {
        let trimmed = real_name.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            index,
            real_name: trimmed.to_string(),
        })
    }

    /// Pseudonym for this entry
    pub fn pseudonym(&self) -> String {
        pseudonym_for(self.index)
    }
}

/// Bidirectional mapping between real names and pseudonyms
///
/// `forward` and `reverse` always hold the same number of entries and are
/// exact inverses of each other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameMapping {
    /// Real name → pseudonym
    #[serde(rename = "childIdMap")]
    forward: BTreeMap<String, String>,

    /// Pseudonym → real name
    #[serde(rename = "reverseMap")]
    reverse: BTreeMap<String, String>,
}

impl NameMapping {
    /// Build a mapping from entries in order
    ///
    /// When two entries share the same trimmed name the later one wins and
    /// the earlier pseudonym is dropped from `reverse`.
    pub fn build<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = NameEntry>,
    {
        let mut mapping = Self::default();

        for entry in entries {
            let pseudonym = entry.pseudonym();
            if let Some(previous) = mapping.forward.insert(entry.real_name.clone(), pseudonym.clone()) {
                mapping.reverse.remove(&previous);
                tracing::warn!(
                    overwritten = %previous,
                    winner = %pseudonym,
                    "Duplicate child name; later entry takes the mapping"
                );
            }
            mapping.reverse.insert(pseudonym, entry.real_name);
        }

        mapping
    }

    /// Build a mapping from the children of a story request
    ///
    /// The index is the child's position in the full list, so blank names
    /// still consume a pseudonym slot.
    pub fn from_children(children: &[ChildProfile]) -> Self {
        Self::build(
            children
                .iter()
                .enumerate()
                .filter_map(|(index, child)| NameEntry::new(index, &child.name)),
        )
    }

    /// Real name → pseudonym
    pub fn forward(&self) -> &BTreeMap<String, String> {
        &self.forward
    }

    /// Pseudonym → real name
    pub fn reverse(&self) -> &BTreeMap<String, String> {
        &self.reverse
    }

    /// Pseudonym assigned to `real_name`
    pub fn pseudonym(&self, real_name: &str) -> Option<&str> {
        self.forward.get(real_name.trim()).map(String::as_str)
    }

    /// Real name behind `pseudonym`
    pub fn real_name(&self, pseudonym: &str) -> Option<&str> {
        self.reverse.get(pseudonym).map(String::as_str)
    }

    /// Number of mapped names
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    /// Whether no names are mapped
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }

    /// Iterate over `(real_name, pseudonym)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.forward.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(names: &[&str]) -> Vec<NameEntry> {
        names
            .iter()
            .enumerate()
            .filter_map(|(i, n)| NameEntry::new(i, n))
            .collect()
    }

    #[test]
    fn test_pseudonym_is_one_based() {
        assert_eq!(pseudonym_for(0), "Child_1");
        assert_eq!(pseudonym_for(9), "Child_10");
    }

    #[test]
    fn test_build_basic_mapping() {
        let mapping = NameMapping::build(entries(&["Lian", "Elli"]));
        assert_eq!(mapping.pseudonym("Lian"), Some("Child_1"));
        assert_eq!(mapping.pseudonym("Elli"), Some("Child_2"));
        assert_eq!(mapping.real_name("Child_2"), Some("Elli"));
        assert_eq!(mapping.len(), 2);
    }

    #[test]
    fn test_blank_names_keep_their_slot() {
        let mapping = NameMapping::build(entries(&["", "  ", " Elli "]));
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.pseudonym("Elli"), Some("Child_3"));
    }

    #[test]
    fn test_duplicate_names_last_write_wins() {
        let mapping = NameMapping::build(entries(&["Tim", "Mia", "Tim"]));
        assert_eq!(mapping.pseudonym("Tim"), Some("Child_3"));
        assert_eq!(mapping.real_name("Child_1"), None);
        assert_eq!(mapping.forward().len(), mapping.reverse().len());
    }

    #[test]
    fn test_keys_are_case_preserving() {
        let mapping = NameMapping::build(entries(&["tim", "Tim"]));
        assert_eq!(mapping.len(), 2);
        assert_eq!(mapping.pseudonym("tim"), Some("Child_1"));
        assert_eq!(mapping.pseudonym("Tim"), Some("Child_2"));
    }

    #[test]
    fn test_forward_and_reverse_are_inverses() {
        let mapping = NameMapping::build(entries(&["A", "B", "A", "C", "B", ""]));
        assert_eq!(mapping.forward().len(), mapping.reverse().len());
        for (real, pseudo) in mapping.iter() {
            assert_eq!(mapping.real_name(pseudo), Some(real));
        }
        let mut values: Vec<_> = mapping.forward().values().collect();
        values.sort();
        values.dedup();
        assert_eq!(values.len(), mapping.reverse().len());
    }

    #[test]
    fn test_from_children() {
        let children = vec![ChildProfile::named("Lian"), ChildProfile::named("Elli")];
        let mapping = NameMapping::from_children(&children);
        assert_eq!(mapping.pseudonym("Lian"), Some("Child_1"));
        assert_eq!(mapping.pseudonym("Elli"), Some("Child_2"));
    }

    #[test]
    fn test_serialized_layout() {
        let mapping = NameMapping::build(entries(&["Lian"]));
        let value = serde_json::to_value(&mapping).unwrap();
        assert_eq!(value["childIdMap"]["Lian"], "Child_1");
        assert_eq!(value["reverseMap"]["Child_1"], "Lian");
    }
}
