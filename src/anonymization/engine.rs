//! Redaction engine
//!
//! This module provides the [`RedactionEngine`] that replaces every declared
//! real name in a text with its pseudonym.
//!
//! # Ordering
//!
//! Names are applied longest-first. A short name that is a prefix of a
//! longer one ("Tim" / "Timothy") must never consume part of the longer
//! match, so "Timothy" is always replaced before "Tim" is searched for.
//!
//! # Examples
//!
//! ```
//! use storylog::anonymization::{NameEntry, NameMapping, RedactionEngine};
//!
//! # fn example() -> storylog::domain::Result<()> {
//! let mapping = NameMapping::build([
//!     NameEntry::new(0, "Tim").unwrap(),
//!     NameEntry::new(1, "Timothy").unwrap(),
//! ]);
//! let engine = RedactionEngine::new(&mapping)?;
//!
//! assert_eq!(
//!     engine.anonymize("Timothy and Tim's kite"),
//!     "Child_2 and Child_1's kite"
//! );
//! # Ok(())
//! # }
//! ```

use crate::anonymization::{mapping::NameMapping, pattern::NamePattern};
use crate::domain::{ParentNote, Result};
use std::cmp::Ordering;

/// Placeholder emitted when a field cannot be safely anonymized
pub const REDACTED_PLACEHOLDER: &str = "[redacted]";

/// One name → pseudonym substitution
#[derive(Debug, Clone)]
struct RedactionRule {
    pattern: NamePattern,
    pseudonym: String,
    name_len: usize,
}

/// Applies a [`NameMapping`] to free text
///
/// The engine holds no mutable state; one engine can anonymize every text
/// field of a request, and independent requests can build their own engines
/// concurrently.
#[derive(Debug, Clone, Default)]
pub struct RedactionEngine {
    rules: Vec<RedactionRule>,
}

impl RedactionEngine {
    /// Compile matchers for every name in `mapping`
    ///
    /// # Errors
    ///
    /// Returns an error if a name cannot be compiled into a matcher.
    pub fn new(mapping: &NameMapping) -> Result<Self> {
        let mut named_rules = mapping
            .iter()
            .map(|(name, pseudonym)| -> Result<(&str, RedactionRule)> {
                Ok((
                    name,
                    RedactionRule {
                        pattern: NamePattern::compile(name)?,
                        pseudonym: pseudonym.to_string(),
                        name_len: name.chars().count(),
                    },
                ))
            })
            .collect::<Result<Vec<_>>>()?;

        named_rules.sort_by(|(a_name, a), (b_name, b)| match b.name_len.cmp(&a.name_len) {
            Ordering::Equal => a_name.cmp(b_name),
            other => other,
        });

        tracing::debug!(rules = named_rules.len(), "Redaction engine compiled");

        Ok(Self {
            rules: named_rules.into_iter().map(|(_, rule)| rule).collect(),
        })
    }

    /// Number of compiled names
    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// Replace all declared names in `text`, failing on matcher errors
    pub fn try_anonymize(&self, text: &str) -> Result<String> {
        let mut output = text.to_string();
        if output.is_empty() {
            return Ok(output);
        }

        for rule in &self.rules {
            output = rule.pattern.replace_all(&output, &rule.pseudonym)?;
        }

        Ok(output)
    }

    /// Replace all declared names in `text`
    ///
    /// Never fails: if matching breaks down the whole field is replaced
    /// with [`REDACTED_PLACEHOLDER`].
    pub fn anonymize(&self, text: &str) -> String {
        match self.try_anonymize(text) {
            Ok(output) => output,
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    text_len = text.chars().count(),
                    "Anonymization failed; field replaced with placeholder"
                );
                REDACTED_PLACEHOLDER.to_string()
            }
        }
    }

    /// Anonymize an optional text, treating `None` as empty
    pub fn anonymize_opt(&self, text: Option<&str>) -> String {
        text.map(|t| self.anonymize(t)).unwrap_or_default()
    }

    /// Anonymize every text slot of a parent note, keeping its shape
    pub fn anonymize_note(&self, note: &ParentNote) -> ParentNote {
        note.map_text(|text| self.anonymize(text))
    }
}

/// One-shot anonymization of `text` with `mapping`
///
/// Builds a throwaway engine. Prefer [`RedactionEngine`] when several
/// fields share a mapping.
pub fn anonymize(text: &str, mapping: &NameMapping) -> String {
    if mapping.is_empty() || text.is_empty() {
        return text.to_string();
    }

    match RedactionEngine::new(mapping) {
        Ok(engine) => engine.anonymize(text),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to compile name patterns; field replaced with placeholder");
            REDACTED_PLACEHOLDER.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anonymization::mapping::NameEntry;

    fn mapping(pairs: &[(usize, &str)]) -> NameMapping {
        NameMapping::build(
            pairs
                .iter()
                .filter_map(|(index, name)| NameEntry::new(*index, name)),
        )
    }

    #[test]
    fn test_engine_creation() {
        let engine = RedactionEngine::new(&mapping(&[(0, "Lian"), (1, "Elli")])).unwrap();
        assert_eq!(engine.rule_count(), 2);
    }

    #[test]
    fn test_longest_name_first() {
        let engine = RedactionEngine::new(&mapping(&[(0, "Tim"), (1, "Timothy")])).unwrap();
        assert_eq!(
            engine.anonymize("Timothy and Tim played"),
            "Child_2 and Child_1 played"
        );
    }

    #[test]
    fn test_multi_word_name_contains_shorter_name() {
        let engine =
            RedactionEngine::new(&mapping(&[(0, "Anna"), (1, "Anna Lena")])).unwrap();
        assert_eq!(
            engine.anonymize("Anna Lena met Anna."),
            "Child_2 met Child_1."
        );
    }

    #[test]
    fn test_empty_text() {
        let engine = RedactionEngine::new(&mapping(&[(0, "Tim")])).unwrap();
        assert_eq!(engine.anonymize(""), "");
        assert_eq!(engine.anonymize_opt(None), "");
    }

    #[test]
    fn test_empty_mapping_is_identity() {
        let engine = RedactionEngine::new(&NameMapping::default()).unwrap();
        let text = "Tim's kite flew over Timothy.";
        assert_eq!(engine.anonymize(text), text);
        assert_eq!(anonymize(text, &NameMapping::default()), text);
    }

    #[test]
    fn test_anonymize_note_both_shapes() {
        let engine = RedactionEngine::new(&mapping(&[(0, "Mia")])).unwrap();

        let plain = engine.anonymize_note(&ParentNote::Plain("Mia's day".to_string()));
        assert_eq!(plain, ParentNote::Plain("Child_1's day".to_string()));

        let structured = engine.anonymize_note(&ParentNote::Structured {
            background: "Mia was tired".to_string(),
            impulse: "Ask mia".to_string(),
            reflection: "".to_string(),
        });
        assert_eq!(
            structured,
            ParentNote::Structured {
                background: "Child_1 was tired".to_string(),
                impulse: "Ask Child_1".to_string(),
                reflection: "".to_string(),
            }
        );
    }

    #[test]
    fn test_repeated_application_is_stable() {
        let m = mapping(&[(0, "Lian"), (1, "Elli")]);
        let once = anonymize("Lian and Elli's map", &m);
        let twice = anonymize(&once, &m);
        assert_eq!(once, twice);
    }
}
