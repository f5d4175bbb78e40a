//! Anonymization module for Storylog
//!
//! This module replaces declared child names with stable pseudonyms before
//! any story text is persisted, and shapes the privacy-safe record that is
//! handed to the log store.
//!
//! # Architecture
//!
//! The pipeline consists of:
//! - **Pattern compiler**: literal, word-bounded, case-insensitive matchers per name
//! - **Mapping**: real name ↔ `Child_N` pseudonym, built per request
//! - **Redaction engine**: longest-first possessive + bare substitution
//! - **Record assembly**: anonymized text plus structural-only metadata
//! - **Verification**: checks the record for declared names outside the mapping
//!
//! Only names the caller declares are redacted; this is not a general PII
//! scrubber.
//!
//! # Usage
//!
//! ```rust
//! use storylog::anonymization::{anonymize, NameMapping};
//! use storylog::domain::ChildProfile;
//!
//! let children = vec![ChildProfile::named("Lian"), ChildProfile::named("Elli")];
//! let mapping = NameMapping::from_children(&children);
//!
//! assert_eq!(
//!     anonymize("Lian found the map. Elli's courage helped.", &mapping),
//!     "Child_1 found the map. Child_2's courage helped."
//! );
//! ```

pub mod config;
pub mod engine;
pub mod mapping;
pub mod pattern;
pub mod record;
pub mod verify;

// Re-export main types
pub use config::AnonymizationConfig;
pub use engine::{anonymize, RedactionEngine, REDACTED_PLACEHOLDER};
pub use mapping::{pseudonym_for, NameEntry, NameMapping, PSEUDONYM_PREFIX};
pub use pattern::{escape_literal, NamePattern};
pub use record::{ChildMeta, OutboundRecord, RecordAssembler, INCIDENT_PLACEHOLDER};
pub use verify::{verify_record, LeakPolicy, PrivacyLeak, PrivacyReport};
