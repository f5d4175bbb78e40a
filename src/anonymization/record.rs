//! Outbound log record assembly
//!
//! Builds the single row handed to the log store. The privacy policy is
//! enforced here:
//!
//! - the day incident is replaced by a fixed placeholder plus its length
//! - child descriptions and preferences are dropped, only flags remain
//! - every generated text field is stored in anonymized form only
//! - story settings chosen by the user pass through unchanged
//!
//! Structural metrics (incident length) are computed from the original
//! input; metrics over generated text are computed from its anonymized form.

use crate::anonymization::{
    engine::RedactionEngine,
    mapping::{pseudonym_for, NameMapping},
};
use crate::domain::{ChildProfile, GeneratedStory, ParentNote, RawInput, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Placeholder stored instead of the day incident text
pub const INCIDENT_PLACEHOLDER: &str = "user_context_redacted";

/// Value stored for an unset story setting
pub const UNSET_SETTING: &str = "none";

/// Non-identifying metadata for one child
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildMeta {
    /// Pseudonym label for this position
    pub id_label: String,
    /// Age in years
    pub age: Option<u8>,
    /// Gender code
    pub gender: Option<String>,
    /// Always `true`; the description is never stored
    pub description_redacted: bool,
    /// Always `true`; the preferences are never stored
    pub preferences_redacted: bool,
}

impl ChildMeta {
    fn from_profile(index: usize, child: &ChildProfile) -> Self {
        Self {
            id_label: pseudonym_for(index),
            age: child.age,
            gender: child.gender.clone(),
            description_redacted: true,
            preferences_redacted: true,
        }
    }
}

/// User-chosen story settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorySettings {
    pub world: String,
    pub sidekicks: String,
    pub action: String,
}

impl StorySettings {
    fn from_input(raw: &RawInput) -> Self {
        Self {
            world: setting_or_none(&raw.world),
            sidekicks: setting_or_none(&raw.sidekicks),
            action: setting_or_none(&raw.story_action),
        }
    }
}

/// Sanitized copy of the form input
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SanitizedRawInput {
    pub mood: String,
    pub goal: String,
    pub settings: StorySettings,
    pub children_meta: Vec<ChildMeta>,
    pub lang: String,
}

/// Privacy-safe record sent to the log store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundRecord {
    // Metadata
    pub timestamp: DateTime<Utc>,
    pub engine_version: String,
    pub lang: String,

    // Story settings
    pub story_length: String,
    pub story_goal: String,
    pub world: String,
    pub sidekicks: String,
    pub action: String,

    pub children: Vec<ChildMeta>,

    // Sanitized day context
    pub day_incident_short: String,
    pub day_incident_length: usize,

    // Anonymized story outputs
    pub story_title: String,
    pub story_moral: String,
    pub parent_note: Option<ParentNote>,
    pub story_word_count: usize,
    pub has_parent_note: bool,
    pub moral_length: usize,

    pub flags: Map<String, Value>,

    /// Audited exception to "no names": allows an authorized reverse lookup
    pub mapping: NameMapping,

    pub raw_input: SanitizedRawInput,

    /// Anonymized body followed by the serialized anonymized parent note
    pub raw_story: String,
}

impl OutboundRecord {
    /// Serialize to a JSON value
    pub fn to_json(&self) -> Result<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Builds [`OutboundRecord`]s
///
/// # Examples
///
/// ```
/// use storylog::anonymization::{NameMapping, RecordAssembler};
/// use storylog::domain::{ChildProfile, GeneratedStory, RawInput};
///
/// # fn example() -> storylog::domain::Result<()> {
/// let raw = RawInput {
///     children: vec![ChildProfile::named("Lian")],
///     ..RawInput::default()
/// };
/// let story = GeneratedStory {
///     content: "Lian found the map.".to_string(),
///     ..GeneratedStory::default()
/// };
///
/// let mapping = NameMapping::from_children(&raw.children);
/// let record = RecordAssembler::new("1.0").assemble(&raw, &story, &mapping)?;
/// assert_eq!(record.raw_story, "Child_1 found the map.\n\n");
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct RecordAssembler {
    engine_version: String,
    flags: Map<String, Value>,
    timestamp: Option<DateTime<Utc>>,
}

impl RecordAssembler {
    /// Create an assembler stamping records with `engine_version`
    pub fn new(engine_version: impl Into<String>) -> Self {
        Self {
            engine_version: engine_version.into(),
            flags: Map::new(),
            timestamp: None,
        }
    }

    /// Attach caller feature flags
    pub fn with_flags(mut self, flags: Map<String, Value>) -> Self {
        self.flags = flags;
        self
    }

    /// Use a fixed timestamp instead of the current time
    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Assemble the record for one story request
    ///
    /// # Errors
    ///
    /// Returns an error if the mapping's names cannot be compiled or the
    /// parent note cannot be serialized.
    pub fn assemble(
        &self,
        raw: &RawInput,
        story: &GeneratedStory,
        mapping: &NameMapping,
    ) -> Result<OutboundRecord> {
        let engine = RedactionEngine::new(mapping)?;
        self.assemble_with(&engine, raw, story, mapping)
    }

    /// Assemble using an already compiled engine for `mapping`
    pub fn assemble_with(
        &self,
        engine: &RedactionEngine,
        raw: &RawInput,
        story: &GeneratedStory,
        mapping: &NameMapping,
    ) -> Result<OutboundRecord> {
        let children: Vec<ChildMeta> = raw
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| ChildMeta::from_profile(index, child))
            .collect();

        let title = engine.anonymize(&story.title);
        let content = engine.anonymize(&story.content);
        let moral = engine.anonymize(&story.moral);
        // An empty-string note counts as no note.
        let parent_note = story
            .parent_note
            .as_ref()
            .filter(|note| !note.is_empty())
            .map(|note| engine.anonymize_note(note));

        let note_json = match &parent_note {
            Some(note) => serde_json::to_string(note)?,
            None => String::new(),
        };
        let raw_story = format!("{content}\n\n{note_json}");

        let settings = StorySettings::from_input(raw);

        Ok(OutboundRecord {
            timestamp: self.timestamp.unwrap_or_else(Utc::now),
            engine_version: self.engine_version.clone(),
            lang: raw.lang.clone(),
            story_length: raw.story_length.clone(),
            story_goal: raw.story_goal.clone(),
            world: settings.world.clone(),
            sidekicks: settings.sidekicks.clone(),
            action: settings.action.clone(),
            children: children.clone(),
            day_incident_short: INCIDENT_PLACEHOLDER.to_string(),
            day_incident_length: raw.day_incident.chars().count(),
            story_word_count: word_count(&content),
            has_parent_note: parent_note.is_some(),
            moral_length: moral.chars().count(),
            story_title: title,
            story_moral: moral,
            parent_note,
            flags: self.flags.clone(),
            mapping: mapping.clone(),
            raw_input: SanitizedRawInput {
                mood: raw.day_mood.clone(),
                goal: raw.story_goal.clone(),
                settings,
                children_meta: children,
                lang: raw.lang.clone(),
            },
            raw_story,
        })
    }
}

/// Word count over whitespace runs; blank text has zero words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

fn setting_or_none(value: &str) -> String {
    if value.is_empty() {
        UNSET_SETTING.to_string()
    } else {
        value.to_string()
    }
}
