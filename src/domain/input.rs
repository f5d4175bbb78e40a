//! Caller-supplied story request
//!
//! These types mirror the form the parent fills in before a story is
//! generated. Field names follow the caller's camelCase JSON.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// One child profile from the story form
///
/// `description` and `preferences` are content-sensitive and never leave
/// this type; only `age` and `gender` are forwarded to the log store.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ChildProfile {
    /// Child's real name, as typed
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,

    /// Age in years; the form sends either a number or a string
    #[serde(deserialize_with = "deserialize_age")]
    pub age: Option<u8>,

    /// Gender code (e.g. "m", "f")
    #[serde(deserialize_with = "deserialize_non_empty")]
    pub gender: Option<String>,

    /// Free-text description of the child
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,

    /// Free-text preferences of the child
    #[serde(deserialize_with = "null_as_default")]
    pub preferences: String,
}

impl ChildProfile {
    /// Create a profile with only a name set
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the age
    pub fn with_age(mut self, age: u8) -> Self {
        self.age = Some(age);
        self
    }

    /// Set the gender
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the preferences
    pub fn with_preferences(mut self, preferences: impl Into<String>) -> Self {
        self.preferences = preferences.into();
        self
    }

    /// Trimmed name, or `None` when blank
    pub fn trimmed_name(&self) -> Option<&str> {
        let trimmed = self.name.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

// Names and free text must not end up in tracing output.
impl fmt::Debug for ChildProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChildProfile")
            .field("name", &"[REDACTED]")
            .field("age", &self.age)
            .field("gender", &self.gender)
            .field("description_len", &self.description.chars().count())
            .field("preferences_len", &self.preferences.chars().count())
            .finish()
    }
}

/// Raw form input for one story request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawInput {
    /// Children taking part in the story, in form order
    #[serde(deserialize_with = "null_as_default")]
    pub children: Vec<ChildProfile>,

    /// Mood of the day (enumeration value chosen in the form)
    #[serde(deserialize_with = "null_as_default")]
    pub day_mood: String,

    /// What happened today; content-sensitive, never stored verbatim
    #[serde(deserialize_with = "null_as_default")]
    pub day_incident: String,

    /// Goal of the story (enumeration value chosen in the form)
    #[serde(deserialize_with = "null_as_default")]
    pub story_goal: String,

    /// Story world chosen by the user
    #[serde(deserialize_with = "null_as_default")]
    pub world: String,

    /// Sidekicks chosen by the user
    #[serde(deserialize_with = "null_as_default")]
    pub sidekicks: String,

    /// Story action chosen by the user
    #[serde(deserialize_with = "null_as_default")]
    pub story_action: String,

    /// Length selector ("short", "medium", "long")
    #[serde(deserialize_with = "null_as_default")]
    pub story_length: String,

    /// UI language tag
    #[serde(deserialize_with = "null_as_default")]
    pub lang: String,
}

fn deserialize_age<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum AgeRepr {
        Number(f64),
        Text(String),
    }

    let age = match Option::<AgeRepr>::deserialize(deserializer)? {
        Some(AgeRepr::Number(n)) if n.is_finite() && (0.0..=255.0).contains(&n) => Some(n as u8),
        Some(AgeRepr::Text(s)) => s.trim().parse::<u8>().ok(),
        _ => None,
    };
    Ok(age.filter(|a| *a > 0))
}

/// `null` is read as the field's default, like a missing key
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_non_empty<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}
