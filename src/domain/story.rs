//! Generated story content
//!
//! The shape returned by the content generator. Every text field here may
//! contain real child names and must pass through the redaction engine
//! before it is stored.

use crate::domain::input::null_as_default;
use serde::{Deserialize, Serialize};

/// A generated story bundle
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GeneratedStory {
    /// Story title
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,

    /// Story body
    #[serde(deserialize_with = "null_as_default")]
    pub content: String,

    /// Moral of the story
    #[serde(deserialize_with = "null_as_default")]
    pub moral: String,

    /// Optional note addressed to the parent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_note: Option<ParentNote>,
}

/// Note addressed to the parent
///
/// The generator returns either a single string or a structured object;
/// both shapes round-trip through serde unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParentNote {
    /// Plain text note
    Plain(String),

    /// Structured note
    Structured {
        #[serde(default, deserialize_with = "null_as_default")]
        background: String,
        #[serde(default, deserialize_with = "null_as_default")]
        impulse: String,
        #[serde(default, deserialize_with = "null_as_default")]
        reflection: String,
    },
}

impl ParentNote {
    /// Apply `f` to every text slot, keeping the shape
    pub fn map_text<F>(&self, mut f: F) -> ParentNote
    where
        F: FnMut(&str) -> String,
    {
        match self {
            ParentNote::Plain(text) => ParentNote::Plain(f(text)),
            ParentNote::Structured {
                background,
                impulse,
                reflection,
            } => ParentNote::Structured {
                background: f(background),
                impulse: f(impulse),
                reflection: f(reflection),
            },
        }
    }

    /// Whether the generator sent an empty string instead of a note
    pub fn is_empty(&self) -> bool {
        matches!(self, ParentNote::Plain(text) if text.is_empty())
    }

    /// Iterate over the text slots
    pub fn texts(&self) -> Vec<&str> {
        match self {
            ParentNote::Plain(text) => vec![text.as_str()],
            ParentNote::Structured {
                background,
                impulse,
                reflection,
            } => vec![background.as_str(), impulse.as_str(), reflection.as_str()],
        }
    }
}
