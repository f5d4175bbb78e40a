//! Input to one logging call

use crate::domain::{GeneratedStory, RawInput};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Everything needed to log one generated story
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LogRequest {
    /// The form as submitted by the parent
    pub raw_input: RawInput,

    /// The generator's output
    pub story: GeneratedStory,

    /// Caller feature flags, stored verbatim
    pub flags: Map<String, Value>,
}

impl LogRequest {
    pub fn new(raw_input: RawInput, story: GeneratedStory) -> Self {
        Self {
            raw_input,
            story,
            flags: Map::new(),
        }
    }

    pub fn with_flags(mut self, flags: Map<String, Value>) -> Self {
        self.flags = flags;
        self
    }
}
