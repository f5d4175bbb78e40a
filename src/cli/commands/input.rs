//! Shared arguments for commands that read a story request from disk

use crate::core::logger::LogRequest;
use crate::domain::{GeneratedStory, RawInput};
use anyhow::{bail, Context};
use clap::Args;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Input files for one story request
#[derive(Args, Debug, Clone)]
pub struct StoryInputArgs {
    /// JSON file with the submitted form (children, mood, settings, ...)
    #[arg(short, long, value_name = "FILE")]
    pub input: PathBuf,

    /// JSON file with the generated story (title, content, moral, parentNote)
    #[arg(short, long, value_name = "FILE")]
    pub story: PathBuf,

    /// Feature flags as an inline JSON object, e.g. '{"beta":true}'
    #[arg(long, value_name = "JSON")]
    pub flags: Option<String>,
}

impl StoryInputArgs {
    /// Read and parse both files plus the flags
    ///
    /// # Errors
    ///
    /// Returns an error if a file cannot be read or parsed, or the flags are
    /// not a JSON object.
    pub fn load_request(&self) -> anyhow::Result<LogRequest> {
        let raw_input: RawInput = read_json(&self.input)?;
        let story: GeneratedStory = read_json(&self.story)?;
        let flags = parse_flags(self.flags.as_deref())?;

        Ok(LogRequest::new(raw_input, story).with_flags(flags))
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("Failed to parse {}", path.display()))
}

fn parse_flags(flags: Option<&str>) -> anyhow::Result<Map<String, Value>> {
    let Some(flags) = flags else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(flags).context("Failed to parse --flags")? {
        Value::Object(map) => Ok(map),
        other => bail!("--flags must be a JSON object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_request() {
        let input = write_temp(r#"{"children":[{"name":"Lian","age":"6"}],"lang":"en"}"#);
        let story = write_temp(r#"{"title":"T","content":"Lian smiled."}"#);

        let args = StoryInputArgs {
            input: input.path().to_path_buf(),
            story: story.path().to_path_buf(),
            flags: Some(r#"{"beta":true}"#.to_string()),
        };

        let request = args.load_request().unwrap();
        assert_eq!(request.raw_input.children.len(), 1);
        assert_eq!(request.raw_input.children[0].age, Some(6));
        assert_eq!(request.story.content, "Lian smiled.");
        assert_eq!(request.flags["beta"], Value::Bool(true));
    }

    #[test]
    fn test_flags_must_be_object() {
        assert!(parse_flags(Some("[1,2]")).is_err());
        assert!(parse_flags(Some("{oops")).is_err());
        assert!(parse_flags(None).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file() {
        let args = StoryInputArgs {
            input: PathBuf::from("does-not-exist-input.json"),
            story: PathBuf::from("does-not-exist-story.json"),
            flags: None,
        };
        let err = args.load_request().unwrap_err();
        assert!(err.to_string().contains("does-not-exist-input.json"));
    }
}
