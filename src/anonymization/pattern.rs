//! Name pattern compiler
//!
//! Turns a literal name into a pair of case-insensitive, whole-token
//! matchers. Word boundaries are built explicitly with look-around rather
//! than `\b`, so names that start or end with punctuation (`A.J.`) match
//! as a unit.

use crate::domain::{Result, StorylogError};
use fancy_regex::{Captures, Regex};
use std::borrow::Cow;

/// Possessive suffix appended to names and pseudonyms
pub const POSSESSIVE_SUFFIX: &str = "'s";

const LEFT_BOUNDARY: &str = r"(?<!\w)";
const RIGHT_BOUNDARY: &str = r"(?!\w)";

/// Escape every pattern metacharacter in `name`
///
/// The result matches `name` literally.
pub fn escape_literal(name: &str) -> Cow<'_, str> {
    fancy_regex::escape(name)
}

/// Compiled matchers for one real name
#[derive(Debug, Clone)]
pub struct NamePattern {
    bare: Regex,
    possessive: Regex,
}

impl NamePattern {
    /// Compile matchers for `name`
    ///
    /// # Errors
    ///
    /// Returns [`StorylogError::Pattern`] if `name` is blank or the
    /// resulting pattern does not compile.
    pub fn compile(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorylogError::Pattern(
                "cannot compile a pattern for an empty name".to_string(),
            ));
        }

        let literal = escape_literal(name);
        let bare = Regex::new(&format!("(?i){LEFT_BOUNDARY}{literal}{RIGHT_BOUNDARY}"))?;
        let possessive = Regex::new(&format!(
            "(?i){LEFT_BOUNDARY}{literal}{}{RIGHT_BOUNDARY}",
            escape_literal(POSSESSIVE_SUFFIX)
        ))?;

        Ok(Self { bare, possessive })
    }

    /// Whether `text` contains the name as a whole token
    pub fn is_match(&self, text: &str) -> Result<bool> {
        Ok(self.bare.is_match(text)?)
    }

    /// Replace every possessive then every bare occurrence with `pseudonym`
    pub fn replace_all(&self, text: &str, pseudonym: &str) -> Result<String> {
        let possessive_replacement = format!("{pseudonym}{POSSESSIVE_SUFFIX}");
        let possessive_replacement = possessive_replacement.as_str();

        // Closure replacers keep `$` in pseudonyms from being expanded.
        let first = self
            .possessive
            .try_replacen(text, 0, move |_: &Captures<'_>| possessive_replacement)?;
        let second = self
            .bare
            .try_replacen(&first, 0, move |_: &Captures<'_>| pseudonym)?;
        Ok(second.into_owned())
    }
}
