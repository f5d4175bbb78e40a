//! Domain error types
//!
//! This module defines the error hierarchy for Storylog.
//! All errors are domain-specific and don't expose third-party types.

use thiserror::Error;

/// Main Storylog error type
///
/// This is the primary error type used throughout the library.
/// The CLI wraps it in `anyhow` at the process boundary.
#[derive(Debug, Error)]
pub enum StorylogError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A name could not be compiled into a matcher, or matching failed
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// Log store errors
    #[error("Log store error: {0}")]
    Store(#[from] LogStoreError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// An outbound record still contains a declared real name
    #[error("Privacy violation: {0}")]
    Privacy(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

/// Log store errors
///
/// Errors reported by the persistence collaborator. These errors don't
/// expose the HTTP or database client types.
#[derive(Debug, Error)]
pub enum LogStoreError {
    /// Failed to reach the store
    #[error("Failed to connect to log store: {0}")]
    ConnectionFailed(String),

    /// The write itself failed
    #[error("Failed to insert log record: {0}")]
    InsertFailed(String),

    /// The store answered with a non-success status
    #[error("Log store rejected record: {status} - {message}")]
    Rejected { status: u16, message: String },

    /// Timeout
    #[error("Log store request timeout: {0}")]
    Timeout(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for StorylogError {
    fn from(err: std::io::Error) -> Self {
        StorylogError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for StorylogError {
    fn from(err: serde_json::Error) -> Self {
        StorylogError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for StorylogError {
    fn from(err: toml::de::Error) -> Self {
        StorylogError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from fancy-regex errors
impl From<fancy_regex::Error> for StorylogError {
    fn from(err: fancy_regex::Error) -> Self {
        StorylogError::Pattern(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storylog_error_display() {
        let err = StorylogError::Configuration("Invalid config".to_string());
        assert_eq!(err.to_string(), "Configuration error: Invalid config");
    }

    #[test]
    fn test_store_error_conversion() {
        let store_err = LogStoreError::Rejected {
            status: 401,
            message: "Invalid API key".to_string(),
        };
        let err: StorylogError = store_err.into();
        assert!(matches!(err, StorylogError::Store(_)));
        assert_eq!(
            err.to_string(),
            "Log store error: Log store rejected record: 401 - Invalid API key"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: StorylogError = io_err.into();
        assert!(matches!(err, StorylogError::Io(_)));
    }

    #[test]
    fn test_serde_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let err: StorylogError = json_err.into();
        assert!(matches!(err, StorylogError::Serialization(_)));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_err = toml::from_str::<toml::Value>("invalid = toml = syntax").unwrap_err();
        let err: StorylogError = toml_err.into();
        assert!(matches!(err, StorylogError::Configuration(_)));
        assert!(err.to_string().contains("TOML parse error"));
    }

    #[test]
    fn test_errors_implement_std_error() {
        let err = StorylogError::Validation("Test error".to_string());
        let _: &dyn std::error::Error = &err;
        let err = LogStoreError::Timeout("10s".to_string());
        let _: &dyn std::error::Error = &err;
    }
}
