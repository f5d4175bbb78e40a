//! Logging and observability
//!
//! This module provides structured logging with support for:
//! - Console output on stderr
//! - JSON log files with daily or hourly rotation
//! - Configurable log levels, overridable through `RUST_LOG`
//!
//! Log events never carry child names or story text; only counts, sizes,
//! pseudonyms and hashes are recorded.
//!
//! # Example
//!
//! ```no_run
//! use storylog::logging::init_logging;
//! use storylog::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

// Re-export commonly used items
pub use structured::{init_logging, parse_log_level, LoggingGuard};

/// Log a successful log store handoff
///
/// Records only structural fields of the outbound record.
///
/// # Example
///
/// ```no_run
/// use storylog::log_handoff_complete;
/// use storylog::anonymization::{NameMapping, RecordAssembler};
/// use storylog::domain::{GeneratedStory, RawInput};
/// use std::time::Duration;
///
/// let mapping = NameMapping::default();
/// let record = RecordAssembler::new("1.0")
///     .assemble(&RawInput::default(), &GeneratedStory::default(), &mapping)
///     .unwrap();
/// log_handoff_complete!("supabase", &record, Duration::from_millis(80));
/// ```
#[macro_export]
macro_rules! log_handoff_complete {
    ($store:expr, $record:expr, $duration:expr) => {
        tracing::info!(
            store = $store,
            children = $record.children.len(),
            story_word_count = $record.story_word_count,
            has_parent_note = $record.has_parent_note,
            mapping_size = $record.mapping.len(),
            duration_ms = $duration.as_millis() as u64,
            "Story log stored"
        );
    };
}

/// Log an error with context
///
/// # Example
///
/// ```no_run
/// use storylog::log_error_with_context;
/// use storylog::domain::StorylogError;
///
/// let error = StorylogError::Configuration("Invalid config".to_string());
/// log_error_with_context!(&error, "Failed to load configuration");
/// ```
#[macro_export]
macro_rules! log_error_with_context {
    ($error:expr, $context:expr) => {
        tracing::error!(
            error = %$error,
            context = $context,
            "Error occurred"
        );
    };
}
