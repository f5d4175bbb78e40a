//! Tracing subscriber for the storylog binary
//!
//! Two sinks share one filter: human-readable events on stderr, and, when
//! `logging.local_enabled` is set, JSON events in rotating files under
//! `logging.local_path`. Stdout is left to command output such as the record
//! printed by `storylog anonymize`.
//!
//! ```no_run
//! use storylog::config::LoggingConfig;
//! use storylog::logging::init_logging;
//!
//! let _guard = init_logging("debug", &LoggingConfig::default()).expect("logger already set");
//! ```

use crate::config::LoggingConfig;
use crate::domain::{Result, StorylogError};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

/// File name prefix for rotated log files
pub const LOG_FILE_PREFIX: &str = "storylog.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps the background file writer alive
///
/// Dropping it flushes buffered file events. Hold it until the process
/// exits.
pub struct LoggingGuard {
    file_guard: Option<WorkerGuard>,
}

impl LoggingGuard {
    /// Whether events are also written to a log file
    pub fn has_file_writer(&self) -> bool {
        self.file_guard.is_some()
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over `level` when it is set. Closed `log_story` spans are
/// emitted so each handoff shows up with its `invocation_id` and timing.
///
/// # Errors
///
/// Fails on an unknown level, when the log directory cannot be created, or
/// when a global subscriber is already installed.
pub fn init_logging(level: &str, config: &LoggingConfig) -> Result<LoggingGuard> {
    let filter = build_filter(parse_log_level(level)?);

    let mut layers = vec![console_layer(filter.clone())];
    let file_guard = if config.local_enabled {
        let (layer, guard) = file_layer(config, filter)?;
        layers.push(layer);
        Some(guard)
    } else {
        None
    };

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .map_err(|e| StorylogError::Configuration(format!("Failed to install logger: {e}")))?;

    tracing::debug!(
        level,
        file_logging = config.local_enabled,
        "Logging initialized"
    );

    Ok(LoggingGuard { file_guard })
}

/// Parse a level name, case-insensitively
///
/// # Errors
///
/// Returns a configuration error for anything other than trace, debug,
/// info, warn or error.
pub fn parse_log_level(level: &str) -> Result<Level> {
    level.trim().parse::<Level>().map_err(|_| {
        StorylogError::Configuration(format!(
            "Invalid log level: {level}. Must be one of: trace, debug, info, warn, error"
        ))
    })
}

fn build_filter(level: Level) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive(level)))
}

fn default_directive(level: Level) -> String {
    format!("storylog={}", level.as_str().to_lowercase())
}

fn console_layer(filter: EnvFilter) -> BoxedLayer {
    tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_filter(filter)
        .boxed()
}

fn file_layer(config: &LoggingConfig, filter: EnvFilter) -> Result<(BoxedLayer, WorkerGuard)> {
    std::fs::create_dir_all(&config.local_path).map_err(|e| {
        StorylogError::Configuration(format!(
            "Failed to create log directory {}: {e}",
            config.local_path
        ))
    })?;

    let appender = RollingFileAppender::new(
        rotation_for(&config.local_rotation),
        &config.local_path,
        LOG_FILE_PREFIX,
    );
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let layer = tracing_subscriber::fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(writer)
        .with_filter(filter)
        .boxed();

    Ok((layer, guard))
}

// Validation only admits "daily" and "hourly".
fn rotation_for(name: &str) -> Rotation {
    match name {
        "hourly" => Rotation::HOURLY,
        _ => Rotation::DAILY,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_log_level() {
        assert_eq!(parse_log_level("trace").unwrap(), Level::TRACE);
        assert_eq!(parse_log_level("Debug").unwrap(), Level::DEBUG);
        assert_eq!(parse_log_level(" WARN ").unwrap(), Level::WARN);
        assert_eq!(parse_log_level("error").unwrap(), Level::ERROR);
    }

    #[test]
    fn test_parse_log_level_rejects_unknown() {
        let err = parse_log_level("verbose").unwrap_err();
        assert!(err.to_string().contains("verbose"));
        assert!(parse_log_level("").is_err());
    }

    #[test]
    fn test_default_directive_targets_this_crate() {
        assert_eq!(default_directive(Level::WARN), "storylog=warn");
        assert_eq!(default_directive(Level::TRACE), "storylog=trace");
    }

    #[test]
    fn test_rotation_for() {
        assert_eq!(rotation_for("hourly"), Rotation::HOURLY);
        assert_eq!(rotation_for("daily"), Rotation::DAILY);
    }

    #[test]
    fn test_file_layer_creates_directory() {
        let dir = TempDir::new().unwrap();
        let config = LoggingConfig {
            local_enabled: true,
            local_path: dir.path().join("nested").to_string_lossy().to_string(),
            local_rotation: "hourly".to_string(),
        };

        let (_layer, _guard) = file_layer(&config, EnvFilter::new("storylog=info")).unwrap();
        assert!(dir.path().join("nested").is_dir());
    }

    #[test]
    fn test_guard_without_file_writer() {
        let guard = LoggingGuard { file_guard: None };
        assert!(!guard.has_file_writer());
    }
}
