//! Failure reporting for the logging boundary
//!
//! Failures never reach the caller as errors. They are logged and, when a
//! hook is installed, handed to it for counting or alerting.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

/// Where in the handoff a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFailureKind {
    /// Mapping, pattern compilation or record assembly failed
    Assembly,
    /// The leak policy refused a record containing declared names
    PrivacyLeak,
    /// The log store reported an error
    Store,
    /// The background task panicked or was cancelled
    TaskPanicked,
}

/// One failed logging attempt
#[derive(Debug, Clone, Serialize)]
pub struct LogFailure {
    /// Correlates with the `log_story` tracing span
    pub invocation_id: Uuid,
    pub kind: LogFailureKind,
    /// Error text; never contains real names
    pub message: String,
    /// Backend name, when the failure came from a store
    pub store: Option<&'static str>,
    pub timestamp: DateTime<Utc>,
}

impl LogFailure {
    pub fn new(invocation_id: Uuid, kind: LogFailureKind, message: impl Into<String>) -> Self {
        Self {
            invocation_id,
            kind,
            message: message.into(),
            store: None,
            timestamp: Utc::now(),
        }
    }

    pub fn with_store(mut self, store: &'static str) -> Self {
        self.store = Some(store);
        self
    }
}

/// Callback invoked for every failed logging attempt
pub type FailureHook = Arc<dyn Fn(&LogFailure) + Send + Sync>;
