//! Story logger - the best-effort boundary between story generation and
//! the log store
//!
//! Logging a story must never fail the user-facing flow. [`StoryLogger`]
//! therefore reports the outcome as a `bool`, records diagnostics through
//! `tracing`, and forwards failures to an optional hook.

use crate::adapters::store::{create_log_store, LogStore};
use crate::anonymization::{
    verify_record, LeakPolicy, NameMapping, OutboundRecord, RecordAssembler, RedactionEngine,
};
use crate::config::StorylogConfig;
use crate::core::logger::failure::{FailureHook, LogFailure, LogFailureKind};
use crate::core::logger::request::LogRequest;
use crate::domain::{Result, StorylogError};
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

/// Anonymizes generated stories and hands them to the log store
pub struct StoryLogger {
    store: Option<Arc<dyn LogStore + Send + Sync>>,
    engine_version: String,
    leak_policy: LeakPolicy,
    on_failure: Option<FailureHook>,
}

impl StoryLogger {
    /// Create a logger writing to `store`
    ///
    /// With `None`, every call to [`log_story`](Self::log_story) returns `false`.
    pub fn new(
        store: Option<Arc<dyn LogStore + Send + Sync>>,
        engine_version: impl Into<String>,
    ) -> Self {
        Self {
            store,
            engine_version: engine_version.into(),
            leak_policy: LeakPolicy::default(),
            on_failure: None,
        }
    }

    /// Create a logger from configuration, including its log store
    ///
    /// # Errors
    ///
    /// Returns an error if the configured log store cannot be created.
    pub async fn from_config(config: &StorylogConfig) -> Result<Self> {
        let store = create_log_store(config).await?;
        Ok(Self::new(store, config.application.engine_version.clone())
            .with_leak_policy(config.anonymization.leak_policy))
    }

    pub fn with_leak_policy(mut self, leak_policy: LeakPolicy) -> Self {
        self.leak_policy = leak_policy;
        self
    }

    /// Install a callback for failed logging attempts
    pub fn with_failure_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&LogFailure) + Send + Sync + 'static,
    {
        self.on_failure = Some(Arc::new(hook));
        self
    }

    pub fn has_store(&self) -> bool {
        self.store.is_some()
    }

    pub fn engine_version(&self) -> &str {
        &self.engine_version
    }

    /// Build and verify the outbound record without storing it
    ///
    /// # Errors
    ///
    /// Returns an error if a matcher cannot be built, serialization fails, or
    /// the leak policy is `block` and the record still contains a declared
    /// name outside its mapping.
    pub fn prepare(&self, request: &LogRequest) -> Result<OutboundRecord> {
        let mapping = NameMapping::from_children(&request.raw_input.children);
        let engine = RedactionEngine::new(&mapping)?;

        let record = RecordAssembler::new(self.engine_version.clone())
            .with_flags(request.flags.clone())
            .assemble_with(&engine, &request.raw_input, &request.story, &mapping)?;

        let report = verify_record(&record, &mapping)?;
        if !report.is_clean() {
            let fields = report.field_paths();
            tracing::warn!(
                leaks = report.leaks.len(),
                fields = ?fields,
                policy = ?self.leak_policy,
                "Outbound record contains declared names outside the mapping"
            );

            if self.leak_policy == LeakPolicy::Block {
                return Err(StorylogError::Privacy(format!(
                    "declared names found in {}",
                    fields.join(", ")
                )));
            }
        }

        Ok(record)
    }

    /// Anonymize the story and write it to the log store
    ///
    /// Returns `true` only if the store confirmed the write. Errors are
    /// logged and reported to the failure hook, never returned.
    pub async fn log_story(&self, request: &LogRequest) -> bool {
        self.log_story_with_id(Uuid::new_v4(), request).await
    }

    async fn log_story_with_id(&self, invocation_id: Uuid, request: &LogRequest) -> bool {
        let span = tracing::info_span!("log_story", %invocation_id);

        async move {
            let Some(store) = self.store.as_ref() else {
                tracing::warn!("No log store configured; story log skipped");
                return false;
            };

            let start = Instant::now();

            let record = match self.prepare(request) {
                Ok(record) => record,
                Err(e) => {
                    let kind = match e {
                        StorylogError::Privacy(_) => LogFailureKind::PrivacyLeak,
                        _ => LogFailureKind::Assembly,
                    };
                    tracing::error!(error = %e, ?kind, "Failed to prepare story log record");
                    self.report(LogFailure::new(invocation_id, kind, e.to_string()));
                    return false;
                }
            };

            match store.insert(&record).await {
                Ok(()) => {
                    crate::log_handoff_complete!(store.name(), &record, start.elapsed());
                    true
                }
                Err(e) => {
                    tracing::error!(
                        store = store.name(),
                        error = %e,
                        duration_ms = start.elapsed().as_millis() as u64,
                        "Failed to store story log"
                    );
                    self.report(
                        LogFailure::new(invocation_id, LogFailureKind::Store, e.to_string())
                            .with_store(store.name()),
                    );
                    false
                }
            }
        }
        .instrument(span)
        .await
    }

    /// Log in a background task without blocking the caller
    ///
    /// The returned handle resolves to the same `bool` as
    /// [`log_story`](Self::log_story); callers may drop it. A panic inside
    /// the task is caught, logged, reported to the hook and yields `false`.
    pub fn dispatch(self: &Arc<Self>, request: LogRequest) -> JoinHandle<bool> {
        self.dispatch_with_id(Uuid::new_v4(), request)
    }

    fn dispatch_with_id(
        self: &Arc<Self>,
        invocation_id: Uuid,
        request: LogRequest,
    ) -> JoinHandle<bool> {
        let logger = Arc::clone(self);
        let task =
            tokio::spawn(async move { logger.log_story_with_id(invocation_id, &request).await });

        let supervisor = Arc::clone(self);
        tokio::spawn(async move {
            match task.await {
                Ok(stored) => stored,
                Err(e) => {
                    tracing::error!(
                        %invocation_id,
                        error = %e,
                        panicked = e.is_panic(),
                        "Story log task did not complete"
                    );
                    supervisor.report(LogFailure::new(
                        invocation_id,
                        LogFailureKind::TaskPanicked,
                        e.to_string(),
                    ));
                    false
                }
            }
        })
    }

    fn report(&self, failure: LogFailure) {
        if let Some(hook) = &self.on_failure {
            hook(&failure);
        }
    }
}
