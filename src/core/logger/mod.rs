//! Best-effort story logging
//!
//! This module wires the anonymization pipeline to a log store and turns
//! every outcome into a `bool`.

pub mod failure;
pub mod request;
pub mod story_logger;

pub use failure::{FailureHook, LogFailure, LogFailureKind};
pub use request::LogRequest;
pub use story_logger::StoryLogger;
