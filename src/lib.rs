// Storylog - Anonymized logging for generated bedtime stories
// Copyright (c) 2025 Storylog Contributors
// Licensed under the MIT License

//! # Storylog - anonymized story logging
//!
//! Storylog takes a generated children's story together with the form the
//! parent submitted, replaces every declared child name with a stable
//! pseudonym (`Child_1`, `Child_2`, ...), and hands a privacy-safe record to
//! a log store.
//!
//! ## Overview
//!
//! This library provides:
//! - **Pattern compilation**: literal, word-bounded, case-insensitive name matchers
//! - **Redaction**: longest-name-first substitution, possessives included
//! - **Record assembly**: anonymized text plus structural metadata only
//! - **Best-effort handoff**: storing never fails the caller; it returns `bool`
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - The logging boundary ([`core::logger::StoryLogger`])
//! - [`anonymization`] - Mapping, redaction, record assembly and verification
//! - [`adapters`] - Log stores (Supabase, PostgreSQL, JSON Lines, memory)
//! - [`domain`] - Input and story types, errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging and observability
//!
//! ## Quick Start
//!
//! ```rust
//! use storylog::anonymization::{anonymize, NameMapping};
//! use storylog::domain::ChildProfile;
//!
//! let children = vec![ChildProfile::named("Tim"), ChildProfile::named("Timothy")];
//! let mapping = NameMapping::from_children(&children);
//!
//! assert_eq!(
//!     anonymize("Timothy and Tim's dog", &mapping),
//!     "Child_2 and Child_1's dog"
//! );
//! ```
//!
//! ## Logging a Story
//!
//! ```rust,no_run
//! use storylog::adapters::MemoryLogStore;
//! use storylog::core::logger::{LogRequest, StoryLogger};
//! use std::sync::Arc;
//!
//! # async fn example(request: LogRequest) {
//! let store = Arc::new(MemoryLogStore::new());
//! let logger = StoryLogger::new(Some(store.clone()), "1.0");
//!
//! if !logger.log_story(&request).await {
//!     // The story is still shown; only the log was lost
//! }
//! # }
//! ```
//!
//! ## Error Handling
//!
//! The library uses [`domain::StorylogError`] for all errors. The logging
//! boundary converts them into a `false` result plus diagnostics.

pub mod adapters;
pub mod anonymization;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
