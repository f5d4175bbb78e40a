//! CLI command implementations
//!
//! This module contains all CLI command implementations.

pub mod anonymize;
pub mod init;
pub mod input;
pub mod log;
pub mod validate;
