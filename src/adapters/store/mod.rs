//! Log store abstraction layer
//!
//! This module provides a trait-based abstraction for persisting outbound
//! records, allowing Storylog to write to different backends.

pub mod factory;
pub mod traits;

pub use factory::create_log_store;
pub use traits::LogStore;
