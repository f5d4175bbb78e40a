//! External system integrations for Storylog.
//!
//! This module provides the log store backends that receive anonymized
//! story records:
//!
//! - [`store`] - Log store abstraction (trait-based) and factory
//! - [`supabase`] - Supabase REST implementation
//! - [`postgresql`] - PostgreSQL implementation
//! - [`jsonl`] - Local JSON Lines file
//! - [`memory`] - In-process store for dry runs and tests
//!
//! # Design Pattern
//!
//! Adapters isolate external dependencies behind the [`LogStore`] trait so
//! that the logging boundary can be tested with in-memory or failing stores.
//!
//! ```rust,no_run
//! use storylog::adapters::create_log_store;
//! use storylog::config::load_config;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("storylog.toml")?;
//! match create_log_store(&config).await? {
//!     Some(store) => println!("Writing to {}", store.name()),
//!     None => println!("Log store disabled"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod jsonl;
pub mod memory;
pub mod postgresql;
pub mod store;
pub mod supabase;

pub use jsonl::JsonlLogStore;
pub use memory::MemoryLogStore;
pub use postgresql::PostgresLogStore;
pub use store::{create_log_store, LogStore};
pub use supabase::SupabaseLogStore;
