//! PostgreSQL database integration
//!
//! This module stores outbound records as JSONB rows in PostgreSQL.

pub mod adapter;
pub mod client;

pub use adapter::PostgresLogStore;
pub use client::PostgreSQLClient;
