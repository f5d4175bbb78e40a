//! Supabase integration
//!
//! This module stores outbound records in a Supabase table over its REST API.

pub mod client;

pub use client::SupabaseLogStore;
