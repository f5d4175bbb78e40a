//! Core business logic for Storylog.
//!
//! # Modules
//!
//! - [`logger`] - The best-effort boundary that anonymizes stories and hands
//!   them to the log store
//!
//! # Logging Workflow
//!
//! 1. **Map**: Assign `Child_N` pseudonyms to the declared children
//! 2. **Redact**: Replace names in title, body, moral and parent note
//! 3. **Assemble**: Build the outbound record with structural metadata only
//! 4. **Verify**: Check for declared names outside the mapping
//! 5. **Store**: Hand the record to the configured log store
//!
//! # Example
//!
//! ```rust,no_run
//! use storylog::config::load_config;
//! use storylog::core::logger::{LogRequest, StoryLogger};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("storylog.toml")?;
//! let logger = Arc::new(StoryLogger::from_config(&config).await?);
//!
//! // Fire and forget; the story is shown to the user regardless
//! let _handle = logger.dispatch(LogRequest::default());
//! # Ok(())
//! # }
//! ```

pub mod logger;
