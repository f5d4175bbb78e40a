//! Domain models and types for Storylog.
//!
//! # Overview
//!
//! The domain layer provides:
//! - **Caller input** ([`RawInput`], [`ChildProfile`])
//! - **Generated content** ([`GeneratedStory`], [`ParentNote`])
//! - **Error types** ([`StorylogError`], [`LogStoreError`])
//! - **Result type alias** ([`Result`])
//!
//! # Error Handling
//!
//! All fallible library operations return [`Result<T, StorylogError>`]:
//!
//! ```rust,no_run
//! use storylog::domain::Result;
//!
//! fn example() -> Result<()> {
//!     let config = storylog::config::load_config("storylog.toml")?;
//!     Ok(())
//! }
//! ```

pub mod errors;
pub mod input;
pub mod result;
pub mod story;

pub use errors::{LogStoreError, StorylogError};
pub use input::{ChildProfile, RawInput};
pub use result::Result;
pub use story::{GeneratedStory, ParentNote};
