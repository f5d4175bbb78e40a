//! Result type alias for Storylog

use super::errors::StorylogError;

/// Result type alias for Storylog operations
///
/// # Examples
///
/// ```
/// use storylog::domain::result::Result;
/// use storylog::domain::errors::StorylogError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(StorylogError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, StorylogError>;
