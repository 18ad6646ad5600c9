//! Result type alias for dentaldesk
//!
//! This module provides a convenient Result type alias that uses DeskError
//! as the error type.

use super::errors::DeskError;

/// Result type alias for dentaldesk operations
///
/// # Examples
///
/// ```
/// use dentaldesk::domain::result::Result;
/// use dentaldesk::domain::errors::DeskError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(DeskError::Validation("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, DeskError>;
