//! Result type alias for seedpack
//!
//! This module provides a convenient Result type alias that uses SeedError
//! as the error type.

use super::errors::SeedError;

/// Result type alias for seedpack operations
///
/// # Examples
///
/// ```
/// use seedpack::domain::result::Result;
/// use seedpack::domain::errors::SeedError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(SeedError::Parse("unexpected end of input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, SeedError>;
