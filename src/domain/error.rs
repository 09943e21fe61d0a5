//! Error types for the termfolio plugin.
//!
//! This module defines the centralized error type [`PortfolioError`] and a type alias
//! [`Result`] used throughout the crate. None of these errors are fatal to the plugin:
//! callers log them and fall back to defaults or in-memory state.

use thiserror::Error;

/// The main error type for termfolio operations.
///
/// # Examples
///
/// ```
/// use termfolio::PortfolioError;
///
/// fn read_preferences() -> Result<(), PortfolioError> {
///     Err(PortfolioError::Storage("preference file is locked".to_string()))
/// }
///
/// assert!(read_preferences().is_err());
/// ```
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Reading or writing the preference store failed.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A palette could not be loaded or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The portfolio content document could not be loaded or is incomplete.
    #[error("Content error: {0}")]
    Content(String),

    /// Configuration is invalid, or a component was built with a value that
    /// violates its preconditions (for example a rotator with no texts).
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for termfolio operations.
pub type Result<T> = std::result::Result<T, PortfolioError>;
