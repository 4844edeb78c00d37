//! Error types for the zofi launcher.
//!
//! This module defines the crate-wide error type [`ZofiError`] and the [`Result`]
//! alias used by every fallible operation. Errors are implemented with the
//! `thiserror` crate.
//!
//! None of the session operations (typing, deleting, navigating) can fail; the
//! errors here come from the surrounding concerns: plugin configuration, theme
//! files, the application catalog, and launching the selected entry.

use thiserror::Error;

/// The main error type for zofi operations.
///
/// # Examples
///
/// ```
/// use zofi::ZofiError;
///
/// fn parse_mode(raw: &str) -> Result<(), ZofiError> {
///     Err(ZofiError::Config(format!("invalid mode \"{raw}\"")))
/// }
///
/// assert!(parse_mode("bogus").is_err());
/// ```
#[derive(Debug, Error)]
pub enum ZofiError {
    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration value is malformed in a way that cannot fall back to a
    /// default.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A theme could not be loaded or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// The application catalog is not valid TOML or has the wrong shape.
    #[error("Catalog error: {0}")]
    Catalog(#[from] toml::de::Error),

    /// The selected entry has nothing that can be executed.
    #[error("Launch error: {0}")]
    Launch(String),
}

/// A specialized `Result` type for zofi operations.
pub type Result<T> = std::result::Result<T, ZofiError>;
