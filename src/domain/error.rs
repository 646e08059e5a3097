//! Error types for the Bookshelf plugin.
//!
//! [`FetchFailure`] is the only failure the list engine itself recognises; it
//! is folded into `ViewState::Error` by the fetch controller and never
//! returned to callers. [`BookshelfError`] covers what the plugin runs into
//! outside the engine: theme files, the trace output directory, and
//! configuration values.

use thiserror::Error;

/// Why a catalog read did not produce records.
///
/// The message shown to the user is fixed; these variants exist so the full
/// diagnostic can be logged for developers.
///
/// # Examples
///
/// ```
/// use bookshelf::domain::FetchFailure;
///
/// let failure = FetchFailure::Status { status: 503, body: "unavailable".into() };
/// assert_eq!(failure.to_string(), "service responded with HTTP 503: unavailable");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchFailure {
    /// The request could not be issued at all (e.g. web access denied).
    #[error("catalog service unavailable: {0}")]
    Unavailable(String),

    /// The service answered with a non-success status code. Transport errors
    /// reported by the host also surface here.
    #[error("service responded with HTTP {status}: {body}")]
    Status {
        status: u16,
        /// Response body, truncated for logging.
        body: String,
    },

    /// The response body is not a list of book records.
    #[error("malformed catalog payload: {0}")]
    Malformed(String),
}

/// The main error type for Bookshelf plugin operations.
#[derive(Debug, Error)]
pub enum BookshelfError {
    /// Filesystem or I/O operation failed, e.g. creating the trace directory.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme file could not be read or parsed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Configuration value is invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Bookshelf operations.
pub type Result<T> = std::result::Result<T, BookshelfError>;
