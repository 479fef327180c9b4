//! Error types for chatscope.
//!
//! The parsing core never fails: malformed lines are dropped or degraded.
//! Errors only come from the edges, i.e. reading transcripts and writing
//! output.

use std::io;
use std::path::Path;

use thiserror::Error;

/// A specialized [`Result`] type for chatscope operations.
///
/// # Example
///
/// ```rust
/// use chatscope::error::Result;
/// use chatscope::ChatEntry;
///
/// fn load() -> Result<Vec<ChatEntry>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatscopeError>;

/// The error type for all chatscope operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatscopeError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - A streamed line is not valid UTF-8
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Requested output format is unknown or not compiled in.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was requested
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Content is not valid UTF-8.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Where the bytes came from
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatscopeError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatscopeError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatscopeError {
    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatscopeError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates a UTF-8 error naming the offending file.
    pub fn utf8_in(path: &Path, source: std::string::FromUtf8Error) -> Self {
        ChatscopeError::Utf8 {
            context: path.display().to_string(),
            source,
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatscopeError::Io(_))
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatscopeError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a UTF-8 decoding error.
    pub fn is_utf8(&self) -> bool {
        matches!(self, ChatscopeError::Utf8 { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
