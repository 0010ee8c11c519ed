//! Unified error types for chatviz.
//!
//! This module provides a single [`ChatvizError`] enum that covers every
//! failure in the library: reading the export, recognising its format,
//! building reports and writing them out.
//!
//! - **Library users** get typed errors they can match on
//! - **Application users** get clear, actionable error messages
//! - **Developers** get source error chains for debugging

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for chatviz operations.
///
/// # Example
///
/// ```rust
/// use chatviz::error::Result;
/// use chatviz::ChatLog;
///
/// fn load() -> Result<ChatLog> {
///     Ok(ChatLog::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatvizError>;

/// The error type for all chatviz operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatvizError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - The output directory is not writable
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Failed to parse part of the input file.
    ///
    /// Contains the format being parsed, the underlying parse error,
    /// and optionally the file path.
    #[error("Failed to parse {format} export{}: {source}", path.as_ref().map(|p| format!(" (file: {})", p.display())).unwrap_or_default())]
    Parse {
        /// The format being parsed (e.g., "WhatsApp TXT")
        format: &'static str,
        /// The underlying parse error
        #[source]
        source: ParseErrorKind,
        /// The file path, if available
        path: Option<PathBuf>,
    },

    /// The file doesn't look like the expected format at all.
    ///
    /// Raised when no line of a WhatsApp export matches a known
    /// message header, or when an output extension is unknown.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// Invalid date format in filter configuration.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// A configuration value is out of range.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Description of the accepted range
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error, or a malformed JSON config file.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A report was requested before any chat file was loaded.
    #[error("No chat file loaded. Load a WhatsApp export first")]
    NotLoaded,

    /// The report needs a specific number of contacts.
    ///
    /// Reply times only make sense for one-to-one chats.
    #[error("Can't use when number of people not equal to {expected} (found {found})")]
    ContactCount {
        /// Number of contacts the report needs
        expected: usize,
        /// Number of contacts in the chat log
        found: usize,
    },

    /// An interactive command was not recognised.
    #[error("Unknown command '{0}'. Type 'help' for the list of commands")]
    UnknownCommand(String),
}

/// Kinds of parse errors that can occur.
#[derive(Debug, Error)]
pub enum ParseErrorKind {
    /// A message header carried a date or time that does not exist
    #[error("invalid timestamp '{value}' on line {line}")]
    Timestamp {
        /// 1-based line number in the export
        line: usize,
        /// The raw `date, time` text
        value: String,
    },
}

impl From<std::string::FromUtf8Error> for ChatvizError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatvizError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatvizError {
    /// Creates a parse error for WhatsApp format.
    pub fn whatsapp_parse(kind: ParseErrorKind, path: Option<PathBuf>) -> Self {
        ChatvizError::Parse {
            format: "WhatsApp TXT",
            source: kind,
            path,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatvizError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatvizError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatvizError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates a contact count mismatch error.
    pub fn contact_count(expected: usize, found: usize) -> Self {
        ChatvizError::ContactCount { expected, found }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatvizError::Io(_))
    }

    /// Returns `true` if this is a parse error.
    pub fn is_parse(&self) -> bool {
        matches!(self, ChatvizError::Parse { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, ChatvizError::InvalidFormat { .. })
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatvizError::InvalidDate { .. })
    }

    /// Returns `true` if no chat file was loaded.
    pub fn is_not_loaded(&self) -> bool {
        matches!(self, ChatvizError::NotLoaded)
    }

    /// Returns `true` if the report rejected the number of contacts.
    pub fn is_contact_count(&self) -> bool {
        matches!(self, ChatvizError::ContactCount { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================
