//! Unified error types for propchat.
//!
//! This module provides a single [`PropchatError`] enum that covers every
//! fallible operation in the library. Note how little that is: segmentation,
//! cleaning and classification of in-memory text never fail. Errors only come
//! from the edges of the pipeline:
//!
//! - **Construction**: a configured rule or phone pattern does not compile
//! - **Input**: a source file cannot be read or is not valid UTF-8
//! - **Output**: a writer fails, or an output format is unavailable

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// A specialized [`Result`] type for propchat operations.
///
/// # Example
///
/// ```rust
/// use propchat::error::Result;
/// use propchat::Record;
///
/// fn my_function() -> Result<Vec<Record>> {
///     Ok(vec![])
/// }
/// ```
pub type Result<T> = std::result::Result<T, PropchatError>;

/// The error type for all propchat operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PropchatError {
    /// An I/O error occurred.
    ///
    /// This typically happens when:
    /// - The input file doesn't exist
    /// - Permission denied
    /// - Disk is full (when writing output)
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// A source file is not valid UTF-8.
    ///
    /// Fatal for that source only; other sources keep processing.
    #[error("Source '{}' is not valid UTF-8: {source}", path.display())]
    Encoding {
        /// The file that failed to decode
        path: PathBuf,
        /// The underlying decoding error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// UTF-8 encoding error while building output.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },

    /// A classification rule or phone pattern failed to compile.
    #[error("Invalid rule pattern '{pattern}': {source}")]
    InvalidRule {
        /// The offending pattern, as configured
        pattern: String,
        /// The underlying regex error
        #[source]
        source: regex::Error,
    },

    /// The requested format is unknown or not compiled in.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The kind of format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// JSON parsing/serialization error.
    ///
    /// Raised by rule extension files and the JSON writers.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl From<std::string::FromUtf8Error> for PropchatError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        PropchatError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl PropchatError {
    /// Creates an encoding error for a source file.
    pub fn encoding(path: impl Into<PathBuf>, source: std::string::FromUtf8Error) -> Self {
        PropchatError::Encoding {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid rule error.
    pub fn invalid_rule(pattern: impl Into<String>, source: regex::Error) -> Self {
        PropchatError::InvalidRule {
            pattern: pattern.into(),
            source,
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        PropchatError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, PropchatError::Io(_))
    }

    /// Returns `true` if a source failed to decode.
    pub fn is_encoding(&self) -> bool {
        matches!(self, PropchatError::Encoding { .. })
    }

    /// Returns `true` if a rule failed to compile.
    pub fn is_invalid_rule(&self) -> bool {
        matches!(self, PropchatError::InvalidRule { .. })
    }

    /// Returns `true` if this is an invalid format error.
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, PropchatError::InvalidFormat { .. })
    }
}
