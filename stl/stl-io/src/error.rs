//! Error types for STL reading and writing.

use std::path::PathBuf;
use thiserror::Error;

use crate::diagnostics::Position;

/// Result type for STL I/O operations.
pub type StlResult<T> = Result<T, StlError>;

/// Fatal faults raised while reading or writing an STL file.
///
/// Every content fault carries the [`Position`] it was found at: a 1-based
/// line number for ASCII input, a byte offset for binary input.
#[derive(Debug, Error)]
pub enum StlError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: PathBuf,
    },

    /// The input did not match the grammar element that was expected.
    #[error("Error on {position}: Expected '{expected}' but got '{found}'.")]
    Unexpected {
        /// Where the mismatch was found.
        position: Position,
        /// Description of the expected element.
        expected: String,
        /// The text actually found (trimmed).
        found: String,
    },

    /// The input ran out where a grammar element was expected.
    #[error("Error on {position}: Expected '{expected}' but reached the end of the file.")]
    UnexpectedEnd {
        /// Position just past the last line.
        position: Position,
        /// Description of the expected element.
        expected: String,
    },

    /// A structurally invalid record.
    #[error("Error on {position}: {message}.")]
    Invalid {
        /// Where the record starts.
        position: Position,
        /// What is wrong with it.
        message: String,
    },

    /// The model has more facets than a binary STL count can hold.
    #[error("cannot write {count} facets: binary STL stores at most {max} triangles", max = u32::MAX)]
    TooManyFacets {
        /// Number of facets in the model.
        count: usize,
    },

    /// A grammar pattern failed to compile.
    #[error("invalid grammar pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// I/O error from the standard library.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl StlError {
    /// Create an `Unexpected` error.
    #[must_use]
    pub fn unexpected(
        position: Position,
        expected: impl Into<String>,
        found: impl AsRef<str>,
    ) -> Self {
        Self::Unexpected {
            position,
            expected: expected.into(),
            found: found.as_ref().trim().to_string(),
        }
    }

    /// Create an `Invalid` error.
    #[must_use]
    pub fn invalid(position: Position, message: impl Into<String>) -> Self {
        Self::Invalid {
            position,
            message: message.into(),
        }
    }

    /// The position the fault was found at, if it concerns file content.
    #[must_use]
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Unexpected { position, .. }
            | Self::UnexpectedEnd { position, .. }
            | Self::Invalid { position, .. } => Some(*position),
            _ => None,
        }
    }
}
