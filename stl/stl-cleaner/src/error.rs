//! Error types for the cleaning pipeline.

use std::path::PathBuf;
use stl_io::StlError;
use thiserror::Error;

/// Result type for cleaning operations.
pub type CleanResult<T> = Result<T, CleanError>;

/// Errors that abort or fail a cleaning run.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Input and output name the same file.
    #[error("input and output must be different files: {path}")]
    SameInputOutput {
        /// The shared path.
        path: PathBuf,
    },

    /// The input could not be read or is not a valid STL file.
    #[error(transparent)]
    Stl(#[from] StlError),

    /// The output could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Output path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Errors were counted even though the file was processed.
    #[error("Validation failed: errors={errors}, warnings={warnings}, first error: {first_error}")]
    ValidationFailed {
        /// Number of errors counted.
        errors: usize,
        /// Number of warnings counted.
        warnings: usize,
        /// Text of the first error.
        first_error: String,
    },
}

impl CleanError {
    /// True if the run stopped before the input was parsed, so no
    /// diagnostics were gathered.
    #[must_use]
    pub fn is_before_parsing(&self) -> bool {
        matches!(
            self,
            Self::SameInputOutput { .. }
                | Self::Stl(StlError::FileNotFound { .. } | StlError::Io(_))
        )
    }
}
