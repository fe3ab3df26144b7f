//! Warning and error accumulation.
//!
//! A [`Diagnostics`] value is created per conversion and threaded through
//! every parsing call. Warnings are recorded and parsing continues; errors are
//! counted here and returned to the caller as a [`StlError`].

use std::fmt;

use tracing::{debug, warn};

use crate::error::StlError;

/// Location of a diagnostic inside the input file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    /// 1-based line number (ASCII input).
    Line(usize),
    /// Byte offset from the start of the file (binary input).
    Byte(u64),
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Line(line) => write!(f, "line {line}"),
            Self::Byte(offset) => write!(f, "position {offset}"),
        }
    }
}

/// A recorded warning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Where it was found.
    pub position: Position,
    /// Description without the position prefix.
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Warning on {}: {}.", self.position, self.message)
    }
}

/// Accumulated warnings and errors for one file conversion.
///
/// Both counters only ever grow.
///
/// # Example
///
/// ```
/// use stl_io::{Diagnostics, Position};
///
/// let mut diagnostics = Diagnostics::new();
/// diagnostics.warn(Position::Line(4), "Line is empty");
///
/// assert_eq!(diagnostics.warning_count(), 1);
/// assert_eq!(
///     diagnostics.warnings().next().map(ToString::to_string),
///     Some("Warning on line 4: Line is empty.".to_string())
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    warnings: Vec<Diagnostic>,
    error_count: usize,
    first_error: Option<String>,
}

impl Diagnostics {
    /// Create an empty accumulator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning.
    pub fn warn(&mut self, position: Position, message: impl Into<String>) {
        let diagnostic = Diagnostic {
            position,
            message: message.into(),
        };
        debug!("{diagnostic}");
        self.warnings.push(diagnostic);
    }

    /// Record a warning about text that did not match what was expected.
    pub fn warn_expected(&mut self, position: Position, expected: &str, found: &str) {
        self.warn(
            position,
            format!("Expected '{expected}' but got '{}'", found.trim()),
        );
    }

    /// Count a fatal error and hand it back for returning.
    ///
    /// The text of the first error is kept for the final summary.
    ///
    /// ```
    /// use stl_io::{Diagnostics, Position, StlError};
    ///
    /// let mut diagnostics = Diagnostics::new();
    /// let err = diagnostics.fail(StlError::invalid(Position::Byte(84), "bad record"));
    ///
    /// assert_eq!(diagnostics.error_count(), 1);
    /// assert_eq!(diagnostics.first_error(), Some(err.to_string().as_str()));
    /// ```
    #[must_use]
    pub fn fail(&mut self, error: StlError) -> StlError {
        self.error_count += 1;
        warn!("{error}");
        if self.first_error.is_none() {
            self.first_error = Some(error.to_string());
        }
        error
    }

    /// Number of warnings recorded.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Number of errors counted.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.error_count
    }

    /// True if any error was counted.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    /// Text of the first error, if any.
    #[must_use]
    pub fn first_error(&self) -> Option<&str> {
        self.first_error.as_deref()
    }

    /// Iterate over recorded warnings in the order they were found.
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.warnings.iter()
    }
}
