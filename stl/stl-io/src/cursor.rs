//! Line cursor for the ASCII grammar walk.

use crate::diagnostics::{Diagnostics, Position};
use crate::error::{StlError, StlResult};

/// Split text into lines with outer whitespace trimmed and internal
/// whitespace runs collapsed to a single space.
///
/// Blank lines are kept (as empty strings) so line numbers stay accurate.
#[must_use]
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(|line| line.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect()
}

/// A position in a borrowed sequence of normalized lines.
///
/// Moving the cursor skips blank lines, recording a warning for each, but it
/// never moves past the last line while skipping.
#[derive(Debug)]
pub struct LineCursor<'a> {
    lines: &'a [String],
    index: usize,
}

impl<'a> LineCursor<'a> {
    /// Place a cursor on the first non-blank line.
    pub fn new(lines: &'a [String], diagnostics: &mut Diagnostics) -> Self {
        let mut cursor = Self { lines, index: 0 };
        cursor.skip_blank_lines(diagnostics);
        cursor
    }

    /// Number of non-blank lines in the whole sequence.
    #[must_use]
    pub fn non_blank_count(&self) -> usize {
        self.lines.iter().filter(|line| !line.is_empty()).count()
    }

    /// The current line, or `None` past the end.
    #[must_use]
    pub fn current(&self) -> Option<&'a str> {
        self.lines.get(self.index).map(String::as_str)
    }

    /// 1-based number of the current line.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.index + 1
    }

    /// The current line as a diagnostic position.
    #[must_use]
    pub fn position(&self) -> Position {
        Position::Line(self.line_number())
    }

    /// The current line, or a fatal error naming `expected` if the input has
    /// run out.
    pub fn expect_line(
        &self,
        expected: &str,
        diagnostics: &mut Diagnostics,
    ) -> StlResult<&'a str> {
        self.current().ok_or_else(|| {
            diagnostics.fail(StlError::UnexpectedEnd {
                position: self.position(),
                expected: expected.to_string(),
            })
        })
    }

    /// Require the current line to equal `expected` exactly, then advance.
    pub fn expect_exact(&mut self, expected: &str, diagnostics: &mut Diagnostics) -> StlResult<()> {
        let line = self.expect_line(expected, diagnostics)?;
        if line != expected {
            return Err(diagnostics.fail(StlError::unexpected(self.position(), expected, line)));
        }
        self.advance(diagnostics);
        Ok(())
    }

    /// Move to the next non-blank line.
    pub fn advance(&mut self, diagnostics: &mut Diagnostics) {
        self.index += 1;
        self.skip_blank_lines(diagnostics);
    }

    fn skip_blank_lines(&mut self, diagnostics: &mut Diagnostics) {
        while self.index + 1 < self.lines.len() && self.lines[self.index].is_empty() {
            diagnostics.warn(self.position(), "Line is empty");
            self.index += 1;
        }
    }
}
