//! # Cursor
//!
//! A read head over the source text that owns all row/column/offset
//! bookkeeping. Grammar code never indexes the text directly; it asks the
//! cursor to match, read or look ahead, and speculates with [`Mark`]s.
//!
//! ## Line model
//!
//! The current character is `'\n'` on the (virtual) line terminator and
//! `None` once the cursor moved past the last line. Advancing across a line
//! end consumes the whole terminator (`\n` or `\r\n`) as one step.
//!
//! ## Backtracking
//!
//! [`Cursor::mark`] takes a checkpoint and [`Cursor::rewind`] restores it
//! exactly. [`Cursor::attempt`] wraps a speculative production and rewinds on
//! every path that does not produce a value.

pub mod lines;

use crate::parsing::{
    error::CursorError,
    position::{Position, SourceRange},
};

pub use lines::{Line, SourceLines};

/// A checkpoint of the cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    pos: Position,
}

impl Mark {
    pub fn position(&self) -> Position {
        self.pos
    }
}

pub struct Cursor<'a> {
    lines: SourceLines<'a>,
    row: usize,
    col: usize,
    current: Option<char>,
}

impl<'a> Cursor<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut cursor = Self {
            lines: SourceLines::new(text),
            row: 0,
            col: 0,
            current: None,
        };
        cursor.sync();
        cursor
    }

    fn sync(&mut self) {
        self.current = self
            .lines
            .get(self.row)
            .map(|line| line.char_at(self.col).unwrap_or('\n'));
    }

    fn line(&self) -> Option<&Line<'a>> {
        self.lines.get(self.row)
    }

    pub fn source(&self) -> &'a str {
        self.lines.text()
    }

    pub fn lines(&self) -> &SourceLines<'a> {
        &self.lines
    }

    /// The character under the cursor; `'\n'` at a line end, `None` at the end of input.
    pub fn current(&self) -> Option<char> {
        self.current
    }

    pub fn at_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn at_eol(&self) -> bool {
        self.current == Some('\n')
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn pos(&self) -> Position {
        match self.line() {
            Some(line) => Position::new(self.row, self.col, line.offset_of(self.col)),
            None => self.lines.end_position(),
        }
    }

    pub fn pos_at(&self, row: usize, col: usize) -> Result<Position, CursorError> {
        self.lines.pos_at(row, col)
    }

    /// The range from `start` to the current position.
    pub fn range_from(&self, start: Position) -> SourceRange {
        SourceRange::new(start, self.pos())
    }

    pub fn slice(&self, range: &SourceRange) -> &'a str {
        range.slice(self.lines.text())
    }

    /// Moves one character forward; a line terminator counts as one character.
    pub fn advance(&mut self) -> Result<(), CursorError> {
        let len = match self.line() {
            Some(line) => line.len(),
            None => return Err(CursorError::PastEnd(self.pos())),
        };
        if self.col >= len {
            self.row += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
        self.sync();
        Ok(())
    }

    /// Moves one character back, onto the previous line terminator when at a line start.
    pub fn retreat(&mut self) -> Result<(), CursorError> {
        if self.col > 0 {
            self.col -= 1;
        } else if self.row == 0 {
            return Err(CursorError::BeforeStart);
        } else {
            self.row -= 1;
            self.col = self.line().map_or(0, Line::len);
        }
        self.sync();
        Ok(())
    }

    /// Moves `steps` characters, backwards when negative.
    pub fn advance_by(&mut self, steps: isize) -> Result<(), CursorError> {
        for _ in 0..steps.unsigned_abs() {
            if steps > 0 {
                self.advance()?;
            } else {
                self.retreat()?;
            }
        }
        Ok(())
    }

    /// Moves to the start of the next line (no-op at end of input).
    pub fn skip_line(&mut self) {
        if !self.at_end() {
            self.row += 1;
            self.col = 0;
            self.sync();
        }
    }

    /// Skips spaces and tabs in the current line.
    pub fn skip_whitespace(&mut self) {
        while matches!(self.current, Some(' ' | '\t')) {
            self.col += 1;
            self.sync();
        }
    }

    /// Consumes `pattern` if the current line continues with it.
    pub fn expect(&mut self, pattern: &str) -> bool {
        let matched = self
            .line()
            .is_some_and(|line| line.starts_with_at(self.col, pattern));
        if matched {
            self.col += pattern.chars().count();
            self.sync();
        }
        matched
    }

    /// Consumes the first matching pattern and returns it.
    pub fn expect_any<'p>(&mut self, patterns: &[&'p str]) -> Option<&'p str> {
        patterns.iter().copied().find(|p| self.expect(p))
    }

    /// Returns the rest of the current line and moves to the start of the next one.
    pub fn read_to_end_of_line(&mut self) -> String {
        let Some(line) = self.line() else {
            return String::new();
        };
        let rest = line.slice(self.col, line.len()).to_string();
        self.skip_line();
        rest
    }

    /// The rest of the current line, without moving.
    pub fn rest_of_line(&self) -> &'a str {
        match self.lines.get(self.row) {
            Some(line) => line.slice(self.col, line.len()),
            None => "",
        }
    }

    /// Reads `open ... close` within the current line and returns the text in
    /// between. `escape` protects a `close` that directly follows it.
    ///
    /// On success the cursor is placed after `close`; otherwise it does not move.
    pub fn read_braced_in_line(
        &mut self,
        open: char,
        close: char,
        escape: Option<char>,
    ) -> Option<String> {
        if self.current != Some(open) {
            return None;
        }
        let line = self.line()?;
        let body_start = self.col + 1;
        let mut col = body_start;
        while let Some(c) = line.char_at(col) {
            if escape == Some(c) && line.char_at(col + 1) == Some(close) {
                col += 2;
                continue;
            }
            if c == close {
                let body = line.slice(body_start, col).to_string();
                self.col = col + 1;
                self.sync();
                return Some(body);
            }
            col += 1;
        }
        None
    }

    /// Finds `pattern` ahead of the cursor without moving.
    ///
    /// The search stays inside the current block: it stops at a blank line,
    /// at the end of input, and never returns a match ending after `limit`.
    pub fn find_in_block(&self, pattern: &str, limit: Option<Position>) -> Option<Position> {
        self.find_in_block_from(self.pos(), pattern, limit)
    }

    /// Like [`Cursor::find_in_block`], searching from `from` instead of the cursor.
    pub fn find_in_block_from(
        &self,
        from: Position,
        pattern: &str,
        limit: Option<Position>,
    ) -> Option<Position> {
        let pattern_len = pattern.chars().count();
        let mut row = from.row;
        let mut col = from.col;
        while let Some(line) = self.lines.get(row) {
            if row > from.row && line.is_blank() {
                return None;
            }
            if let Some(found) = line.find_from(col, pattern) {
                let end = self.lines.pos_at(row, found + pattern_len).ok()?;
                if limit.is_some_and(|limit| end > limit) {
                    return None;
                }
                return self.lines.pos_at(row, found).ok();
            }
            row += 1;
            col = 0;
            let next = self.lines.pos_at(row, 0).ok()?;
            if limit.is_some_and(|limit| next >= limit) {
                return None;
            }
        }
        None
    }

    /// Indentation width of the current line with tab stops of `tab_size`.
    pub fn current_line_indent(&self, tab_size: usize) -> usize {
        self.line().map_or(0, |line| line.indent_width(tab_size))
    }

    /// The character before the cursor in the same line.
    pub fn prev_in_line(&self) -> Option<char> {
        if self.col == 0 {
            return None;
        }
        self.line()?.char_at(self.col - 1)
    }

    /// The character after the current one in the same line.
    pub fn next_in_line(&self) -> Option<char> {
        self.line()?.char_at(self.col + 1)
    }

    /// True if only whitespace remains on the current line (or at end of input).
    pub fn is_blank_to_end_of_line(&self) -> bool {
        self.rest_of_line().chars().all(char::is_whitespace)
    }

    pub fn mark(&self) -> Mark {
        Mark { pos: self.pos() }
    }

    /// Restores the cursor to `mark`, including the derived current character.
    pub fn rewind(&mut self, mark: Mark) {
        debug_assert!(
            self.lines.pos_at(mark.pos.row, mark.pos.col) == Ok(mark.pos),
            "mark {} does not belong to this document",
            mark.pos
        );
        self.row = mark.pos.row;
        self.col = mark.pos.col;
        self.sync();
    }

    /// Runs a speculative production; rewinds unless it produced a value.
    pub fn attempt<T>(
        &mut self,
        production: impl FnOnce(&mut Self) -> Result<Option<T>, CursorError>,
    ) -> Result<Option<T>, CursorError> {
        let mark = self.mark();
        let result = production(self);
        if !matches!(result, Ok(Some(_))) {
            self.rewind(mark);
        }
        result
    }
}
