use crate::parsing::{error::CursorError, position::Position};

/// One source line, without its terminator.
#[derive(Debug, Clone)]
pub struct Line<'a> {
    /// Line text, excluding `\n` and a trailing `\r`.
    pub text: &'a str,
    /// Absolute byte offset of the first character.
    pub start: usize,
    chars: Vec<char>,
    /// Byte index (within `text`) of every char, plus `text.len()` at the end.
    byte_cols: Vec<usize>,
}

impl<'a> Line<'a> {
    fn new(text: &'a str, start: usize) -> Self {
        let mut byte_cols: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
        byte_cols.push(text.len());
        Self {
            text,
            start,
            chars: text.chars().collect(),
            byte_cols,
        }
    }

    /// Number of characters in the line.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// True if the line holds whitespace only.
    pub fn is_blank(&self) -> bool {
        self.chars.iter().all(|c| c.is_whitespace())
    }

    pub fn char_at(&self, col: usize) -> Option<char> {
        self.chars.get(col).copied()
    }

    /// Absolute byte offset of `col` (which may equal `len()`).
    pub fn offset_of(&self, col: usize) -> usize {
        self.start + self.byte_cols[col]
    }

    /// Text between two character columns.
    pub fn slice(&self, from: usize, to: usize) -> &'a str {
        &self.text[self.byte_cols[from]..self.byte_cols[to]]
    }

    pub fn starts_with_at(&self, col: usize, pattern: &str) -> bool {
        col <= self.len() && self.text[self.byte_cols[col]..].starts_with(pattern)
    }

    /// Column of the first occurrence of `pattern` at or after `col`.
    pub fn find_from(&self, col: usize, pattern: &str) -> Option<usize> {
        if col > self.len() {
            return None;
        }
        let from = self.byte_cols[col];
        let found = self.text[from..].find(pattern)? + from;
        self.byte_cols.binary_search(&found).ok()
    }

    /// Number of leading space/tab characters.
    pub fn leading_whitespace(&self) -> usize {
        self.chars
            .iter()
            .take_while(|c| matches!(c, ' ' | '\t'))
            .count()
    }

    /// Width of the leading whitespace with tabs expanded to `tab_size` stops.
    pub fn indent_width(&self, tab_size: usize) -> usize {
        expand_indent(self.chars.iter().copied(), tab_size)
    }
}

/// Leading-whitespace width of `chars`: a space adds one column, a tab moves
/// to the next multiple of `tab_size`.
pub fn expand_indent(chars: impl Iterator<Item = char>, tab_size: usize) -> usize {
    let tab_size = tab_size.max(1);
    let mut width = 0;
    for c in chars {
        match c {
            ' ' => width += 1,
            '\t' => width = (width / tab_size + 1) * tab_size,
            _ => break,
        }
    }
    width
}

/// Replaces every tab with spaces up to the next multiple of `tab_size`.
pub fn expand_tabs(text: &str, tab_size: usize) -> String {
    let tab_size = tab_size.max(1);
    let mut out = String::with_capacity(text.len());
    let mut col = 0;
    for c in text.chars() {
        if c == '\t' {
            let next = (col / tab_size + 1) * tab_size;
            out.extend(std::iter::repeat_n(' ', next - col));
            col = next;
        } else {
            out.push(c);
            col += 1;
        }
    }
    out
}

/// The source split into lines, with byte offsets for every character.
///
/// Splits on `\n` only, so text ending with a newline has a final empty line.
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    text: &'a str,
    lines: Vec<Line<'a>>,
}

impl<'a> SourceLines<'a> {
    pub fn new(text: &'a str) -> Self {
        let mut start = 0;
        let lines = text
            .split('\n')
            .map(|raw| {
                let line = Line::new(raw.strip_suffix('\r').unwrap_or(raw), start);
                start += raw.len() + 1;
                line
            })
            .collect();
        Self { text, lines }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, row: usize) -> Option<&Line<'a>> {
        self.lines.get(row)
    }

    /// True for whitespace-only lines and for rows past the end.
    pub fn is_blank(&self, row: usize) -> bool {
        self.lines.get(row).is_none_or(Line::is_blank)
    }

    /// The position just past the last character of the document.
    pub fn end_position(&self) -> Position {
        Position::new(self.lines.len(), 0, self.text.len())
    }

    /// Builds the position for `row`/`col`. `col` may equal the line length
    /// (the virtual line terminator); `row` may equal the line count only with
    /// `col == 0` (end of input).
    pub fn pos_at(&self, row: usize, col: usize) -> Result<Position, CursorError> {
        match self.lines.get(row) {
            Some(line) if col <= line.len() => Ok(Position::new(row, col, line.offset_of(col))),
            None if row == self.lines.len() && col == 0 => Ok(self.end_position()),
            _ => Err(CursorError::OutOfBounds { row, col }),
        }
    }
}
