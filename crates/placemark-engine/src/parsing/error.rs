use std::fmt;

use serde::Serialize;

use super::position::Position;

/// Cursor navigation outside the document.
///
/// These signal a parser bug, never malformed input: ordinary Markdown always
/// has a literal-text fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("advance past the end of input at {0}")]
    PastEnd(Position),
    #[error("advance back before the start of input")]
    BeforeStart,
    #[error("position {row}:{col} is outside the document")]
    OutOfBounds { row: usize, col: usize },
}

/// Failure of a whole [`parse`](crate::parse) call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("cannot parse empty text")]
    EmptyInput,
    #[error("internal parser error: {0}")]
    Internal(#[from] CursorError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SyntaxErrorKind {
    /// `[name]:` with nothing after the colon.
    MalformedFootnote,
    /// A fenced code block without its closing fence.
    UnterminatedBlock,
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::MalformedFootnote => f.write_str("malformed footnote"),
            SyntaxErrorKind::UnterminatedBlock => f.write_str("unterminated block"),
        }
    }
}

/// A recoverable problem found in the document. Parsing continued past it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{message} at {position}")]
pub struct SyntaxError {
    pub position: Position,
    pub kind: SyntaxErrorKind,
    pub message: String,
}

impl SyntaxError {
    pub fn new(position: Position, kind: SyntaxErrorKind, detail: Option<&str>) -> Self {
        let message = match detail {
            Some(detail) => format!("{kind} {detail}"),
            None => kind.to_string(),
        };
        Self {
            position,
            kind,
            message,
        }
    }
}
