//! Source positions, ranges and node placements.
//!
//! Every node of a parsed [`Document`](crate::parsing::Document) carries a
//! [`Placement`]: the ranges of its literal markup tokens plus the range of its
//! rendered body. Slicing the document source with any of these ranges
//! reproduces the exact text that produced the node.

use std::fmt;

use serde::Serialize;

/// A point in the source text.
///
/// `row` and `col` are zero-based; `col` counts characters within the line,
/// `offset` is the absolute byte offset into the source. Ordering follows
/// `(row, col)`, which agrees with `offset` for positions of the same document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
    pub offset: usize,
}

impl Position {
    pub fn new(row: usize, col: usize, offset: usize) -> Self {
        Self { row, col, offset }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// A half-open range `[start, end)` of positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SourceRange {
    pub start: Position,
    pub end: Position,
}

impl SourceRange {
    pub fn new(start: Position, end: Position) -> Self {
        debug_assert!(start <= end, "inverted range {start}..{end}");
        Self { start, end }
    }

    /// An empty range anchored at `at`.
    pub fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end.offset.saturating_sub(self.start.offset)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// True if `pos` lies inside `[start, end)`.
    #[must_use]
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos < self.end
    }

    /// True if `other` lies entirely within this range. Empty ranges are
    /// contained when anchored anywhere from `start` to `end` inclusive.
    #[must_use]
    pub fn contains_range(&self, other: &SourceRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// True if both ranges share at least one position.
    #[must_use]
    pub fn overlaps(&self, other: &SourceRange) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Smallest range covering both `self` and `other`.
    #[must_use]
    pub fn cover(&self, other: &SourceRange) -> SourceRange {
        SourceRange {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Returns the text of this range. The range must belong to `source`.
    pub fn slice<'s>(&self, source: &'s str) -> &'s str {
        &source[self.start.offset..self.end.offset]
    }
}

impl fmt::Display for SourceRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Where a node came from: its markup token ranges and its body range.
///
/// `markups` lists literal delimiters in source order (the two `**` of a
/// strong span, the `# ` of a heading). `body` covers the rendered payload
/// only, excluding delimiters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Placement {
    pub markups: Vec<SourceRange>,
    pub body: Option<SourceRange>,
}

impl Placement {
    pub fn new(markups: Vec<SourceRange>, body: Option<SourceRange>) -> Self {
        Self { markups, body }
    }

    /// A placement with a body and no markup.
    pub fn body_only(body: SourceRange) -> Self {
        Self {
            markups: vec![],
            body: Some(body),
        }
    }

    /// A placement made only of markup (e.g. a horizontal rule).
    pub fn markup_only(markups: Vec<SourceRange>) -> Self {
        Self {
            markups,
            body: None,
        }
    }

    /// The range covering the body and every markup range.
    pub fn extent(&self) -> Option<SourceRange> {
        self.markups
            .iter()
            .chain(self.body.iter())
            .copied()
            .reduce(|a, b| a.cover(&b))
    }
}
