use crate::parsing::cursor::SourceLines;

use super::kinds::{
    BlockQuote, CodeFence, FootnoteDeclaration, Heading, IndentedCode, ListMarker, Table,
    ThematicBreak,
};

/// The block production a line would open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Blank,
    Heading { level: u8 },
    Fence { fence: &'static str },
    Rule,
    Footnote,
    Quote,
    /// A row starting with `|` whose next line is a delimiter row.
    Table,
    ListItem { marker: ListMarker },
    IndentedCode,
    Paragraph,
}

impl LineKind {
    /// True for lines that end the block before them and start a new one.
    pub fn opens_block(&self) -> bool {
        matches!(
            self,
            LineKind::Heading { .. }
                | LineKind::Fence { .. }
                | LineKind::Rule
                | LineKind::Footnote
                | LineKind::Quote
                | LineKind::Table
                | LineKind::ListItem { .. }
        )
    }
}

/// Classification of a single line, containing only local facts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineClass {
    pub row: usize,
    /// Width of the leading whitespace with tabs expanded.
    pub indent: usize,
    /// Characters of leading whitespace.
    pub content_col: usize,
    pub kind: LineKind,
}

/// Classifies source lines for block dispatch and block boundaries.
#[derive(Debug, Clone, Copy)]
pub struct MarkdownLineClassifier {
    pub tab_size: usize,
    pub indented_code: bool,
}

impl MarkdownLineClassifier {
    /// Classifies line `row`. Only tables look at the following line.
    pub fn classify(&self, lines: &SourceLines<'_>, row: usize) -> LineClass {
        let Some(line) = lines.get(row) else {
            return LineClass {
                row,
                indent: 0,
                content_col: 0,
                kind: LineKind::Blank,
            };
        };
        let indent = line.indent_width(self.tab_size);
        let content_col = line.leading_whitespace();
        let rest = line.slice(content_col, line.len());

        let kind = if line.is_blank() {
            LineKind::Blank
        } else if let Some(level) = Heading::level(rest) {
            LineKind::Heading { level }
        } else if let Some(fence) = CodeFence::open(rest) {
            LineKind::Fence { fence }
        } else if ThematicBreak::is_rule(rest) {
            LineKind::Rule
        } else if FootnoteDeclaration::is_declaration(rest) {
            LineKind::Footnote
        } else if BlockQuote::is_quote(rest) {
            LineKind::Quote
        } else if Table::is_row(rest) && self.is_delimiter_row(lines, row + 1) {
            LineKind::Table
        } else if let Some(marker) = ListMarker::parse(rest) {
            LineKind::ListItem { marker }
        } else if self.indented_code && indent >= IndentedCode::MIN_INDENT {
            LineKind::IndentedCode
        } else {
            LineKind::Paragraph
        };

        LineClass {
            row,
            indent,
            content_col,
            kind,
        }
    }

    pub fn is_delimiter_row(&self, lines: &SourceLines<'_>, row: usize) -> bool {
        lines
            .get(row)
            .is_some_and(|line| Table::alignments(line.text).is_some())
    }

    /// True if line `row` continues the block above it.
    pub fn continues(&self, lines: &SourceLines<'_>, row: usize) -> bool {
        row < lines.len() && !lines.is_blank(row) && !self.classify(lines, row).kind.opens_block()
    }
}
