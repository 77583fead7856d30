use serde::Serialize;

use crate::parsing::{inline::InlineItem, position::Placement, references::Ref};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ListType {
    /// `- item`
    Dashed,
    /// `* item` or `+ item`
    Bulleted,
    /// `1. item`
    Ordered,
}

/// Column alignment from a table delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Alignment {
    /// `---` or `:--`
    Start,
    /// `:-:`
    Center,
    /// `--:`
    End,
}

/// One table row: a sequence of cells, each a sequence of inline items.
pub type Row = Vec<Vec<InlineItem>>;

/// A top-level structural unit of the document.
///
/// Every variant carries a [`Placement`]. Its markups are the block's own
/// syntax (heading hashes, list markers, fences); for quotes and tables they
/// also include the structural tokens between child contents (continuation
/// `>` prefixes, cell pipes, the delimiter row).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum BlockItem {
    Paragraph {
        /// Leading indentation in 4-column units.
        indent: usize,
        content: Vec<InlineItem>,
        placement: Placement,
    },
    Heading {
        /// 1 to 7.
        level: u8,
        content: Vec<InlineItem>,
        placement: Placement,
    },
    ListItem {
        list_type: ListType,
        /// Nesting level in 4-column units.
        level: usize,
        /// Set for ordered items only.
        number: Option<usize>,
        content: Vec<InlineItem>,
        placement: Placement,
    },
    Quote {
        content: Vec<InlineItem>,
        placement: Placement,
    },
    Code {
        text: String,
        language: Option<String>,
        /// Indentation level of an indented code block; `None` for fenced code.
        indent_level: Option<usize>,
        /// The text as a single [`InlineItem::Code`].
        content: Vec<InlineItem>,
        placement: Placement,
    },
    HorizontalLine {
        placement: Placement,
    },
    Table {
        header: Row,
        alignments: Vec<Alignment>,
        body: Vec<Row>,
        placement: Placement,
    },
    /// A `[name]: link` declaration.
    Footnote {
        reference: Ref,
        placement: Placement,
    },
}

impl BlockItem {
    pub fn placement(&self) -> &Placement {
        match self {
            BlockItem::Paragraph { placement, .. }
            | BlockItem::Heading { placement, .. }
            | BlockItem::ListItem { placement, .. }
            | BlockItem::Quote { placement, .. }
            | BlockItem::Code { placement, .. }
            | BlockItem::HorizontalLine { placement }
            | BlockItem::Table { placement, .. }
            | BlockItem::Footnote { placement, .. } => placement,
        }
    }

    /// All inline items of the block in source order; table cells are flattened.
    pub fn inlines(&self) -> Box<dyn Iterator<Item = &InlineItem> + '_> {
        match self {
            BlockItem::Paragraph { content, .. }
            | BlockItem::Heading { content, .. }
            | BlockItem::ListItem { content, .. }
            | BlockItem::Quote { content, .. }
            | BlockItem::Code { content, .. } => Box::new(content.iter()),
            BlockItem::Table { header, body, .. } => Box::new(
                header
                    .iter()
                    .chain(body.iter().flatten())
                    .flatten(),
            ),
            BlockItem::HorizontalLine { .. } | BlockItem::Footnote { .. } => {
                Box::new(std::iter::empty())
            }
        }
    }

    /// A short name for outlines and logs.
    pub fn kind_name(&self) -> &'static str {
        match self {
            BlockItem::Paragraph { .. } => "Paragraph",
            BlockItem::Heading { .. } => "Heading",
            BlockItem::ListItem { .. } => "ListItem",
            BlockItem::Quote { .. } => "Quote",
            BlockItem::Code { .. } => "Code",
            BlockItem::HorizontalLine { .. } => "HorizontalLine",
            BlockItem::Table { .. } => "Table",
            BlockItem::Footnote { .. } => "Footnote",
        }
    }
}
