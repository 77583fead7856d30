use serde::Serialize;

use crate::parsing::{position::Placement, references::Ref};

/// A span of rendered content inside a block.
///
/// Every variant carries the [`Placement`] it was parsed from. For styled text
/// the markups are the delimiter tokens consumed since the previous node; for
/// links and images they are the bracket and spec ranges and the body is the
/// bracketed name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type")]
pub enum InlineItem {
    Text {
        text: String,
        bold: bool,
        italic: bool,
        strike_through: bool,
        placement: Placement,
    },
    /// Content of a code span, or the whole text of a code block.
    Code { text: String, placement: Placement },
    Link { reference: Ref, placement: Placement },
    Image { reference: Ref, placement: Placement },
}

impl InlineItem {
    /// Unstyled text, mostly for tests.
    pub fn plain(text: impl Into<String>, placement: Placement) -> Self {
        InlineItem::Text {
            text: text.into(),
            bold: false,
            italic: false,
            strike_through: false,
            placement,
        }
    }

    pub fn placement(&self) -> &Placement {
        match self {
            InlineItem::Text { placement, .. }
            | InlineItem::Code { placement, .. }
            | InlineItem::Link { placement, .. }
            | InlineItem::Image { placement, .. } => placement,
        }
    }

    pub(crate) fn placement_mut(&mut self) -> &mut Placement {
        match self {
            InlineItem::Text { placement, .. }
            | InlineItem::Code { placement, .. }
            | InlineItem::Link { placement, .. }
            | InlineItem::Image { placement, .. } => placement,
        }
    }

    /// The visible text: the content of text and code, the name of links and images.
    pub fn text(&self) -> &str {
        match self {
            InlineItem::Text { text, .. } | InlineItem::Code { text, .. } => text,
            InlineItem::Link { reference, .. } | InlineItem::Image { reference, .. } => {
                &reference.name
            }
        }
    }
}

/// Concatenates the visible text of `items`.
pub fn plain_text(items: &[InlineItem]) -> String {
    items.iter().map(InlineItem::text).collect()
}
