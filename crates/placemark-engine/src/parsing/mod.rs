pub mod blocks;
pub mod cursor;
pub mod error;
pub mod inline;
pub mod position;
pub mod references;
pub mod snapshot;

#[cfg(test)]
mod tests;

use serde::Serialize;

use blocks::{BlockBuilder, BlockItem, MarkdownLineClassifier};
use cursor::Cursor;
use error::{CursorError, ParseError, SyntaxError};
use inline::{InlineContext, InlineItem};
use position::{Placement, SourceRange};
use references::{LinkResolver, NoLinks, prescan};

/// Knobs of a parse call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Tab stop width used for indentation.
    pub tab_size: usize,
    /// Parse lines indented by 4+ columns as code instead of indented paragraphs.
    pub indented_code: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            tab_size: 4,
            indented_code: false,
        }
    }
}

/// A parsed document. Every placement in it indexes into `source_text`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Document {
    pub source_text: String,
    pub blocks: Vec<BlockItem>,
    /// Recoverable problems, in source order.
    pub errors: Vec<SyntaxError>,
}

impl Document {
    /// The source text covered by `range`.
    pub fn slice(&self, range: &SourceRange) -> &str {
        range.slice(&self.source_text)
    }

    pub fn block_at(&self, index: usize) -> Option<&BlockItem> {
        self.blocks.get(index)
    }

    /// Every inline item of every block, in document order.
    pub fn inlines(&self) -> impl Iterator<Item = &InlineItem> + '_ {
        self.blocks.iter().flat_map(BlockItem::inlines)
    }

    /// Every placement in the document: each block followed by its inline items.
    pub fn placements(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.blocks.iter().flat_map(|block| {
            std::iter::once(block.placement()).chain(block.inlines().map(InlineItem::placement))
        })
    }
}

/// Parses `text` with default options and no external links.
pub fn parse(text: &str) -> Result<Document, ParseError> {
    parse_with(text, &ParseOptions::default(), &NoLinks)
}

/// Parses `text`, resolving undeclared `[name]` links through `resolver`.
pub fn parse_with<R: LinkResolver>(
    text: &str,
    options: &ParseOptions,
    resolver: &R,
) -> Result<Document, ParseError> {
    if text.is_empty() {
        return Err(ParseError::EmptyInput);
    }
    parse_document(text, options, resolver).map_err(|e| {
        log::error!("parser failed: {e}");
        if cfg!(debug_assertions) {
            panic!("parser failed: {e}");
        }
        ParseError::Internal(e)
    })
}

fn parse_document(
    text: &str,
    options: &ParseOptions,
    resolver: &dyn LinkResolver,
) -> Result<Document, CursorError> {
    let mut cur = Cursor::new(text);
    let mut errors = vec![];
    let references = prescan(&mut cur, &mut errors)?;
    log::debug!("{} footnote declarations", references.len());

    let classifier = MarkdownLineClassifier {
        tab_size: options.tab_size.max(1),
        indented_code: options.indented_code,
    };
    let ctx = InlineContext {
        references: &references,
        resolver,
    };
    let (blocks, errors) = BlockBuilder::new(cur, classifier, ctx, errors).build()?;

    Ok(Document {
        source_text: text.to_string(),
        blocks,
        errors,
    })
}
