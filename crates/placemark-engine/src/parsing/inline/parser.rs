use crate::parsing::{
    blocks::kinds::BlockQuote,
    cursor::Cursor,
    error::CursorError,
    position::{Placement, Position, SourceRange},
    references::{LinkResolver, Ref, RefKind, ReferenceTable},
};

use super::{
    detector::{Detectors, Style, TransitionKind},
    kinds::LinkSyntax,
    types::InlineItem,
};

/// Document-wide inputs of inline parsing.
#[derive(Clone, Copy)]
pub struct InlineContext<'r> {
    pub references: &'r ReferenceTable,
    pub resolver: &'r dyn LinkResolver,
}

/// How continuation lines of a block start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Continuation {
    /// Leading whitespace is skipped.
    #[default]
    Plain,
    /// Leading whitespace and one `>` prefix are skipped; the prefix is block markup.
    Quote,
}

/// The result of parsing one block's inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineContent {
    pub items: Vec<InlineItem>,
    /// Markup owned by the enclosing block: continuation prefixes and style
    /// tokens that had no node to attach to.
    pub block_markups: Vec<SourceRange>,
    /// From where parsing started to the end of the last non-whitespace
    /// character consumed.
    pub body: SourceRange,
}

/// Parses inline content from the cursor up to `limit`.
///
/// `limit` is the start of the first line that no longer belongs to the block
/// (or the end of a table cell). The cursor is left at `limit` or at the end
/// of input.
pub fn parse_inline(
    cur: &mut Cursor<'_>,
    limit: Position,
    continuation: Continuation,
    ctx: InlineContext<'_>,
) -> Result<InlineContent, CursorError> {
    InlineParser::new(cur.pos(), limit, continuation, ctx).run(cur)
}

struct InlineParser<'r> {
    ctx: InlineContext<'r>,
    limit: Position,
    continuation: Continuation,
    detectors: Detectors,
    acc: String,
    /// Where the pending text started.
    acc_start: Position,
    /// End of the last non-whitespace character in `acc`.
    acc_end: Option<Position>,
    /// Token ranges recorded since the last flush.
    markups: Vec<SourceRange>,
    items: Vec<InlineItem>,
    block_markups: Vec<SourceRange>,
    start: Position,
    content_end: Position,
}

impl<'r> InlineParser<'r> {
    fn new(
        start: Position,
        limit: Position,
        continuation: Continuation,
        ctx: InlineContext<'r>,
    ) -> Self {
        Self {
            ctx,
            limit,
            continuation,
            detectors: Detectors::default(),
            acc: String::new(),
            acc_start: start,
            acc_end: None,
            markups: vec![],
            items: vec![],
            block_markups: vec![],
            start,
            content_end: start,
        }
    }

    fn run(mut self, cur: &mut Cursor<'_>) -> Result<InlineContent, CursorError> {
        while !cur.at_end() && cur.pos() < self.limit {
            if cur.at_eol() {
                if !self.join_next_line(cur)? {
                    break;
                }
                continue;
            }
            if self.try_escape(cur)? {
                continue;
            }
            if self.try_dash(cur)? {
                continue;
            }
            if self.try_reference(cur)? {
                continue;
            }
            if self.try_style_token(cur)? {
                continue;
            }
            let Some(c) = cur.current() else { break };
            cur.advance()?;
            self.push(c, cur.pos());
        }
        self.finish();
        Ok(InlineContent {
            items: self.items,
            block_markups: self.block_markups,
            body: SourceRange::new(self.start, self.content_end),
        })
    }

    /// Moves to the next line; returns false if it is outside the block.
    fn join_next_line(&mut self, cur: &mut Cursor<'_>) -> Result<bool, CursorError> {
        cur.advance()?;
        if cur.at_end() || cur.pos() >= self.limit {
            return Ok(false);
        }
        cur.skip_whitespace();
        if self.continuation == Continuation::Quote {
            let prefix_start = cur.pos();
            if cur.expect(BlockQuote::PREFIX) {
                cur.expect(" ");
                self.block_markups.push(cur.range_from(prefix_start));
            }
            if cur.is_blank_to_end_of_line() {
                // a bare `>` line joins nothing
                cur.skip_whitespace();
                return Ok(true);
            }
        }
        if !self.acc.is_empty() || !self.items.is_empty() {
            self.acc.push(' ');
        }
        Ok(true)
    }

    fn push(&mut self, c: char, end: Position) {
        self.acc.push(c);
        if !c.is_whitespace() {
            self.acc_end = Some(end);
            self.content_end = end;
        }
    }

    /// `\\`, `\[` and `\]` produce the escaped character.
    fn try_escape(&mut self, cur: &mut Cursor<'_>) -> Result<bool, CursorError> {
        if cur.current() != Some(LinkSyntax::ESCAPE) {
            return Ok(false);
        }
        let Some(escaped) = cur.next_in_line().filter(|c| LinkSyntax::is_escapable(*c)) else {
            return Ok(false);
        };
        if cur.pos_at(cur.row(), cur.col() + 2)? > self.limit {
            return Ok(false);
        }
        cur.advance_by(2)?;
        self.push(escaped, cur.pos());
        Ok(true)
    }

    /// `--` and `---` before whitespace become an en or em dash.
    fn try_dash(&mut self, cur: &mut Cursor<'_>) -> Result<bool, CursorError> {
        if cur.current() != Some('-') {
            return Ok(false);
        }
        let rest = cur.rest_of_line();
        let run = rest.chars().take_while(|c| *c == '-').count();
        if run < 2 {
            return Ok(false);
        }
        let end = cur.pos_at(cur.row(), cur.col() + run)?;
        if end > self.limit {
            return Ok(false);
        }
        let before_space = rest.chars().nth(run).is_none_or(char::is_whitespace);
        let dash = match run {
            2 if before_space => '\u{2013}',
            3 if before_space => '\u{2014}',
            _ => {
                // a longer run stays literal as a whole
                cur.advance_by(run as isize)?;
                for _ in 0..run {
                    self.push('-', end);
                }
                return Ok(true);
            }
        };
        cur.advance_by(run as isize)?;
        self.push(dash, end);
        Ok(true)
    }

    /// Links `[name]...` and images `![name]...`.
    fn try_reference(&mut self, cur: &mut Cursor<'_>) -> Result<bool, CursorError> {
        let image = match cur.current() {
            Some(LinkSyntax::OPEN) => false,
            Some(LinkSyntax::IMAGE) if cur.next_in_line() == Some(LinkSyntax::OPEN) => true,
            _ => return Ok(false),
        };
        let at = cur.pos();
        let Some((reference, placement)) = read_reference(cur, image, self.limit, self.ctx)? else {
            return Ok(false);
        };
        self.flush(at);
        let item = if image {
            InlineItem::Image {
                reference,
                placement,
            }
        } else {
            InlineItem::Link {
                reference,
                placement,
            }
        };
        self.items.push(item);
        self.acc_start = cur.pos();
        self.content_end = cur.pos();
        Ok(true)
    }

    fn try_style_token(&mut self, cur: &mut Cursor<'_>) -> Result<bool, CursorError> {
        let at = cur.pos();
        let before = self.detectors.style();
        let Some(transition) = self.detectors.offer(cur, self.limit)? else {
            return Ok(false);
        };
        match transition.kind {
            TransitionKind::Open => {
                self.flush_styled(at, before);
                self.markups.push(transition.token);
            }
            TransitionKind::Close => {
                self.markups.push(transition.token);
                if self.acc.is_empty() {
                    self.attach_dangling();
                } else {
                    self.flush_styled(at, before);
                }
            }
        }
        self.acc_start = cur.pos();
        self.content_end = cur.pos();
        Ok(true)
    }

    fn flush(&mut self, at: Position) {
        let style = self.detectors.style();
        self.flush_styled(at, style);
    }

    /// Emits pending text verbatim with its body ending at `at`.
    fn flush_styled(&mut self, at: Position, style: Style) {
        if self.acc.is_empty() {
            return;
        }
        let text = std::mem::take(&mut self.acc);
        let body = SourceRange::new(self.acc_start, at);
        self.emit(text, body, style);
    }

    fn emit(&mut self, text: String, body: SourceRange, style: Style) {
        let placement = Placement::new(std::mem::take(&mut self.markups), Some(body));
        self.acc_end = None;
        self.items.push(if style.code {
            InlineItem::Code { text, placement }
        } else {
            InlineItem::Text {
                text,
                bold: style.bold,
                italic: style.italic,
                strike_through: style.strike_through,
                placement,
            }
        });
    }

    /// Attaches pending markups to the last node, or to the block if there is none.
    fn attach_dangling(&mut self) {
        let markups = std::mem::take(&mut self.markups);
        match self.items.last_mut() {
            Some(item) => {
                let placement = item.placement_mut();
                placement.markups.extend(markups);
                placement.markups.sort();
            }
            None => self.block_markups.extend(markups),
        }
    }

    /// Final flush: trailing whitespace is dropped from text and body.
    fn finish(&mut self) {
        let text = std::mem::take(&mut self.acc);
        let trimmed = text.trim_end();
        match self.acc_end {
            Some(end) if !trimmed.is_empty() => {
                let body = SourceRange::new(self.acc_start, end);
                let style = self.detectors.style();
                self.emit(trimmed.to_string(), body, style);
            }
            _ => {}
        }
        if !self.markups.is_empty() {
            self.attach_dangling();
        }
    }
}

/// Reads a link or image reference at the cursor and resolves it.
///
/// Forms, in order: `[name](spec)`, `[name][id]`, `[name]` declared as a
/// footnote, `[name]` known to the resolver. Anything else leaves the cursor
/// where it was.
fn read_reference(
    cur: &mut Cursor<'_>,
    image: bool,
    limit: Position,
    ctx: InlineContext<'_>,
) -> Result<Option<(Ref, Placement)>, CursorError> {
    cur.attempt(|cur| {
        let start = cur.pos();
        if image {
            cur.advance()?;
        }
        let row = cur.row();
        let open_col = cur.col();
        let Some(name) = cur.read_braced_in_line(
            LinkSyntax::OPEN,
            LinkSyntax::CLOSE,
            Some(LinkSyntax::ESCAPE),
        ) else {
            return Ok(None);
        };
        let close_end = cur.pos();
        if close_end > limit {
            return Ok(None);
        }
        let body_start = cur.pos_at(row, open_col + 1)?;
        let close_start = cur.pos_at(row, close_end.col - 1)?;
        let mut markups = vec![
            SourceRange::new(start, body_start),
            SourceRange::new(close_start, close_end),
        ];
        let body = Some(SourceRange::new(body_start, close_start));

        let reference = match cur.current() {
            Some(LinkSyntax::SPEC_OPEN) => {
                let Some(spec) =
                    cur.read_braced_in_line(LinkSyntax::SPEC_OPEN, LinkSyntax::SPEC_CLOSE, None)
                else {
                    return Ok(None);
                };
                Ref::from_spec(name, spec.trim(), RefKind::Inline)
            }
            Some(LinkSyntax::OPEN) => {
                let Some(id) = cur.read_braced_in_line(
                    LinkSyntax::OPEN,
                    LinkSyntax::CLOSE,
                    Some(LinkSyntax::ESCAPE),
                ) else {
                    return Ok(None);
                };
                let Some(footnote) = ctx.references.get(&id) else {
                    return Ok(None);
                };
                Ref {
                    name,
                    ..footnote.clone()
                }
            }
            _ if name.is_empty() => return Ok(None),
            _ => match ctx.references.get(&name) {
                Some(footnote) => footnote.clone(),
                None => match ctx.resolver.resolve(&name) {
                    Some(spec) => Ref::from_spec(name, spec.trim(), RefKind::External),
                    None => return Ok(None),
                },
            },
        };
        if cur.pos() > limit {
            return Ok(None);
        }
        if cur.pos() > close_end {
            markups.push(cur.range_from(close_end));
        }
        Ok(Some((reference, Placement::new(markups, body))))
    })
}
