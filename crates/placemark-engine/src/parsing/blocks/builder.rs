use crate::parsing::{
    cursor::Cursor,
    error::{CursorError, SyntaxError, SyntaxErrorKind},
    inline::{Continuation, InlineContent, InlineContext, InlineItem, parse_inline},
    position::{Placement, Position, SourceRange},
    references::read_declaration,
};

use super::{
    classify::{LineClass, LineKind, MarkdownLineClassifier},
    kinds::{BlockQuote, CodeFence, IndentedCode, ListMarker, ListNumbering, Paragraph, Table},
    types::{BlockItem, Row},
};

/// Segments the document into blocks, one production per loop iteration.
///
/// Every production starts at the beginning of a line and leaves the cursor
/// at the beginning of the first line it did not consume.
pub struct BlockBuilder<'a, 'r> {
    cur: Cursor<'a>,
    classifier: MarkdownLineClassifier,
    ctx: InlineContext<'r>,
    numbering: ListNumbering,
    errors: Vec<SyntaxError>,
}

impl<'a, 'r> BlockBuilder<'a, 'r> {
    pub fn new(
        cur: Cursor<'a>,
        classifier: MarkdownLineClassifier,
        ctx: InlineContext<'r>,
        errors: Vec<SyntaxError>,
    ) -> Self {
        Self {
            cur,
            classifier,
            ctx,
            numbering: ListNumbering::default(),
            errors,
        }
    }

    /// Parses every block; returns them with all recorded syntax errors in source order.
    pub fn build(mut self) -> Result<(Vec<BlockItem>, Vec<SyntaxError>), CursorError> {
        let mut out = vec![];
        loop {
            while !self.cur.at_end() && self.cur.is_blank_to_end_of_line() {
                self.cur.skip_line();
            }
            if self.cur.at_end() {
                break;
            }
            debug_assert_eq!(self.cur.col(), 0, "blocks start at a line start");
            let class = self.classifier.classify(self.cur.lines(), self.cur.row());
            let block = self.block(class)?;
            log::debug!("{} at row {}", block.kind_name(), class.row);
            if !matches!(block, BlockItem::ListItem { .. }) {
                self.numbering.interrupt();
            }
            out.push(block);
        }
        self.errors.sort_by_key(|e| e.position);
        Ok((out, self.errors))
    }

    fn block(&mut self, class: LineClass) -> Result<BlockItem, CursorError> {
        match class.kind {
            LineKind::Heading { level } => self.heading(level),
            LineKind::Fence { fence } => match self.fenced_code(class, fence)? {
                Some(code) => Ok(code),
                None => self.fallback(class),
            },
            LineKind::Rule => self.rule(),
            LineKind::Footnote => match self.footnote()? {
                Some(footnote) => Ok(footnote),
                None => self.fallback(class),
            },
            LineKind::Quote => self.quote(),
            LineKind::Table => self.table(),
            LineKind::ListItem { marker } => self.list_item(class, marker),
            LineKind::IndentedCode => self.indented_code(class),
            LineKind::Paragraph | LineKind::Blank => self.paragraph(class),
        }
    }

    /// Where a line goes when its own production failed.
    fn fallback(&mut self, class: LineClass) -> Result<BlockItem, CursorError> {
        if self.classifier.indented_code && class.indent >= IndentedCode::MIN_INDENT {
            self.indented_code(class)
        } else {
            self.paragraph(class)
        }
    }

    /// Start of the first line after `row` that does not continue the block.
    fn block_limit(&self, row: usize) -> Result<Position, CursorError> {
        let lines = self.cur.lines();
        let mut next = row + 1;
        while self.classifier.continues(lines, next) {
            next += 1;
        }
        self.cur.pos_at(next, 0)
    }

    fn inline(
        &mut self,
        limit: Position,
        continuation: Continuation,
    ) -> Result<InlineContent, CursorError> {
        parse_inline(&mut self.cur, limit, continuation, self.ctx)
    }

    fn heading(&mut self, level: u8) -> Result<BlockItem, CursorError> {
        let row = self.cur.row();
        self.cur.skip_whitespace();
        let start = self.cur.pos();
        self.cur.advance_by(isize::from(level) + 1)?;
        let marker = self.cur.range_from(start);
        self.cur.skip_whitespace();
        let limit = self.block_limit(row)?;
        let content = self.inline(limit, Continuation::Plain)?;
        Ok(BlockItem::Heading {
            level,
            placement: block_placement(vec![marker], &content),
            content: content.items,
        })
    }

    /// Reads a fenced code block. An unterminated block is reported and the
    /// cursor is left on the fence line.
    fn fenced_code(
        &mut self,
        class: LineClass,
        fence: &'static str,
    ) -> Result<Option<BlockItem>, CursorError> {
        let code = self.cur.attempt(|cur| read_fenced(cur, fence))?;
        if code.is_none() {
            let at = self.cur.pos_at(class.row, class.content_col)?;
            let error = SyntaxError::new(at, SyntaxErrorKind::UnterminatedBlock, Some(fence));
            log::warn!("{error}");
            self.errors.push(error);
        }
        Ok(code)
    }

    fn rule(&mut self) -> Result<BlockItem, CursorError> {
        self.cur.skip_whitespace();
        let start = self.cur.pos();
        let dashes = self.cur.rest_of_line().trim_end().chars().count();
        self.cur.advance_by(dashes as isize)?;
        let markup = self.cur.range_from(start);
        self.cur.skip_line();
        Ok(BlockItem::HorizontalLine {
            placement: Placement::markup_only(vec![markup]),
        })
    }

    fn footnote(&mut self) -> Result<Option<BlockItem>, CursorError> {
        self.cur.attempt(|cur| {
            cur.skip_whitespace();
            let Some(declaration) = read_declaration(cur)? else {
                return Ok(None);
            };
            let Some(reference) = declaration.to_ref() else {
                return Ok(None);
            };
            cur.skip_line();
            let body = declaration.spec.map(|(_, range)| range);
            Ok(Some(BlockItem::Footnote {
                reference,
                placement: Placement::new(vec![declaration.head], body),
            }))
        })
    }

    fn quote(&mut self) -> Result<BlockItem, CursorError> {
        let row = self.cur.row();
        self.cur.skip_whitespace();
        let start = self.cur.pos();
        self.cur.expect(BlockQuote::PREFIX);
        self.cur.expect(" ");
        let prefix = self.cur.range_from(start);

        let lines = self.cur.lines();
        let mut next = row + 1;
        while !lines.is_blank(next)
            && lines.get(next).is_some_and(|line| {
                BlockQuote::is_quote(line.slice(line.leading_whitespace(), line.len()))
            })
        {
            next += 1;
        }
        let limit = self.cur.pos_at(next, 0)?;

        let content = self.inline(limit, Continuation::Quote)?;
        Ok(BlockItem::Quote {
            placement: block_placement(vec![prefix], &content),
            content: content.items,
        })
    }

    fn table(&mut self) -> Result<BlockItem, CursorError> {
        let mut markups = vec![];
        let start = {
            let row = self.cur.row();
            let col = self.cur.lines().get(row).map_or(0, |line| line.leading_whitespace());
            self.cur.pos_at(row, col)?
        };
        let mut end = start;

        let header = self.table_row(&mut markups, &mut end)?;

        self.cur.skip_whitespace();
        let delimiter_start = self.cur.pos();
        let delimiter = self.cur.rest_of_line().trim_end();
        let alignments = Table::alignments(delimiter).unwrap_or_default();
        self.cur.advance_by(delimiter.chars().count() as isize)?;
        markups.push(self.cur.range_from(delimiter_start));
        end = self.cur.pos();
        self.cur.skip_line();

        let mut body = vec![];
        while !self.cur.at_end() && self.is_body_row(self.cur.row()) {
            body.push(self.table_row(&mut markups, &mut end)?);
        }

        markups.sort();
        Ok(BlockItem::Table {
            header,
            alignments,
            body,
            placement: Placement::new(markups, Some(SourceRange::new(start, end))),
        })
    }

    fn is_body_row(&self, row: usize) -> bool {
        let lines = self.cur.lines();
        !lines.is_blank(row)
            && lines
                .get(row)
                .is_some_and(|line| Table::is_row(line.slice(line.leading_whitespace(), line.len())))
    }

    /// Parses the cells of the row under the cursor and moves to the next line.
    fn table_row(
        &mut self,
        markups: &mut Vec<SourceRange>,
        end: &mut Position,
    ) -> Result<Row, CursorError> {
        let row = self.cur.row();
        let text = self.cur.lines().get(row).map_or("", |line| line.text);
        let trimmed_len = text.trim_end().chars().count();
        let pipes = Table::pipe_columns(text);

        let mut bounds: Vec<(usize, usize)> = pipes.windows(2).map(|w| (w[0] + 1, w[1])).collect();
        if let Some(&last) = pipes.last()
            && last + 1 < trimmed_len
        {
            bounds.push((last + 1, trimmed_len));
        }
        for &pipe in &pipes {
            markups.push(SourceRange::new(
                self.cur.pos_at(row, pipe)?,
                self.cur.pos_at(row, pipe + 1)?,
            ));
        }

        let mut cells = Vec::with_capacity(bounds.len());
        for (from, to) in bounds {
            self.cur.advance_by(from as isize - self.cur.col() as isize)?;
            self.cur.skip_whitespace();
            let limit = self.cur.pos_at(row, to)?;
            let content = self.inline(limit, Continuation::Plain)?;
            markups.extend(content.block_markups);
            cells.push(content.items);
        }

        *end = self.cur.pos_at(row, trimmed_len)?;
        self.cur.skip_line();
        Ok(cells)
    }

    fn list_item(&mut self, class: LineClass, marker: ListMarker) -> Result<BlockItem, CursorError> {
        self.cur.skip_whitespace();
        let start = self.cur.pos();
        self.cur.advance_by(marker.len as isize + 1)?;
        let marker_range = self.cur.range_from(start);
        self.cur.skip_whitespace();
        let limit = self.block_limit(class.row)?;
        let content = self.inline(limit, Continuation::Plain)?;

        let level = Paragraph::indent_level(class.indent);
        let number = self.numbering.item(level, &marker);
        Ok(BlockItem::ListItem {
            list_type: marker.list_type,
            level,
            number,
            placement: block_placement(vec![marker_range], &content),
            content: content.items,
        })
    }

    fn indented_code(&mut self, class: LineClass) -> Result<BlockItem, CursorError> {
        let tab_size = self.classifier.tab_size;
        let lines = self.cur.lines();
        let mut last = class.row;
        let mut next = class.row + 1;
        while let Some(line) = lines.get(next) {
            if line.is_blank() {
                next += 1;
                continue;
            }
            if line.indent_width(tab_size) < IndentedCode::MIN_INDENT {
                break;
            }
            last = next;
            next += 1;
        }

        let text = (class.row..=last)
            .filter_map(|row| lines.get(row))
            .map(|line| IndentedCode::strip(line.text, tab_size))
            .collect::<Vec<_>>()
            .join("\n");
        let last_len = lines.get(last).map_or(0, |line| line.len());
        let body = SourceRange::new(
            self.cur.pos_at(class.row, 0)?,
            self.cur.pos_at(last, last_len)?,
        );
        for _ in class.row..=last {
            self.cur.skip_line();
        }

        let placement = Placement::body_only(body);
        Ok(BlockItem::Code {
            content: vec![InlineItem::Code {
                text: text.clone(),
                placement: placement.clone(),
            }],
            text,
            language: None,
            indent_level: Some(Paragraph::indent_level(class.indent)),
            placement,
        })
    }

    fn paragraph(&mut self, class: LineClass) -> Result<BlockItem, CursorError> {
        self.cur.skip_whitespace();
        let limit = self.block_limit(class.row)?;
        let content = self.inline(limit, Continuation::Plain)?;
        Ok(BlockItem::Paragraph {
            indent: Paragraph::indent_level(class.indent),
            placement: block_placement(vec![], &content),
            content: content.items,
        })
    }
}

/// Block markups followed by whatever the inline parser handed up, in source order.
fn block_placement(mut markups: Vec<SourceRange>, content: &InlineContent) -> Placement {
    markups.extend(content.block_markups.iter().copied());
    markups.sort();
    Placement::new(markups, Some(content.body))
}

/// Reads a fenced block from its opening line. `None` if no closing fence follows.
fn read_fenced(cur: &mut Cursor<'_>, fence: &str) -> Result<Option<BlockItem>, CursorError> {
    cur.skip_whitespace();
    let start = cur.pos();
    if !cur.expect(fence) {
        return Ok(None);
    }
    let info = cur.rest_of_line();
    let language = CodeFence::language(info);
    cur.advance_by(info.chars().count() as isize)?;
    let open = cur.range_from(start);
    cur.skip_line();

    let body_start = cur.pos();
    let mut body_end = body_start;
    let mut lines = vec![];
    while !cur.at_end() {
        let line = cur.rest_of_line();
        if CodeFence::closes(line, fence) {
            cur.skip_whitespace();
            let close_start = cur.pos();
            cur.advance_by(fence.chars().count() as isize)?;
            let close = cur.range_from(close_start);
            cur.skip_line();

            let text = lines.join("\n");
            let placement =
                Placement::new(vec![open, close], Some(SourceRange::new(body_start, body_end)));
            return Ok(Some(BlockItem::Code {
                content: vec![InlineItem::Code {
                    text: text.clone(),
                    placement: placement.clone(),
                }],
                text,
                language,
                indent_level: None,
                placement,
            }));
        }
        lines.push(line);
        cur.advance_by(line.chars().count() as isize)?;
        body_end = cur.pos();
        cur.skip_line();
    }
    Ok(None)
}
