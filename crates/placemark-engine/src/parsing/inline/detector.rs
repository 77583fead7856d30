//! Open/close state machines for the inline style families.
//!
//! Each [`Detector`] is either outside its family or inside it with the
//! token that opened it. A token opens only after a word boundary and only if
//! a possible closer for it appears later in the block; it closes only before
//! a non-alphanumeric character. Anything else is literal text.
//!
//! A closer never comes from the delimiter run the opener was taken from:
//! in `**bold` the second `*` cannot close an emphasis opened by the first.

use crate::parsing::{
    cursor::Cursor,
    error::CursorError,
    position::{Position, SourceRange},
};

use super::kinds::{CodeSpan, Emphasis, StrikeThrough, Strong, StrongEmphasis};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleFamily {
    StrongEmphasis,
    Strong,
    Emphasis,
    StrikeThrough,
    CodeSpan,
}

impl StyleFamily {
    /// Evaluation order: longer tokens first, so `***` is never read as `**` + `*`.
    pub const ALL: [StyleFamily; 5] = [
        StyleFamily::StrongEmphasis,
        StyleFamily::Strong,
        StyleFamily::Emphasis,
        StyleFamily::StrikeThrough,
        StyleFamily::CodeSpan,
    ];

    pub fn tokens(self) -> &'static [&'static str] {
        match self {
            StyleFamily::StrongEmphasis => StrongEmphasis::TOKENS,
            StyleFamily::Strong => Strong::TOKENS,
            StyleFamily::Emphasis => Emphasis::TOKENS,
            StyleFamily::StrikeThrough => StrikeThrough::TOKENS,
            StyleFamily::CodeSpan => CodeSpan::TOKENS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Open,
    Close,
}

/// A consumed style token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub family: StyleFamily,
    pub kind: TransitionKind,
    pub token: SourceRange,
}

#[derive(Debug, Clone)]
pub struct Detector {
    family: StyleFamily,
    /// The opening token and the position right after it.
    active: Option<(&'static str, Position)>,
}

impl Detector {
    pub fn new(family: StyleFamily) -> Self {
        Self {
            family,
            active: None,
        }
    }

    pub fn family(&self) -> StyleFamily {
        self.family
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Tries to consume an opening or closing token at the cursor.
    ///
    /// The token must end at or before `limit`, which also bounds the
    /// lookahead for a matching closer. Without a transition the cursor does
    /// not move.
    pub fn try_consume(
        &mut self,
        cur: &mut Cursor<'_>,
        limit: Position,
    ) -> Result<Option<Transition>, CursorError> {
        let family = self.family;
        let active = &mut self.active;
        cur.attempt(|cur| {
            let start = cur.pos();
            let prev = cur.prev_in_line();
            let Some(token) = cur.expect_any(family.tokens()) else {
                return Ok(None);
            };
            if cur.pos() > limit {
                return Ok(None);
            }
            let kind = match *active {
                None => {
                    if prev.is_some_and(char::is_alphanumeric) {
                        return Ok(None);
                    }
                    if find_closer(cur, token, limit).is_none() {
                        return Ok(None);
                    }
                    *active = Some((token, cur.pos()));
                    TransitionKind::Open
                }
                Some((open, opened)) => {
                    if token != open
                        || cur.current().is_some_and(char::is_alphanumeric)
                        || in_run(cur, opened, start, token)
                    {
                        return Ok(None);
                    }
                    *active = None;
                    TransitionKind::Close
                }
            };
            let token = cur.range_from(start);
            log::trace!("{family:?} {kind:?} at {token}");
            Ok(Some(Transition {
                family,
                kind,
                token,
            }))
        })
    }
}

/// True if everything from `run_start` up to `at` repeats the first
/// character of `token`, on one line.
fn in_run(cur: &Cursor<'_>, run_start: Position, at: Position, token: &str) -> bool {
    let Some(delimiter) = token.chars().next() else {
        return false;
    };
    at.row == run_start.row
        && at.col >= run_start.col
        && cur
            .lines()
            .get(at.row)
            .is_some_and(|line| line.slice(run_start.col, at.col).chars().all(|c| c == delimiter))
}

/// The first later occurrence of `token` that could close a span opened
/// right before the cursor: past the rest of the opening run and not
/// followed by an alphanumeric character.
fn find_closer(cur: &Cursor<'_>, token: &str, limit: Position) -> Option<Position> {
    let opened = cur.pos();
    let delimiter = token.chars().next()?;
    let token_len = token.chars().count();
    let line = cur.lines().get(opened.row)?;
    let mut run_end = opened.col;
    while line.char_at(run_end) == Some(delimiter) {
        run_end += 1;
    }

    let mut from = cur.pos_at(opened.row, run_end).ok()?;
    while let Some(found) = cur.find_in_block_from(from, token, Some(limit)) {
        let after = cur
            .lines()
            .get(found.row)
            .and_then(|line| line.char_at(found.col + token_len));
        if !after.is_some_and(char::is_alphanumeric) {
            return Some(found);
        }
        from = cur.pos_at(found.row, found.col + 1).ok()?;
    }
    None
}

/// Style flags in effect for the text being accumulated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub bold: bool,
    pub italic: bool,
    pub strike_through: bool,
    pub code: bool,
}

/// All five detectors of one block's inline content.
#[derive(Debug, Clone)]
pub struct Detectors {
    detectors: [Detector; 5],
}

impl Default for Detectors {
    fn default() -> Self {
        Self {
            detectors: StyleFamily::ALL.map(Detector::new),
        }
    }
}

impl Detectors {
    fn is_active(&self, family: StyleFamily) -> bool {
        self.detectors
            .iter()
            .any(|d| d.family() == family && d.is_active())
    }

    pub fn style(&self) -> Style {
        let strong_emphasis = self.is_active(StyleFamily::StrongEmphasis);
        Style {
            bold: strong_emphasis || self.is_active(StyleFamily::Strong),
            italic: strong_emphasis || self.is_active(StyleFamily::Emphasis),
            strike_through: self.is_active(StyleFamily::StrikeThrough),
            code: self.is_active(StyleFamily::CodeSpan),
        }
    }

    /// Offers the cursor position to each detector in evaluation order; the
    /// first transition wins. Families are independent, so a code span may
    /// overlap any other style.
    pub fn offer(
        &mut self,
        cur: &mut Cursor<'_>,
        limit: Position,
    ) -> Result<Option<Transition>, CursorError> {
        for detector in &mut self.detectors {
            if let Some(transition) = detector.try_consume(cur, limit)? {
                return Ok(Some(transition));
            }
        }
        Ok(None)
    }
}
