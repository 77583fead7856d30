//! # References
//!
//! Named link targets used by links and images.
//!
//! Footnote declarations (`[name]: url "title"`) may appear anywhere in the
//! document, including after their first use, so [`prescan`] collects them in
//! a single forward pass before block parsing starts. Inline and external
//! references are created later, while inline content is parsed.

pub mod resolver;

use std::collections::HashMap;

use serde::Serialize;

use crate::parsing::{
    cursor::Cursor,
    error::{CursorError, SyntaxError, SyntaxErrorKind},
    inline::kinds::LinkSyntax,
    position::SourceRange,
};

pub use resolver::{LinkResolver, NoLinks};

/// Where a reference's target was defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RefKind {
    /// `[name](link)`
    Inline,
    /// `[name]` or `[name][id]`, resolved against a `[id]: link` declaration.
    Footnote,
    /// `[name]` resolved by the caller-supplied [`LinkResolver`].
    External,
}

/// A resolved link target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ref {
    pub name: String,
    pub link: String,
    pub title: Option<String>,
    pub kind: RefKind,
}

impl Ref {
    /// Builds a reference from a link spec such as `url` or `url "title"`.
    pub fn from_spec(name: impl Into<String>, spec: &str, kind: RefKind) -> Self {
        let (link, title) = split_link_and_title(spec);
        Self {
            name: name.into(),
            link,
            title,
            kind,
        }
    }
}

/// Splits `url "title"` into its parts.
///
/// The link spec is cut at the first space. If what follows is a single
/// double-quoted token it becomes the title; otherwise the whole spec is the
/// link.
pub fn split_link_and_title(spec: &str) -> (String, Option<String>) {
    if let Some((link, rest)) = spec.split_once(' ') {
        let rest = rest.trim();
        let quoted = rest.len() >= 2
            && rest.starts_with(LinkSyntax::TITLE_QUOTE)
            && rest.ends_with(LinkSyntax::TITLE_QUOTE)
            && !rest.contains(char::is_whitespace);
        if quoted {
            return (link.to_string(), Some(rest[1..rest.len() - 1].to_string()));
        }
    }
    (spec.to_string(), None)
}

/// A `[name]: spec` line as read from the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// `[name]:` plus the whitespace after the colon.
    pub head: SourceRange,
    /// The link spec with trailing whitespace removed; `None` when nothing follows the colon.
    pub spec: Option<(String, SourceRange)>,
}

impl Declaration {
    pub fn to_ref(&self) -> Option<Ref> {
        self.spec
            .as_ref()
            .map(|(spec, _)| Ref::from_spec(self.name.clone(), spec, RefKind::Footnote))
    }
}

/// Reads a footnote declaration at the cursor.
///
/// On success the cursor stays at the end of the link spec (before any trailing
/// whitespace); otherwise it does not move.
pub fn read_declaration(cur: &mut Cursor<'_>) -> Result<Option<Declaration>, CursorError> {
    cur.attempt(|cur| {
        let start = cur.pos();
        let Some(name) = cur.read_braced_in_line(LinkSyntax::OPEN, LinkSyntax::CLOSE, Some(LinkSyntax::ESCAPE))
        else {
            return Ok(None);
        };
        if cur.current() != Some(LinkSyntax::DECLARATION) {
            return Ok(None);
        }
        cur.advance()?;
        cur.skip_whitespace();
        let head = cur.range_from(start);

        let spec_start = cur.pos();
        let spec = cur.rest_of_line().trim_end();
        if spec.is_empty() {
            return Ok(Some(Declaration {
                name,
                head,
                spec: None,
            }));
        }
        let spec = spec.to_string();
        cur.advance_by(spec.chars().count() as isize)?;
        let range = cur.range_from(spec_start);
        Ok(Some(Declaration {
            name,
            head,
            spec: Some((spec, range)),
        }))
    })
}

/// Footnote references of one document, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    footnotes: HashMap<String, Ref>,
}

impl ReferenceTable {
    pub fn get(&self, name: &str) -> Option<&Ref> {
        self.footnotes.get(name)
    }

    /// Later declarations replace earlier ones with the same name.
    pub fn insert(&mut self, reference: Ref) {
        self.footnotes.insert(reference.name.clone(), reference);
    }

    pub fn len(&self) -> usize {
        self.footnotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.footnotes.is_empty()
    }
}

/// Collects every footnote declaration of the document.
///
/// Declarations with nothing after the colon are reported in `errors`. The
/// cursor is returned to where it started.
pub fn prescan(
    cur: &mut Cursor<'_>,
    errors: &mut Vec<SyntaxError>,
) -> Result<ReferenceTable, CursorError> {
    let mark = cur.mark();
    let mut table = ReferenceTable::default();
    while !cur.at_end() {
        cur.skip_whitespace();
        if let Some(declaration) = read_declaration(cur)? {
            match declaration.to_ref() {
                Some(reference) => {
                    log::debug!("footnote [{}] -> {}", reference.name, reference.link);
                    table.insert(reference);
                }
                None => {
                    let error = SyntaxError::new(
                        declaration.head.start,
                        SyntaxErrorKind::MalformedFootnote,
                        Some(&declaration.name),
                    );
                    log::warn!("{error}");
                    errors.push(error);
                }
            }
        }
        cur.skip_line();
    }
    cur.rewind(mark);
    Ok(table)
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::parsing::position::Position;

    #[rstest]
    #[case("http://x", "http://x", None)]
    #[case("http://x \"Home\"", "http://x", Some("Home"))]
    #[case("http://x   \"Home\"  ", "http://x", Some("Home"))]
    #[case("http://x \"two words\"", "http://x \"two words\"", None)]
    #[case("http://x Home", "http://x Home", None)]
    #[case("http://x \"", "http://x \"", None)]
    fn splits_link_and_title(
        #[case] spec: &str,
        #[case] link: &str,
        #[case] title: Option<&str>,
    ) {
        let (l, t) = split_link_and_title(spec);
        assert_eq!(l, link);
        assert_eq!(t.as_deref(), title);
    }

    #[test]
    fn reads_declaration_ranges() {
        let mut cur = Cursor::new("[f1]:  http://x \"T\"  \nnext");
        let decl = read_declaration(&mut cur).unwrap().unwrap();
        assert_eq!(decl.name, "f1");
        assert_eq!(decl.head.slice(cur.source()), "[f1]:  ");
        let (spec, range) = decl.spec.unwrap();
        assert_eq!(spec, "http://x \"T\"");
        assert_eq!(range.slice(cur.source()), "http://x \"T\"");
        assert_eq!(cur.pos(), Position::new(0, 19, 19));
    }

    #[test]
    fn not_a_declaration_leaves_cursor() {
        let mut cur = Cursor::new("[f1] text");
        assert_eq!(read_declaration(&mut cur).unwrap(), None);
        assert_eq!(cur.col(), 0);
    }

    #[test]
    fn prescan_collects_forward_declarations() {
        let text = "see [a] and [b]\n\n[a]: http://a\n  [b]: http://b \"Bee\"\n";
        let mut cur = Cursor::new(text);
        let mut errors = vec![];
        let table = prescan(&mut cur, &mut errors).unwrap();
        assert!(errors.is_empty());
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("a").unwrap().link, "http://a");
        let b = table.get("b").unwrap();
        assert_eq!(b.title.as_deref(), Some("Bee"));
        assert_eq!(b.kind, RefKind::Footnote);
        assert_eq!(cur.pos(), Position::new(0, 0, 0));
    }

    #[test]
    fn prescan_last_declaration_wins() {
        let mut cur = Cursor::new("[a]: first\n[a]: second");
        let table = prescan(&mut cur, &mut vec![]).unwrap();
        assert_eq!(table.get("a").unwrap().link, "second");
    }

    #[test]
    fn prescan_reports_blank_declarations() {
        let mut cur = Cursor::new("text\n[empty]:   \n");
        let mut errors = vec![];
        let table = prescan(&mut cur, &mut errors).unwrap();
        assert!(table.is_empty());
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, SyntaxErrorKind::MalformedFootnote);
        assert_eq!(errors[0].position, Position::new(1, 0, 5));
        assert_eq!(errors[0].message, "malformed footnote empty");
    }
}
