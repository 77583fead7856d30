use crate::parsing::inline::kinds::LinkSyntax;

/// `[name]: link "title"` on a line of its own.
pub struct FootnoteDeclaration;

impl FootnoteDeclaration {
    /// Splits a declaration line into name and trimmed spec.
    ///
    /// A backslash protects a closing bracket inside the name.
    pub fn split(rest: &str) -> Option<(&str, &str)> {
        let body = rest.strip_prefix(LinkSyntax::OPEN)?;
        let mut chars = body.char_indices();
        while let Some((i, c)) = chars.next() {
            if c == LinkSyntax::ESCAPE && body[i + 1..].starts_with(LinkSyntax::CLOSE) {
                chars.next();
                continue;
            }
            if c == LinkSyntax::CLOSE {
                let spec = body[i + 1..].strip_prefix(LinkSyntax::DECLARATION)?;
                return Some((&body[..i], spec.trim()));
            }
        }
        None
    }

    /// True for declarations with a non-blank spec; blank ones are not blocks.
    pub fn is_declaration(rest: &str) -> bool {
        Self::split(rest).is_some_and(|(_, spec)| !spec.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_declarations() {
        assert_eq!(
            FootnoteDeclaration::split("[f1]: http://x \"T\""),
            Some(("f1", "http://x \"T\""))
        );
        assert_eq!(FootnoteDeclaration::split(r"[a\]b]:x"), Some((r"a\]b", "x")));
        assert_eq!(FootnoteDeclaration::split("[f1] text"), None);
        assert_eq!(FootnoteDeclaration::split("[f1"), None);
    }

    #[test]
    fn blank_spec_is_not_a_declaration() {
        assert!(FootnoteDeclaration::is_declaration("[a]: x"));
        assert!(!FootnoteDeclaration::is_declaration("[a]:   "));
        assert!(!FootnoteDeclaration::is_declaration("see [a]: x"));
    }
}
