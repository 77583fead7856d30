/// Delimiters of link, image and footnote syntax.
///
/// `[name](spec)`, `[name][other]`, `[name]`, `![name](spec)` and the
/// declaration form `[name]: spec`.
pub struct LinkSyntax;

impl LinkSyntax {
    pub const OPEN: char = '[';
    pub const CLOSE: char = ']';
    pub const SPEC_OPEN: char = '(';
    pub const SPEC_CLOSE: char = ')';
    pub const IMAGE: char = '!';
    pub const ESCAPE: char = '\\';
    /// Follows the closing bracket of a footnote declaration.
    pub const DECLARATION: char = ':';
    /// Wraps an optional title after the link: `url "title"`.
    pub const TITLE_QUOTE: char = '"';

    /// Characters that a backslash turns into literal text.
    pub fn is_escapable(c: char) -> bool {
        matches!(c, '\\' | '[' | ']')
    }
}
