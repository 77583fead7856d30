/// Blockquote block type with owned delimiter constant.
pub struct BlockQuote;

impl BlockQuote {
    /// The blockquote prefix.
    pub const PREFIX: &'static str = ">";

    /// True if a line (after its indentation) starts a quote.
    pub fn is_quote(rest: &str) -> bool {
        rest.starts_with(Self::PREFIX)
    }
}
