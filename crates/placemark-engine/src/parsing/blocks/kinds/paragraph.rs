/// Paragraph block type.
///
/// Paragraphs have no delimiters: they are the fallback when no other block
/// opens on a line. Their only syntax is indentation.
pub struct Paragraph;

impl Paragraph {
    /// Columns per indentation level, for paragraphs and list items alike.
    pub const INDENT_UNIT: usize = 4;

    pub fn indent_level(indent: usize) -> usize {
        indent / Self::INDENT_UNIT
    }
}
