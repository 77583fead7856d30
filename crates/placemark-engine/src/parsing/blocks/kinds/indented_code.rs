use crate::parsing::cursor::lines::expand_tabs;

use super::Paragraph;

/// Code written as lines indented by at least one indentation unit.
pub struct IndentedCode;

impl IndentedCode {
    pub const MIN_INDENT: usize = Paragraph::INDENT_UNIT;

    /// Removes the first indentation unit, after expanding tabs.
    pub fn strip(line: &str, tab_size: usize) -> String {
        let expanded = expand_tabs(line, tab_size);
        let cut = expanded
            .chars()
            .take(Self::MIN_INDENT)
            .take_while(|c| *c == ' ')
            .count();
        expanded[cut..].to_string()
    }
}
