/// A horizontal rule: three or more dashes alone on a line.
pub struct ThematicBreak;

impl ThematicBreak {
    pub const DASH: char = '-';
    pub const MIN_DASHES: usize = 3;

    pub fn is_rule(rest: &str) -> bool {
        let dashes = rest.chars().take_while(|c| *c == Self::DASH).count();
        dashes >= Self::MIN_DASHES && rest[dashes..].chars().all(char::is_whitespace)
    }
}
