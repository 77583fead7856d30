pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';
    pub const MAX_LEVEL: usize = 7;

    /// Level of a heading line: 1 to 7 markers followed by a space.
    pub fn level(rest: &str) -> Option<u8> {
        let level = rest.chars().take_while(|c| *c == Self::MARKER).count();
        let spaced = rest[level..].starts_with(' ');
        ((1..=Self::MAX_LEVEL).contains(&level) && spaced).then_some(level as u8)
    }
}
