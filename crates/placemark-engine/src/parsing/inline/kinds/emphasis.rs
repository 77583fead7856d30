/// `***bold italic***` or `___bold italic___`.
pub struct StrongEmphasis;

impl StrongEmphasis {
    pub const TOKENS: &'static [&'static str] = &["***", "___"];
}

/// `**bold**` or `__bold__`.
pub struct Strong;

impl Strong {
    pub const TOKENS: &'static [&'static str] = &["**", "__"];
}

/// `*italic*` or `_italic_`.
pub struct Emphasis;

impl Emphasis {
    pub const TOKENS: &'static [&'static str] = &["*", "_"];
}

pub struct StrikeThrough;

impl StrikeThrough {
    pub const TOKENS: &'static [&'static str] = &["~~"];
}
