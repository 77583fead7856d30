/// Code span inline type with owned delimiter constant.
///
/// A code span is one more style family: it may overlap emphasis and
/// strike-through spans without suppressing them.
pub struct CodeSpan;

impl CodeSpan {
    /// The backtick that opens and closes a code span.
    pub const TICK: &'static str = "`";
    pub const TOKENS: &'static [&'static str] = &[Self::TICK];
}
