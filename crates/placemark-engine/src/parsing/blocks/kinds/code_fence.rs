pub struct CodeFence;

impl CodeFence {
    pub const BACKTICKS: &'static str = "```";
    pub const TILDES: &'static str = "~~~";

    /// The fence a line opens with, if any.
    pub fn open(rest: &str) -> Option<&'static str> {
        [Self::BACKTICKS, Self::TILDES]
            .into_iter()
            .find(|fence| rest.starts_with(fence))
    }

    /// A closing line holds the opening fence and nothing else but whitespace.
    pub fn closes(line: &str, fence: &str) -> bool {
        line.trim() == fence
    }

    /// The info string after the opening fence; `None` when blank.
    pub fn language(info: &str) -> Option<String> {
        let info = info.trim();
        (!info.is_empty()).then(|| info.to_string())
    }
}
