use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::blocks::types::Alignment;

/// Pipe tables: a header row, a delimiter row, then body rows.
///
/// ```text
/// | name | size |
/// | :--- | ---: |
/// | a    | 1    |
/// ```
pub struct Table;

impl Table {
    pub const PIPE: char = '|';
    pub const ESCAPE: char = '\\';

    /// Rows start with a pipe.
    pub fn is_row(rest: &str) -> bool {
        rest.starts_with(Self::PIPE)
    }

    /// Alignments of a delimiter row such as `| --- | :-: | --: |`.
    pub fn alignments(rest: &str) -> Option<Vec<Alignment>> {
        static DELIMITER: OnceLock<Regex> = OnceLock::new();
        let delimiter = DELIMITER
            .get_or_init(|| Regex::new(r"^(:?)-+(:?)$").expect("Invalid delimiter regex"));

        let inner = rest.trim().strip_prefix(Self::PIPE)?;
        let inner = inner.strip_suffix(Self::PIPE).unwrap_or(inner);
        inner
            .split(Self::PIPE)
            .map(|cell| {
                let caps = delimiter.captures(cell.trim())?;
                let left = !caps[1].is_empty();
                let right = !caps[2].is_empty();
                Some(match (left, right) {
                    (true, true) => Alignment::Center,
                    (false, true) => Alignment::End,
                    _ => Alignment::Start,
                })
            })
            .collect()
    }

    /// Character columns of the unescaped pipes in a row.
    pub fn pipe_columns(line: &str) -> Vec<usize> {
        let mut pipes = vec![];
        let mut chars = line.chars().enumerate().peekable();
        while let Some((col, c)) = chars.next() {
            if c == Self::ESCAPE && chars.peek().is_some_and(|(_, next)| *next == Self::PIPE) {
                chars.next();
            } else if c == Self::PIPE {
                pipes.push(col);
            }
        }
        pipes
    }
}
