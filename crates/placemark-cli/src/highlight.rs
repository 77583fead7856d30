//! Maps placements onto source lines for the viewer.

use placemark_engine::{BlockItem, Placement, SourceRange};

/// How a source character relates to the selected block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mark {
    None,
    Body,
    Markup,
}

/// Every range of `block` and its inline items, tagged with its mark.
pub fn block_ranges(block: &BlockItem) -> Vec<(SourceRange, Mark)> {
    let mut ranges = vec![];
    let mut add = |placement: &Placement| {
        ranges.extend(placement.body.map(|body| (body, Mark::Body)));
        ranges.extend(placement.markups.iter().map(|markup| (*markup, Mark::Markup)));
    };
    add(block.placement());
    for item in block.inlines() {
        add(item.placement());
    }
    ranges
}

/// Splits line `row` into runs of equally marked characters.
///
/// Markup wins over body where ranges overlap. A line terminator covered by
/// a range is not drawn.
pub fn line_runs(text: &str, row: usize, ranges: &[(SourceRange, Mark)]) -> Vec<(String, Mark)> {
    let mark_at = |col: usize| {
        let mut mark = Mark::None;
        for (range, kind) in ranges {
            let start = (range.start.row, range.start.col);
            let end = (range.end.row, range.end.col);
            if start <= (row, col) && (row, col) < end {
                match kind {
                    Mark::Markup => return Mark::Markup,
                    Mark::Body => mark = Mark::Body,
                    Mark::None => {}
                }
            }
        }
        mark
    };

    let mut runs: Vec<(String, Mark)> = vec![];
    for (col, c) in text.chars().enumerate() {
        let mark = mark_at(col);
        match runs.last_mut() {
            Some((run, last)) if *last == mark => run.push(c),
            _ => runs.push((c.to_string(), mark)),
        }
    }
    runs
}
