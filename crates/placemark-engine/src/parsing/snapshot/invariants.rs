use crate::parsing::{Document, cursor::SourceLines, position::SourceRange};

/// Lists every placement invariant `doc` breaks, as readable messages.
///
/// - every range lies inside the source and its positions agree with the
///   source's rows, columns and byte offsets
/// - every inline body nests in its block's body (or extent, for blocks
///   without a body)
/// - no inline markup overlaps that node's own body
pub fn violations(doc: &Document) -> Vec<String> {
    let lines = SourceLines::new(&doc.source_text);
    let mut found = vec![];

    let check_range = |what: &str, range: &SourceRange, found: &mut Vec<String>| {
        for pos in [range.start, range.end] {
            if lines.pos_at(pos.row, pos.col) != Ok(pos) {
                found.push(format!("{what}: {pos} (offset {}) is not in the source", pos.offset));
            }
        }
        if range.start > range.end {
            found.push(format!("{what}: inverted range {range}"));
        }
    };

    for (index, block) in doc.blocks.iter().enumerate() {
        let placement = block.placement();
        let name = format!("block {index} ({})", block.kind_name());
        for markup in &placement.markups {
            check_range(&name, markup, &mut found);
        }
        if let Some(body) = &placement.body {
            check_range(&name, body, &mut found);
        }
        let outer = placement.body.or_else(|| placement.extent());

        for item in block.inlines() {
            let inner = item.placement();
            let name = format!("{name} inline {:?}", item.text());
            for markup in &inner.markups {
                check_range(&name, markup, &mut found);
            }
            let Some(body) = &inner.body else {
                found.push(format!("{name}: inline node without body"));
                continue;
            };
            check_range(&name, body, &mut found);
            if let Some(outer) = outer
                && !outer.contains_range(body)
            {
                found.push(format!("{name}: body {body} outside block range {outer}"));
            }
            for markup in &inner.markups {
                if markup.overlaps(body) {
                    found.push(format!("{name}: markup {markup} overlaps body {body}"));
                }
            }
        }
    }
    found
}

/// Validates parser output invariants.
///
/// # Panics
/// Panics with every violation found by [`violations`].
pub fn check(doc: &Document) {
    let found = violations(doc);
    assert!(
        found.is_empty(),
        "placement invariants violated:\n{}\nsource: {:?}",
        found.join("\n"),
        doc.source_text
    );
}
