use std::fmt::Write;

use crate::parsing::{
    Document,
    blocks::BlockItem,
    inline::InlineItem,
    position::Placement,
    references::Ref,
};

/// Renders `doc` as an indented outline, one line per node.
///
/// Blocks start at column 0 and their inline items follow indented by two
/// spaces; table cells are prefixed with their row and column. Each line ends
/// with the node's body range and markup ranges as `row:col..row:col`.
pub fn outline(doc: &Document) -> String {
    let mut out = String::new();
    for block in &doc.blocks {
        line(&mut out, 0, &block_label(block), block.placement());
        match block {
            BlockItem::Table { header, body, .. } => {
                for (r, row) in std::iter::once(header).chain(body).enumerate() {
                    for (c, cell) in row.iter().enumerate() {
                        for item in cell {
                            let label = format!("[{r},{c}] {}", inline_label(item));
                            line(&mut out, 1, &label, item.placement());
                        }
                    }
                }
            }
            _ => {
                for item in block.inlines() {
                    line(&mut out, 1, &inline_label(item), item.placement());
                }
            }
        }
    }
    for error in &doc.errors {
        let _ = writeln!(out, "error {:?} at {}: {}", error.kind, error.position, error.message);
    }
    out
}

fn line(out: &mut String, depth: usize, label: &str, placement: &Placement) {
    let _ = write!(out, "{}{label}", "  ".repeat(depth));
    if let Some(body) = &placement.body {
        let _ = write!(out, " body={body}");
    }
    if !placement.markups.is_empty() {
        let markups: Vec<String> = placement.markups.iter().map(ToString::to_string).collect();
        let _ = write!(out, " markups=[{}]", markups.join(", "));
    }
    out.push('\n');
}

fn block_label(block: &BlockItem) -> String {
    match block {
        BlockItem::Paragraph { indent, .. } => format!("Paragraph indent={indent}"),
        BlockItem::Heading { level, .. } => format!("Heading level={level}"),
        BlockItem::ListItem {
            list_type,
            level,
            number,
            ..
        } => match number {
            Some(number) => format!("ListItem {list_type:?} level={level} number={number}"),
            None => format!("ListItem {list_type:?} level={level}"),
        },
        BlockItem::Quote { .. } => "Quote".to_string(),
        BlockItem::Code {
            language,
            indent_level,
            ..
        } => {
            let mut label = "Code".to_string();
            if let Some(language) = language {
                let _ = write!(label, " language={language}");
            }
            if let Some(indent) = indent_level {
                let _ = write!(label, " indent={indent}");
            }
            label
        }
        BlockItem::HorizontalLine { .. } => "HorizontalLine".to_string(),
        BlockItem::Table {
            alignments, body, ..
        } => format!("Table columns={alignments:?} rows={}", body.len()),
        BlockItem::Footnote { reference, .. } => format!("Footnote {}", ref_label(reference)),
    }
}

fn inline_label(item: &InlineItem) -> String {
    match item {
        InlineItem::Text {
            text,
            bold,
            italic,
            strike_through,
            ..
        } => {
            let mut label = format!("Text {text:?}");
            for (set, flag) in [(bold, "bold"), (italic, "italic"), (strike_through, "strike")] {
                if *set {
                    label.push(' ');
                    label.push_str(flag);
                }
            }
            label
        }
        InlineItem::Code { text, .. } => format!("Code {text:?}"),
        InlineItem::Link { reference, .. } => format!("Link {}", ref_label(reference)),
        InlineItem::Image { reference, .. } => format!("Image {}", ref_label(reference)),
    }
}

fn ref_label(reference: &Ref) -> String {
    match &reference.title {
        Some(title) => format!(
            "[{}] -> {} {title:?} ({:?})",
            reference.name, reference.link, reference.kind
        ),
        None => format!("[{}] -> {} ({:?})", reference.name, reference.link, reference.kind),
    }
}
