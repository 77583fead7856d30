//! End-to-end tests of the block parser.
//!
//! Every parsed document is also run through the placement invariant checker.

use std::collections::HashMap;

use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::parsing::{
    Document, ParseOptions,
    blocks::{Alignment, BlockItem, ListType},
    error::{ParseError, SyntaxErrorKind},
    inline::{InlineItem, plain_text},
    parse, parse_with,
    position::SourceRange,
    references::{LinkResolver, NoLinks, RefKind},
    snapshot,
};

fn doc(text: &str) -> Document {
    doc_with(text, &ParseOptions::default(), &NoLinks)
}

fn doc_with<R: LinkResolver>(text: &str, options: &ParseOptions, resolver: &R) -> Document {
    let doc = parse_with(text, options, resolver).unwrap();
    snapshot::invariants(&doc);
    doc
}

fn content(block: &BlockItem) -> Vec<InlineItem> {
    block.inlines().cloned().collect()
}

fn texts(block: &BlockItem) -> Vec<String> {
    block.inlines().map(|item| item.text().to_string()).collect()
}

/// `(text, bold, italic, strike_through)` of every text item.
fn styled(block: &BlockItem) -> Vec<(String, bool, bool, bool)> {
    block
        .inlines()
        .filter_map(|item| match item {
            InlineItem::Text {
                text,
                bold,
                italic,
                strike_through,
                ..
            } => Some((text.clone(), *bold, *italic, *strike_through)),
            _ => None,
        })
        .collect()
}

fn rc(range: &SourceRange) -> (usize, usize, usize, usize) {
    (range.start.row, range.start.col, range.end.row, range.end.col)
}

fn plain(text: &str) -> (String, bool, bool, bool) {
    (text.to_string(), false, false, false)
}

#[test]
fn empty_input_is_an_error() {
    assert_eq!(parse(""), Err(ParseError::EmptyInput));
}

#[rstest]
#[case("\n\n\n")]
#[case("   \n\t\n")]
fn blank_documents_have_no_blocks(#[case] text: &str) {
    let doc = doc(text);
    assert!(doc.blocks.is_empty());
    assert!(doc.errors.is_empty());
}

#[test]
fn emphasis_splits_text_items() {
    let doc = doc("hello, _world_!");
    let [block] = doc.blocks.as_slice() else {
        panic!("expected one block: {:?}", doc.blocks);
    };
    assert!(matches!(block, BlockItem::Paragraph { indent: 0, .. }));
    assert_eq!(
        styled(block),
        vec![
            plain("hello, "),
            ("world".to_string(), false, true, false),
            plain("!"),
        ]
    );
    let items = content(block);
    let world = items[1].placement();
    assert_eq!(world.body.as_ref().map(rc), Some((0, 8, 0, 13)));
    assert_eq!(
        world.markups.iter().map(rc).collect::<Vec<_>>(),
        vec![(0, 7, 0, 8), (0, 13, 0, 14)]
    );
    assert_eq!(doc.slice(&world.body.unwrap()), "world");
}

#[test]
fn fenced_code_keeps_its_lines() {
    let doc = doc("~~~kt\n    line1\n    line2\n~~~");
    let [
        BlockItem::Code {
            text,
            language,
            indent_level,
            content,
            placement,
        },
    ] = doc.blocks.as_slice()
    else {
        panic!("expected one code block: {:?}", doc.blocks);
    };
    assert_eq!(text, "    line1\n    line2");
    assert_eq!(language.as_deref(), Some("kt"));
    assert_eq!(*indent_level, None);
    assert_eq!(content.len(), 1);
    assert!(matches!(&content[0], InlineItem::Code { text: inner, .. } if inner == text));
    assert_eq!(
        placement.markups.iter().map(rc).collect::<Vec<_>>(),
        vec![(0, 0, 0, 5), (3, 0, 3, 3)]
    );
    assert_eq!(placement.body.as_ref().map(rc), Some((1, 0, 2, 9)));
    assert_eq!(doc.slice(&placement.body.unwrap()), "    line1\n    line2");
}

#[test]
fn fenced_code_is_raw() {
    let doc = doc("```\n# not a heading\n*not emphasis*\n```\nafter");
    assert_eq!(doc.blocks.len(), 2);
    let BlockItem::Code { text, language, .. } = &doc.blocks[0] else {
        panic!("expected code: {:?}", doc.blocks[0]);
    };
    assert_eq!(text, "# not a heading\n*not emphasis*");
    assert_eq!(*language, None);
    assert_eq!(texts(&doc.blocks[1]), vec!["after"]);
}

#[test]
fn unterminated_fence_falls_back_to_a_paragraph() {
    let doc = doc("```rust\nlet x = 1;");
    assert_eq!(doc.errors.len(), 1);
    let error = &doc.errors[0];
    assert_eq!(error.kind, SyntaxErrorKind::UnterminatedBlock);
    assert_eq!((error.position.row, error.position.col), (0, 0));
    assert_eq!(error.message, "unterminated block ```");
    assert_eq!(doc.blocks.len(), 1);
    assert!(matches!(doc.blocks[0], BlockItem::Paragraph { .. }));
}

#[test]
fn headings_by_level() {
    let doc = doc("# Title\n\n## Sub _em_");
    let levels: Vec<u8> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            BlockItem::Heading { level, .. } => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![1, 2]);
    assert_eq!(styled(&doc.blocks[0]), vec![plain("Title")]);
    assert_eq!(
        styled(&doc.blocks[1]),
        vec![plain("Sub "), ("em".to_string(), false, true, false)]
    );
}

#[rstest]
#[case("####### seven", Some(7))]
#[case("######## eight", None)]
#[case("#no space", None)]
fn heading_levels(#[case] text: &str, #[case] level: Option<u8>) {
    let doc = doc(text);
    let found = match &doc.blocks[0] {
        BlockItem::Heading { level, .. } => Some(*level),
        _ => None,
    };
    assert_eq!(found, level);
}

fn numbers(doc: &Document) -> Vec<(usize, Option<usize>)> {
    doc.blocks
        .iter()
        .filter_map(|block| match block {
            BlockItem::ListItem { level, number, .. } => Some((*level, *number)),
            _ => None,
        })
        .collect()
}

#[rstest]
#[case("1. a\n1. b\n1. c", vec![(0, Some(1)), (0, Some(2)), (0, Some(3))])]
#[case("7. a\n1. b", vec![(0, Some(7)), (0, Some(8))])]
#[case("1. a\n\n1. b", vec![(0, Some(1)), (0, Some(2))])]
#[case("1. a\n\npara\n\n5. b", vec![(0, Some(1)), (0, Some(5))])]
#[case(
    "- a\n    1. b\n    1. c\n- d\n    1. e",
    vec![(0, None), (1, Some(1)), (1, Some(2)), (0, None), (1, Some(1))]
)]
#[case("1. a\n    - b\n1. c", vec![(0, Some(1)), (1, None), (0, Some(1))])]
#[case("1. a\n    1. b\n2. c", vec![(0, Some(1)), (1, Some(1)), (0, Some(2))])]
fn ordered_numbering(#[case] text: &str, #[case] expected: Vec<(usize, Option<usize>)>) {
    assert_eq!(numbers(&doc(text)), expected);
}

#[test]
fn list_markers_and_continuations() {
    let doc = doc("- dash\n  continued\n* star\n+ plus\n12. twelve");
    let kinds: Vec<ListType> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            BlockItem::ListItem { list_type, .. } => Some(*list_type),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![
            ListType::Dashed,
            ListType::Bulleted,
            ListType::Bulleted,
            ListType::Ordered
        ]
    );
    assert_eq!(texts(&doc.blocks[0]), vec!["dash continued"]);
    let marker = &doc.blocks[3].placement().markups[0];
    assert_eq!(rc(marker), (4, 0, 4, 4));
    assert_eq!(doc.slice(marker), "12. ");
}

#[test]
fn paragraphs_join_lines_and_measure_indent() {
    let doc = doc("first line\n   second line\n\n    indented\n\n\ttabbed");
    assert_eq!(doc.blocks.len(), 3);
    assert_eq!(texts(&doc.blocks[0]), vec!["first line second line"]);
    let indents: Vec<usize> = doc
        .blocks
        .iter()
        .filter_map(|block| match block {
            BlockItem::Paragraph { indent, .. } => Some(*indent),
            _ => None,
        })
        .collect();
    assert_eq!(indents, vec![0, 1, 1]);
}

#[test]
fn paragraphs_end_at_block_openers() {
    let doc = doc("text\n# Head\nmore\n---\n> quote");
    let kinds: Vec<&str> = doc.blocks.iter().map(BlockItem::kind_name).collect();
    assert_eq!(kinds, vec!["Paragraph", "Heading", "HorizontalLine", "Quote"]);
    assert_eq!(texts(&doc.blocks[1]), vec!["Head more"]);
}

#[test]
fn indented_code_when_enabled() {
    let options = ParseOptions {
        indented_code: true,
        ..ParseOptions::default()
    };
    let doc = doc_with("    let x = 1;\n\n\tlet y = 2;\nafter", &options, &NoLinks);
    assert_eq!(doc.blocks.len(), 2);
    let BlockItem::Code {
        text,
        language,
        indent_level,
        placement,
        ..
    } = &doc.blocks[0]
    else {
        panic!("expected code: {:?}", doc.blocks[0]);
    };
    assert_eq!(text, "let x = 1;\n\nlet y = 2;");
    assert_eq!(*language, None);
    assert_eq!(*indent_level, Some(1));
    assert_eq!(placement.body.as_ref().map(rc), Some((0, 0, 2, 11)));
    assert_eq!(texts(&doc.blocks[1]), vec!["after"]);
}

#[test]
fn quotes_join_lines_and_own_their_prefixes() {
    let doc = doc("> first\n> second\nafter");
    assert_eq!(doc.blocks.len(), 2);
    let BlockItem::Quote { placement, .. } = &doc.blocks[0] else {
        panic!("expected quote: {:?}", doc.blocks[0]);
    };
    assert_eq!(texts(&doc.blocks[0]), vec!["first second"]);
    assert_eq!(
        placement.markups.iter().map(rc).collect::<Vec<_>>(),
        vec![(0, 0, 0, 2), (1, 0, 1, 2)]
    );
    assert_eq!(placement.body.as_ref().map(rc), Some((0, 2, 1, 8)));
    assert_eq!(texts(&doc.blocks[1]), vec!["after"]);
}

#[test]
fn bare_quote_line_joins_without_extra_space() {
    let doc = doc("> a\n>\n> b");
    assert_eq!(doc.blocks.len(), 1);
    assert_eq!(texts(&doc.blocks[0]), vec!["a b"]);
    assert_eq!(doc.blocks[0].placement().markups.len(), 3);
}

#[test]
fn tables_split_cells() {
    let doc = doc("| a | b |\n| :-- | --: |\n| 1 | **2** |");
    let [
        BlockItem::Table {
            header,
            alignments,
            body,
            placement,
        },
    ] = doc.blocks.as_slice()
    else {
        panic!("expected one table: {:?}", doc.blocks);
    };
    let cells = |row: &Vec<Vec<InlineItem>>| -> Vec<String> {
        row.iter().map(|cell| plain_text(cell)).collect()
    };
    assert_eq!(cells(header), vec!["a", "b"]);
    assert_eq!(alignments, &vec![Alignment::Start, Alignment::End]);
    assert_eq!(body.len(), 1);
    assert_eq!(cells(&body[0]), vec!["1", "2"]);
    assert!(matches!(&body[0][1][0], InlineItem::Text { bold: true, .. }));

    assert_eq!(
        placement.markups.iter().map(rc).collect::<Vec<_>>(),
        vec![
            (0, 0, 0, 1),
            (0, 4, 0, 5),
            (0, 8, 0, 9),
            (1, 0, 1, 13),
            (2, 0, 2, 1),
            (2, 4, 2, 5),
            (2, 12, 2, 13),
        ]
    );
    assert_eq!(placement.body.as_ref().map(rc), Some((0, 0, 2, 13)));
}

#[test]
fn table_needs_a_delimiter_row() {
    let doc = doc("| a | b |\nplain");
    assert_eq!(doc.blocks.len(), 1);
    assert!(matches!(doc.blocks[0], BlockItem::Paragraph { .. }));
}

#[test]
fn forward_footnote_reference() {
    let doc = doc("See [ref][f1].\n\n[f1]: http://x \"Title\"");
    assert_eq!(doc.blocks.len(), 2);
    let items = content(&doc.blocks[0]);
    assert_eq!(items.len(), 3);
    let InlineItem::Link {
        reference,
        placement,
    } = &items[1]
    else {
        panic!("expected link: {items:?}");
    };
    assert_eq!(reference.name, "ref");
    assert_eq!(reference.link, "http://x");
    assert_eq!(reference.title.as_deref(), Some("Title"));
    assert_eq!(reference.kind, RefKind::Footnote);
    assert_eq!(
        placement.markups.iter().map(rc).collect::<Vec<_>>(),
        vec![(0, 4, 0, 5), (0, 8, 0, 9), (0, 9, 0, 13)]
    );
    assert_eq!(items[2].text(), ".");

    let BlockItem::Footnote {
        reference,
        placement,
    } = &doc.blocks[1]
    else {
        panic!("expected footnote: {:?}", doc.blocks[1]);
    };
    assert_eq!(reference.name, "f1");
    assert_eq!(rc(&placement.markups[0]), (2, 0, 2, 6));
    assert_eq!(doc.slice(&placement.body.unwrap()), "http://x \"Title\"");
}

#[test]
fn malformed_footnote_is_reported_and_kept_as_text() {
    let doc = doc("[x]:\ntext");
    assert_eq!(doc.errors.len(), 1);
    assert_eq!(doc.errors[0].kind, SyntaxErrorKind::MalformedFootnote);
    assert_eq!(doc.errors[0].message, "malformed footnote x");
    assert_eq!(texts(&doc.blocks[0]), vec!["[x]: text"]);
}

#[test]
fn external_links_use_the_resolver() {
    let links: HashMap<String, String> = [("home".to_string(), "/index".to_string())].into();
    let doc = doc_with("[home] and [away]", &ParseOptions::default(), &links);
    let items = content(&doc.blocks[0]);
    let InlineItem::Link { reference, .. } = &items[0] else {
        panic!("expected link: {items:?}");
    };
    assert_eq!(reference.kind, RefKind::External);
    assert_eq!(reference.link, "/index");
    assert_eq!(items[1].text(), " and [away]");
}

#[test]
fn images_and_inline_links() {
    let doc = doc("![logo](/l.png) [site](http://s \"S\")");
    let items = content(&doc.blocks[0]);
    let InlineItem::Image { reference, .. } = &items[0] else {
        panic!("expected image: {items:?}");
    };
    assert_eq!(reference.name, "logo");
    assert_eq!(reference.link, "/l.png");
    assert_eq!(reference.kind, RefKind::Inline);
    let InlineItem::Link { reference, .. } = &items[2] else {
        panic!("expected link: {items:?}");
    };
    assert_eq!(reference.title.as_deref(), Some("S"));
}

#[rstest]
#[case("a -- b --- c ---- d", "a \u{2013} b \u{2014} c ---- d")]
#[case("\\[not a link\\]", "[not a link]")]
#[case("a * b", "a * b")]
#[case("a*b*c", "a*b*c")]
#[case("**bold", "**bold")]
#[case("see __init here", "see __init here")]
#[case("***x", "***x")]
fn literal_text(#[case] text: &str, #[case] expected: &str) {
    let doc = doc(text);
    assert_eq!(styled(&doc.blocks[0]), vec![plain(expected)]);
}

#[test]
fn code_spans_overlap_emphasis() {
    let doc = doc("`*a*` b");
    let items = content(&doc.blocks[0]);
    assert!(matches!(&items[0], InlineItem::Code { text, .. } if text == "a"));
    assert_eq!(items[0].placement().markups.len(), 4);
    assert_eq!(items[1].text(), " b");

    let doc = doc_with("x *a `b* c` d", &ParseOptions::default(), &NoLinks);
    assert_eq!(
        styled(&doc.blocks[0]),
        vec![plain("x "), ("a ".to_string(), false, true, false), plain(" d")]
    );
}

#[test]
fn positions_survive_crlf_and_multibyte_text() {
    let doc = doc("é *ü*\r\nnext");
    let items = content(&doc.blocks[0]);
    let body = items[1].placement().body.unwrap();
    assert_eq!(doc.slice(&body), "ü");
    assert_eq!(rc(&body), (0, 3, 0, 4));
    let last = items.last().unwrap();
    assert_eq!(last.text(), " next");
    let body = last.placement().body.unwrap();
    assert_eq!(rc(&body), (0, 5, 1, 4));
    assert_eq!(doc.slice(&body), "\r\nnext");
    assert_eq!(body.end.offset, 13);
}

#[rstest]
#[case("*".repeat(500))]
#[case("[".repeat(300))]
#[case("_a".repeat(400))]
#[case("`x ".repeat(300))]
#[case("[a](".repeat(200))]
#[case("> ".repeat(200))]
#[case("| ".repeat(200) + "\n|---|")]
fn pathological_inputs_finish(#[case] text: String) {
    let doc = doc(&text);
    assert!(!doc.blocks.is_empty());
}
