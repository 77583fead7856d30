use std::sync::OnceLock;

use regex::Regex;

use crate::parsing::blocks::types::ListType;

/// The marker that opens a list item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListMarker {
    pub list_type: ListType,
    /// Marker length in characters, without the whitespace after it.
    pub len: usize,
    /// The literal number of an ordered marker.
    pub number: Option<usize>,
}

impl ListMarker {
    pub const DASH: char = '-';
    pub const BULLETS: [char; 2] = ['*', '+'];

    /// Recognises `- `, `* `, `+ ` and `12. ` (a tab works in place of the space).
    pub fn parse(rest: &str) -> Option<ListMarker> {
        static ORDERED: OnceLock<Regex> = OnceLock::new();
        let ordered = ORDERED
            .get_or_init(|| Regex::new(r"^([0-9]{1,9})\.[ \t]").expect("Invalid list regex"));

        let mut chars = rest.chars();
        let first = chars.next()?;
        let spaced = matches!(chars.next(), Some(' ' | '\t'));
        if first == Self::DASH && spaced {
            return Some(ListMarker {
                list_type: ListType::Dashed,
                len: 1,
                number: None,
            });
        }
        if Self::BULLETS.contains(&first) && spaced {
            return Some(ListMarker {
                list_type: ListType::Bulleted,
                len: 1,
                number: None,
            });
        }
        let caps = ordered.captures(rest)?;
        let digits = &caps[1];
        Some(ListMarker {
            list_type: ListType::Ordered,
            len: digits.len() + 1,
            number: digits.parse().ok(),
        })
    }
}

/// Numbers ordered items across consecutive list items.
///
/// An ordered item continues the sequence only when the block right before it
/// was an ordered item at the same level; otherwise it keeps its literal number.
#[derive(Debug, Clone, Default)]
pub struct ListNumbering {
    /// Level and number of the previous block, if it was an ordered item.
    previous: Option<(usize, usize)>,
}

impl ListNumbering {
    /// Records an item at `level` and returns its number.
    pub fn item(&mut self, level: usize, marker: &ListMarker) -> Option<usize> {
        let number = marker.number.map(|literal| match self.previous {
            Some((previous_level, previous)) if previous_level == level => previous + 1,
            _ => literal,
        });
        self.previous = number.map(|number| (level, number));
        number
    }

    /// A block other than a list item ends the sequence.
    pub fn interrupt(&mut self) {
        self.previous = None;
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("- a", ListType::Dashed, 1, None)]
    #[case("*\ta", ListType::Bulleted, 1, None)]
    #[case("+ a", ListType::Bulleted, 1, None)]
    #[case("1. a", ListType::Ordered, 2, Some(1))]
    #[case("42.\ta", ListType::Ordered, 3, Some(42))]
    fn markers(
        #[case] rest: &str,
        #[case] list_type: ListType,
        #[case] len: usize,
        #[case] number: Option<usize>,
    ) {
        assert_eq!(
            ListMarker::parse(rest),
            Some(ListMarker {
                list_type,
                len,
                number
            })
        );
    }

    #[rstest]
    #[case("-a")]
    #[case("*emphasis*")]
    #[case("1.a")]
    #[case("1) a")]
    #[case("text")]
    #[case("-")]
    fn not_markers(#[case] rest: &str) {
        assert_eq!(ListMarker::parse(rest), None);
    }

    fn ordered(n: usize) -> ListMarker {
        ListMarker {
            list_type: ListType::Ordered,
            len: 2,
            number: Some(n),
        }
    }

    fn dashed() -> ListMarker {
        ListMarker {
            list_type: ListType::Dashed,
            len: 1,
            number: None,
        }
    }

    #[test]
    fn ordered_items_continue_the_previous_item() {
        let mut numbering = ListNumbering::default();
        assert_eq!(numbering.item(0, &ordered(1)), Some(1));
        assert_eq!(numbering.item(0, &ordered(1)), Some(2));
        assert_eq!(numbering.item(1, &ordered(7)), Some(7));
        assert_eq!(numbering.item(1, &ordered(1)), Some(8));
        assert_eq!(numbering.item(0, &ordered(1)), Some(1));
    }

    #[test]
    fn nested_items_break_the_sequence() {
        let mut numbering = ListNumbering::default();
        assert_eq!(numbering.item(0, &ordered(1)), Some(1));
        assert_eq!(numbering.item(1, &dashed()), None);
        assert_eq!(numbering.item(0, &ordered(1)), Some(1));
    }

    #[test]
    fn unordered_items_and_other_blocks_restart_numbering() {
        let mut numbering = ListNumbering::default();
        numbering.item(0, &ordered(1));
        assert_eq!(numbering.item(0, &dashed()), None);
        assert_eq!(numbering.item(0, &ordered(5)), Some(5));
        numbering.interrupt();
        assert_eq!(numbering.item(0, &ordered(1)), Some(1));
    }
}
