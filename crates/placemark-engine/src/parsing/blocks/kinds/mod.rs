//! # Block Kinds
//!
//! Block types that own their syntax knowledge: delimiters and the
//! single-line tests that recognise an opening line. The classifier and the
//! block parser call into these; they never hardcode `#` or `|`.

pub mod block_quote;
pub mod code_fence;
pub mod footnote;
pub mod heading;
pub mod indented_code;
pub mod list_item;
pub mod paragraph;
pub mod table;
pub mod thematic_break;

pub use block_quote::BlockQuote;
pub use code_fence::CodeFence;
pub use footnote::FootnoteDeclaration;
pub use heading::Heading;
pub use indented_code::IndentedCode;
pub use list_item::{ListMarker, ListNumbering};
pub use paragraph::Paragraph;
pub use table::Table;
pub use thematic_break::ThematicBreak;
