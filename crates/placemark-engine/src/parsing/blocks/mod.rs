//! # Block Parsing
//!
//! Line-oriented block segmentation over a [`Cursor`](crate::parsing::cursor::Cursor).
//!
//! ## Parsing Phases
//!
//! 1. **Line Classification** (`classify`): each line is classified into a `LineClass`
//!    holding local facts (indentation, the production it would open)
//!
//! 2. **Block Construction** (`builder`): a `BlockBuilder` dispatches on the class of
//!    the line under the cursor, runs one production and hands the block's content
//!    span to the inline parser
//!
//! ## Modules
//!
//! - **`types`**: `BlockItem` and its supporting enums
//! - **`kinds`**: Block constructs with owned delimiters
//! - **`classify`**: `MarkdownLineClassifier` produces a `LineClass` per line
//! - **`builder`**: `BlockBuilder`, one production per block
//!
//! ## Key Invariants
//!
//! - Blocks never nest; a list item's level is its indentation
//! - Fenced code blocks are raw zones: no block or inline parsing inside
//! - A block ends at a blank line or at a line that opens another block

pub mod builder;
pub mod classify;
pub mod kinds;
pub mod types;

pub use builder::BlockBuilder;
pub use classify::{LineClass, LineKind, MarkdownLineClassifier};
pub use types::{Alignment, BlockItem, ListType, Row};
