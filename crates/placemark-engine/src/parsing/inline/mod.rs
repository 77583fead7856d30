//! # Inline Parsing
//!
//! Turns a block's content span into styled text, code, links and images,
//! recording for each node the ranges of its delimiters and its body.
//!
//! ## Modules
//!
//! - **`types`**: `InlineItem` enum (Text, Code, Link, Image)
//! - **`kinds`**: Inline constructs with owned delimiters
//! - **`detector`**: Per-family open/close state machines for style tokens
//! - **`parser`**: `parse_inline()` main entry point with `try_*` helpers
//!
//! ## Precedence
//!
//! Per character: line joining, escapes, dashes, images and links, then style
//! tokens in detector order. Style families are independent, so a code span
//! can open inside emphasis and close outside it.

pub mod detector;
pub mod kinds;
pub mod parser;
pub mod types;

pub use parser::{Continuation, InlineContent, InlineContext, parse_inline};
pub use types::{InlineItem, plain_text};
