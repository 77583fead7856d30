//! # Inline Kinds
//!
//! Inline constructs that own their syntax delimiters. The parser and the
//! detectors refer to these constants; they never hardcode `**` or `](`.
//!
//! ## Types
//!
//! - **`StrongEmphasis`**: `***` / `___`
//! - **`Strong`**: `**` / `__`
//! - **`Emphasis`**: `*` / `_`
//! - **`StrikeThrough`**: `~~`
//! - **`CodeSpan`**: `` ` ``
//! - **`LinkSyntax`**: brackets, image bang and the escape character

pub mod code_span;
pub mod emphasis;
pub mod link;

pub use code_span::CodeSpan;
pub use emphasis::{Emphasis, StrikeThrough, Strong, StrongEmphasis};
pub use link::LinkSyntax;
