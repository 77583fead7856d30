pub mod parsing;

// Re-export key types for easier usage
pub use parsing::{
    Document, ParseOptions,
    blocks::{Alignment, BlockItem, ListType},
    error::{ParseError, SyntaxError, SyntaxErrorKind},
    inline::{InlineItem, plain_text},
    parse, parse_with,
    position::{Placement, Position, SourceRange},
    references::{LinkResolver, NoLinks, Ref, RefKind},
};
