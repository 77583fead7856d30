//! # Snapshot Testing Support
//!
//! Utilities for testing the parser via snapshot assertions and invariant checks.
//!
//! ## Modules
//!
//! - **`normalize`**: Renders a parsed document as a stable, indented outline
//!   with every placement, for `insta` snapshots and the CLI's `--dump`
//! - **`invariants`**: Checks for parser correctness (ranges inside the source,
//!   inline bodies nested in block bodies, inline markups outside their body)
//!
//! Parsing behaviour is pinned by outline snapshots rather than a separate
//! formal grammar.

pub mod invariants;
pub mod normalize;

pub use invariants::{check as invariants, violations};
pub use normalize::outline;
