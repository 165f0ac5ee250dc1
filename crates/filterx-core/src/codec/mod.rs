//! Textual encoding of filter trees
//!
//! The session protocol only needs a `parse`/`serialize` pair that are
//! mutual inverses; [`QueryStringCodec`] is the URL-friendly grammar used by
//! default.

mod percent;
pub mod query_string;

pub use query_string::QueryStringCodec;

use crate::errors::Result;
use crate::model::Node;

/// Bidirectional text form of a filter tree
///
/// Implementations guarantee `parse(&serialize(t)) == t` for every tree
/// whose expressions have non-empty columns. A one-item list holding the
/// empty string is indistinguishable from the empty list.
pub trait FilterCodec {
    /// Parse a filter from its text form; the empty string is the empty filter
    ///
    /// # Errors
    /// * `InvalidEncoding` - If the text is not a valid filter
    fn parse(&self, input: &str) -> Result<Node>;

    /// Text form of a filter; the empty filter serializes to `""`
    fn serialize(&self, node: &Node) -> String;
}
