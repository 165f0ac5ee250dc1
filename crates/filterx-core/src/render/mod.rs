//! Read-only views of a filter tree

mod outline;

pub use outline::OutlineRenderer;

use crate::addressing::FilterId;
use crate::model::Node;

/// Draws a filter, optionally marking where a new expression will go
pub trait FilterRenderer {
    fn render(&self, root: &Node, insertion_point: Option<&FilterId>) -> String;
}

/// One-line form of a filter, cut to `max_len` characters plus `...`
///
/// The empty filter summarizes to the empty string.
pub fn summary(root: &Node, max_len: usize) -> String {
    if root.is_empty() {
        return String::new();
    }
    let text = root.to_string();
    if text.chars().count() <= max_len {
        return text;
    }
    let mut cut: String = text.chars().take(max_len).collect();
    cut.push_str("...");
    cut
}
