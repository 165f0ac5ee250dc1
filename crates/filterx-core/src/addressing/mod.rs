//! Path-based addressing of filter tree nodes
//!
//! Identifiers are derived from tree shape alone. Every structural edit may
//! move what an identifier points at, so ids are re-resolved against the
//! post-edit tree and never cached across a mutation.

pub mod filter_id;
pub mod tree_ops;

pub use filter_id::{FilterId, ROOT_TOKEN};
pub use tree_ops::{
    add_child, is_root, remove_by_id, replace_by_id, resolve, resolve_mut, strip_by_id, walk,
    Removal,
};
