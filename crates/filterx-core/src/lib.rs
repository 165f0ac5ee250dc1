//! filterx core - editable boolean filter trees
//!
//! This crate provides:
//! - The filter tree model (expressions and AND/OR/NOT chains)
//! - Positional addressing of nodes and the structural edits built on it
//! - Reconciliation of submitted edit forms against a tree
//! - A query-string codec for carrying filters in URLs
//! - The request protocol of the filter editor
//! - Plain-text rendering
//!
//! Every operation is synchronous and scoped to a single request.

pub mod addressing;
pub mod codec;
pub mod errors;
pub mod logging_facility;
pub mod model;
pub mod reconcile;
pub mod render;
pub mod session;

// Re-export commonly used types
pub use addressing::{FilterId, Removal};
pub use codec::{FilterCodec, QueryStringCodec};
pub use errors::{ExError, ExErrorKind, FilterError, Result};
pub use model::{Chain, Expression, FilterValue, Node, Operator, Sign};
pub use render::{FilterRenderer, OutlineRenderer};
pub use session::{EditSession, FilterRequest, Outcome, SessionConfig, SessionState};
