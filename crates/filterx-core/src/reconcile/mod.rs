//! Reconciliation of submitted edit-form fields into a filter tree

mod apply;
pub mod fields;

pub use apply::apply;
pub use fields::{parse_field_name, Attribute, AttributeSet, EditBatch, EditField};
