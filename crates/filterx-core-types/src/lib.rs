//! Core types shared across filterx facilities
//!
//! This crate provides the types used by both the error facility and the
//! logging facility of `filterx-core`:
//!
//! - **Correlation types**: RequestId, TraceId, RequestContext
//! - **Schema constants**: Canonical field keys and event names

pub mod correlation;
pub mod schema;

pub use correlation::{RequestContext, RequestId, TraceId};
