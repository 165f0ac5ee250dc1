//! Request protocol of the filter editor
//!
//! A request carries the serialized filter in its query string next to the
//! control parameters `addFilter`, `removeFilter`, `stripFilter` and
//! `modifyFilter`. Mutations answer with a redirect to the new query string;
//! everything else is rendered.

mod config;
pub mod params;
mod protocol;

pub use config::SessionConfig;
pub use params::QueryParams;
pub use protocol::{
    EditSession, EditorView, FilterCommand, FilterRequest, Outcome, Redirect, SessionState,
    CANCEL_FIELD,
};
