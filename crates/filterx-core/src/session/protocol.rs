use std::time::Instant;

use filterx_core_types::RequestContext;
use tracing::debug;

use super::config::SessionConfig;
use super::params::{self, QueryParams};
use crate::addressing::{self, FilterId, Removal};
use crate::codec::{FilterCodec, QueryStringCodec};
use crate::errors::{ExError, Result};
use crate::model::Node;
use crate::reconcile;
use crate::{log_op_end, log_op_error, log_op_start};

const OP_HANDLE_REQUEST: &str = "handle_request";

/// Form field that abandons an edit when it carries the cancel label
pub const CANCEL_FIELD: &str = "cancel";

/// Whether the editor is open
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Editing,
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Editing => "editing",
        }
    }
}

/// Command carried by a request's control parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterCommand {
    /// Remove a node; the root clears the whole filter
    Remove(FilterId),
    /// Replace a node by its first child
    Strip(FilterId),
    /// Show the editor, or apply a submitted edit form
    Modify,
    /// Mark an insertion point for the next rendering
    Add(FilterId),
}

impl FilterCommand {
    pub fn name(&self) -> &'static str {
        match self {
            FilterCommand::Remove(_) => params::REMOVE_FILTER,
            FilterCommand::Strip(_) => params::STRIP_FILTER,
            FilterCommand::Modify => params::MODIFY_FILTER,
            FilterCommand::Add(_) => params::ADD_FILTER,
        }
    }
}

/// Control parameters shifted out of a request query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Controls {
    add: Option<FilterId>,
    remove: Option<FilterId>,
    strip: Option<FilterId>,
    modify: bool,
}

impl Controls {
    fn shift_from(query: &mut QueryParams) -> Result<Self> {
        fn id(value: Option<String>) -> Result<Option<FilterId>> {
            value
                .filter(|value| !value.is_empty())
                .map(|value| value.parse())
                .transpose()
        }

        Ok(Self {
            add: id(query.shift(params::ADD_FILTER))?,
            remove: id(query.shift(params::REMOVE_FILTER))?,
            strip: id(query.shift(params::STRIP_FILTER))?,
            modify: query
                .shift(params::MODIFY_FILTER)
                .is_some_and(|value| value != "0"),
        })
    }

    /// The command that decides the outcome: remove, then strip, then modify
    fn command(&self) -> Option<FilterCommand> {
        if let Some(id) = &self.remove {
            return Some(FilterCommand::Remove(id.clone()));
        }
        if let Some(id) = &self.strip {
            return Some(FilterCommand::Strip(id.clone()));
        }
        if self.modify {
            return Some(FilterCommand::Modify);
        }
        self.add.clone().map(FilterCommand::Add)
    }
}

/// One incoming request: the query string and, for a submission, the form
#[derive(Debug, Clone)]
pub struct FilterRequest {
    pub query: String,
    pub form: Option<Vec<(String, String)>>,
    pub context: RequestContext,
}

impl FilterRequest {
    /// A plain page request
    pub fn get(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            form: None,
            context: RequestContext::new(),
        }
    }

    /// A form submission
    pub fn post<I, K, V>(query: impl Into<String>, form: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            query: query.into(),
            form: Some(
                form.into_iter()
                    .map(|(name, value)| (name.into(), value.into()))
                    .collect(),
            ),
            context: RequestContext::new(),
        }
    }

    pub fn with_context(mut self, context: RequestContext) -> Self {
        self.context = context;
        self
    }

    fn is_cancel(&self, label: &str) -> bool {
        self.form.as_ref().is_some_and(|form| {
            form.iter()
                .any(|(name, value)| name == CANCEL_FIELD && value == label)
        })
    }
}

/// Where the client must go next
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirect {
    /// Target query string, without the leading `?`
    pub query: String,
    pub state: SessionState,
}

/// Everything a renderer needs to draw the filter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub filter: Node,
    pub insertion_point: Option<FilterId>,
    pub state: SessionState,
    /// Query string that opens the editor, or that the edit form posts to
    pub query: String,
}

/// Result of handling one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Redirect(Redirect),
    Render(EditorView),
}

impl Outcome {
    pub fn state(&self) -> SessionState {
        match self {
            Outcome::Redirect(redirect) => redirect.state,
            Outcome::Render(view) => view.state,
        }
    }
}

/// Request handler of the filter editor
///
/// Every mutation is serialized back into the query string and answered
/// with a redirect; only page requests without a mutation are rendered.
#[derive(Debug, Clone, Default)]
pub struct EditSession<C = QueryStringCodec> {
    codec: C,
    config: SessionConfig,
}

impl EditSession<QueryStringCodec> {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_codec(QueryStringCodec, config)
    }
}

impl<C: FilterCodec> EditSession<C> {
    pub fn with_codec(codec: C, config: SessionConfig) -> Self {
        Self { codec, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Handle one request
    ///
    /// # Errors
    /// Any error leaves the filter as the request encoded it. The returned
    /// [`ExError`] carries the request's correlation ids.
    pub fn handle(&self, request: &FilterRequest) -> std::result::Result<Outcome, ExError> {
        let start = Instant::now();
        let ctx = &request.context;
        log_op_start!(
            OP_HANDLE_REQUEST,
            request_id = %ctx.request_id,
            trace_id = ctx.trace_id.as_ref().map(|id| id.as_str())
        );

        match self.dispatch(request) {
            Ok(outcome) => {
                log_op_end!(
                    OP_HANDLE_REQUEST,
                    started = start,
                    request_id = %ctx.request_id,
                    state = outcome.state().as_str()
                );
                Ok(outcome)
            }
            Err(err) => {
                log_op_error!(
                    OP_HANDLE_REQUEST,
                    err.clone(),
                    started = start,
                    request_id = %ctx.request_id
                );
                let mut ex_err = ExError::from(err)
                    .with_op(OP_HANDLE_REQUEST)
                    .with_request_id(ctx.request_id.clone());
                if let Some(trace_id) = &ctx.trace_id {
                    ex_err = ex_err.with_trace_id(trace_id.clone());
                }
                Err(ex_err)
            }
        }
    }

    fn dispatch(&self, request: &FilterRequest) -> Result<Outcome> {
        let mut query = QueryParams::parse(&request.query);
        for name in &self.config.ignore_params {
            query.remove(name);
        }
        let preserved: Vec<String> = self
            .config
            .preserve_params
            .iter()
            .flat_map(|name| query.shift_all(name))
            .collect();

        let controls = Controls::shift_from(&mut query)?;
        let filter_text = query.to_query_string();
        let root = self.codec.parse(&filter_text)?;

        let command = controls.command();
        debug!(
            command = command.as_ref().map_or("none", FilterCommand::name),
            "request classified"
        );

        match command {
            Some(FilterCommand::Remove(id)) => {
                let query = match addressing::remove_by_id(root, &id)? {
                    Removal::Cleared => {
                        return Ok(Self::redirect(
                            params::join_query(&preserved),
                            SessionState::Idle,
                        ))
                    }
                    Removal::Remaining(root) => self.editing_query(&root, &preserved),
                };
                Ok(Self::redirect(query, SessionState::Editing))
            }
            Some(FilterCommand::Strip(id)) => {
                let root = addressing::strip_by_id(root, &id)?;
                Ok(Self::redirect(
                    self.editing_query(&root, &preserved),
                    SessionState::Editing,
                ))
            }
            Some(FilterCommand::Modify) => match &request.form {
                Some(_) if request.is_cancel(&self.config.cancel_label) => {
                    debug!("edit cancelled");
                    Ok(Self::redirect(
                        params::join_query(std::iter::once(filter_text).chain(preserved)),
                        SessionState::Idle,
                    ))
                }
                Some(form) => {
                    let fields = form
                        .iter()
                        .map(|(name, value)| (name.as_str(), value.as_str()));
                    let root = reconcile::apply(&root, fields)?;
                    Ok(Self::redirect(
                        self.editing_query(&root, &preserved),
                        SessionState::Editing,
                    ))
                }
                None => self.render(root, controls.add, SessionState::Editing, &preserved),
            },
            Some(FilterCommand::Add(_)) | None => {
                self.render(root, controls.add, SessionState::Idle, &preserved)
            }
        }
    }

    fn render(
        &self,
        root: Node,
        insertion_point: Option<FilterId>,
        state: SessionState,
        preserved: &[String],
    ) -> Result<Outcome> {
        if let Some(id) = &insertion_point {
            addressing::resolve(&root, id)?;
        }
        let query = self.editing_query(&root, preserved);
        Ok(Outcome::Render(EditorView {
            filter: root,
            insertion_point,
            state,
            query,
        }))
    }

    /// Serialized filter with the editor flag and preserved parameters
    fn editing_query(&self, root: &Node, preserved: &[String]) -> String {
        let modify = format!("{}=1", params::MODIFY_FILTER);
        params::join_query(
            [self.codec.serialize(root), modify]
                .into_iter()
                .chain(preserved.iter().cloned()),
        )
    }

    fn redirect(query: String, state: SessionState) -> Outcome {
        debug!(state = state.as_str(), "redirecting");
        Outcome::Redirect(Redirect { query, state })
    }
}
