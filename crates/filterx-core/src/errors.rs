use filterx_core_types::{RequestId, TraceId};
use thiserror::Error;

/// Result type alias using FilterError
pub type Result<T> = std::result::Result<T, FilterError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that callers (the CLI, an HTTP
/// layer in front of the session protocol, tests) can match on without
/// parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Addressing
    NotFound,

    // Reconciliation
    Conflict,
    InvalidOperation,

    // Codec / configuration
    InvalidEncoding,
    InvalidConfig,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::Conflict => "ERR_CONFLICT",
            ExErrorKind::InvalidOperation => "ERR_INVALID_OPERATION",
            ExErrorKind::InvalidEncoding => "ERR_INVALID_ENCODING",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries the classification plus whatever context the failing layer could
/// attach: the operation name, the filter identifier involved and the
/// correlation ids of the request.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    filter_id: Option<String>,
    request_id: Option<RequestId>,
    trace_id: Option<TraceId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            filter_id: None,
            request_id: None,
            trace_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add filter identifier context
    pub fn with_filter_id(mut self, id: impl Into<String>) -> Self {
        self.filter_id = Some(id.into());
        self
    }

    /// Add request ID context
    pub fn with_request_id(mut self, request_id: RequestId) -> Self {
        self.request_id = Some(request_id);
        self
    }

    /// Add trace ID context
    pub fn with_trace_id(mut self, trace_id: TraceId) -> Self {
        self.trace_id = Some(trace_id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn filter_id(&self) -> Option<&str> {
        self.filter_id.as_deref()
    }

    pub fn request_id(&self) -> Option<&RequestId> {
        self.request_id.as_ref()
    }

    pub fn trace_id(&self) -> Option<&TraceId> {
        self.trace_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(filter_id) = &self.filter_id {
            write!(f, " (filter_id: {})", filter_id)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " (request_id: {})", request_id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for filter tree operations
///
/// Every variant aborts the request in progress; none is recovered locally.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// No node occupies the given path in the current tree
    #[error("Filter not found: {filter_id}")]
    NotFound { filter_id: String },

    /// Two pending insertions target different points in one submission
    #[error("Conflicting insertion points: {first} and {second}")]
    Conflict { first: String, second: String },

    /// Structurally illegal request
    #[error("Invalid operation: {reason}")]
    InvalidOperation { reason: String },

    /// The textual encoding could not be parsed
    #[error("Invalid filter encoding at byte {position}: {reason}")]
    InvalidEncoding { position: usize, reason: String },

    /// Session configuration could not be loaded
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl FilterError {
    pub(crate) fn not_found(filter_id: impl ToString) -> Self {
        FilterError::NotFound {
            filter_id: filter_id.to_string(),
        }
    }

    pub(crate) fn invalid_operation(reason: impl Into<String>) -> Self {
        FilterError::InvalidOperation {
            reason: reason.into(),
        }
    }
}

impl From<FilterError> for ExError {
    fn from(err: FilterError) -> Self {
        match err {
            FilterError::NotFound { filter_id } => ExError::new(ExErrorKind::NotFound)
                .with_filter_id(filter_id)
                .with_message("Filter not found"),

            FilterError::Conflict { first, second } => ExError::new(ExErrorKind::Conflict)
                .with_filter_id(first.clone())
                .with_message(format!(
                    "Only one new filter per submission, got {} and {}",
                    first, second
                )),

            FilterError::InvalidOperation { reason } => {
                ExError::new(ExErrorKind::InvalidOperation).with_message(reason)
            }

            FilterError::InvalidEncoding { position, reason } => {
                ExError::new(ExErrorKind::InvalidEncoding)
                    .with_op("parse")
                    .with_message(format!("{} (at byte {})", reason, position))
            }

            FilterError::InvalidConfig { reason } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(reason)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_op_and_id() {
        let err = ExError::new(ExErrorKind::NotFound)
            .with_op("strip")
            .with_filter_id("2-1")
            .with_message("Filter not found");

        let shown = err.to_string();
        assert!(shown.starts_with("[ERR_NOT_FOUND]"));
        assert!(shown.contains("'strip'"));
        assert!(shown.contains("(filter_id: 2-1)"));
    }

    #[test]
    fn test_conflict_keeps_first_insertion_point() {
        let ex: ExError = FilterError::Conflict {
            first: "1".to_string(),
            second: "2".to_string(),
        }
        .into();

        assert_eq!(ex.kind(), ExErrorKind::Conflict);
        assert_eq!(ex.filter_id(), Some("1"));
        assert!(ex.message().contains('2'));
    }
}
