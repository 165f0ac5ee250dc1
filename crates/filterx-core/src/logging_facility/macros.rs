//! Operation boundary macros
//!
//! An operation logs one `start` event, then exactly one `end` or
//! `end_error` event. The closing macros take the `Instant` captured when the
//! operation began and record `duration_ms` themselves.
//!
//! Each macro expands to a block, so it can stand as a match arm.

/// Log the start of an operation
///
/// ```
/// # use filterx_core::log_op_start;
/// log_op_start!("reconcile");
/// log_op_start!("strip", filter_id = "2-1");
/// ```
#[macro_export]
macro_rules! log_op_start {
    ($op:expr) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = filterx_core_types::schema::EVENT_START,
        );
    }};
    ($op:expr, $($field:tt)*) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = filterx_core_types::schema::EVENT_START,
            $($field)*
        );
    }};
}

/// Log the successful end of an operation started at `started`
///
/// ```
/// # use filterx_core::log_op_end;
/// let started = std::time::Instant::now();
/// log_op_end!("reconcile", started = started);
/// ```
#[macro_export]
macro_rules! log_op_end {
    ($op:expr, started = $started:expr) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = filterx_core_types::schema::EVENT_END,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
        );
    }};
    ($op:expr, started = $started:expr, $($field:tt)*) => {{
        tracing::info!(
            component = module_path!(),
            op = $op,
            event = filterx_core_types::schema::EVENT_END,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            $($field)*
        );
    }};
}

/// Log the failed end of an operation started at `started`
///
/// Accepts anything convertible into [`ExError`](crate::errors::ExError), so
/// the stable error code ends up in the event.
///
/// ```
/// # use filterx_core::{log_op_error, errors::FilterError};
/// let started = std::time::Instant::now();
/// let err = FilterError::NotFound { filter_id: "3".to_string() };
/// log_op_error!("remove", err, started = started);
/// ```
#[macro_export]
macro_rules! log_op_error {
    ($op:expr, $err:expr, started = $started:expr) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = filterx_core_types::schema::EVENT_END_ERROR,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
        );
    }};
    ($op:expr, $err:expr, started = $started:expr, $($field:tt)*) => {{
        let ex_err: $crate::errors::ExError = $err.into();
        tracing::error!(
            component = module_path!(),
            op = $op,
            event = filterx_core_types::schema::EVENT_END_ERROR,
            duration_ms = $crate::logging_facility::elapsed_ms($started),
            err.kind = ?ex_err.kind(),
            err.code = ex_err.code(),
            $($field)*
        );
    }};
}
