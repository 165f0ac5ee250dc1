#![allow(clippy::unwrap_used, clippy::expect_used)]

mod common;

use common::{id, leaf};
use filterx_core::errors::ExErrorKind;
use filterx_core::model::Node;
use filterx_core::session::{
    EditSession, EditorView, FilterRequest, Outcome, Redirect, SessionConfig, SessionState,
};
use filterx_core_types::{RequestContext, RequestId, TraceId};

fn session() -> EditSession {
    EditSession::new(SessionConfig::default())
}

fn redirect(query: &str, state: SessionState) -> Outcome {
    Outcome::Redirect(Redirect {
        query: query.to_string(),
        state,
    })
}

#[test]
fn test_remove_child_redirects_into_editing() {
    let outcome = session()
        .handle(&FilterRequest::get("a=1&b=2&c=3&removeFilter=2"))
        .unwrap();
    assert_eq!(
        outcome,
        redirect("a=1&c=3&modifyFilter=1", SessionState::Editing)
    );
}

#[test]
fn test_remove_root_clears_filter() {
    let session = EditSession::new(SessionConfig::default().with_preserve_params(["sort"]));
    let outcome = session
        .handle(&FilterRequest::get(
            "a=1|(b=2&c=3)&sort=name&modifyFilter=1&removeFilter=0",
        ))
        .unwrap();
    assert_eq!(outcome, redirect("sort=name", SessionState::Idle));
}

#[test]
fn test_strip_redirects_into_editing() {
    let outcome = session()
        .handle(&FilterRequest::get("(|a=1)&b=2&stripFilter=1"))
        .unwrap();
    assert_eq!(
        outcome,
        redirect("a=1&b=2&modifyFilter=1", SessionState::Editing)
    );
}

#[test]
fn test_remove_takes_precedence_over_strip() {
    let outcome = session()
        .handle(&FilterRequest::get("(|a=1)&b=2&stripFilter=1&removeFilter=2"))
        .unwrap();
    assert_eq!(
        outcome,
        redirect("(&(|a=1))&modifyFilter=1", SessionState::Editing)
    );
}

#[test]
fn test_modify_without_submission_renders_editor() {
    let outcome = session()
        .handle(&FilterRequest::get("a=1&b=2&modifyFilter=1&addFilter=0"))
        .unwrap();
    assert_eq!(
        outcome,
        Outcome::Render(EditorView {
            filter: Node::match_all(vec![leaf("a", "1"), leaf("b", "2")]),
            insertion_point: Some(id("0")),
            state: SessionState::Editing,
            query: "a=1&b=2&modifyFilter=1".to_string(),
        })
    );
}

#[test]
fn test_add_without_modify_only_marks_insertion_point() {
    let outcome = session()
        .handle(&FilterRequest::get("a=1&b=2&addFilter=2"))
        .unwrap();
    let Outcome::Render(view) = outcome else {
        panic!("expected a rendered view");
    };
    assert_eq!(view.state, SessionState::Idle);
    assert_eq!(view.insertion_point, Some(id("2")));
    assert_eq!(view.filter, Node::match_all(vec![leaf("a", "1"), leaf("b", "2")]));
}

#[test]
fn test_submission_is_reconciled() {
    let outcome = session()
        .handle(&FilterRequest::post(
            "a=1&modifyFilter=1",
            [
                ("value_0", "2"),
                ("operator_new_0", "OR"),
                ("column_new_0", "b"),
                ("value_new_0", "3"),
                ("submit", "Apply"),
            ],
        ))
        .unwrap();
    assert_eq!(
        outcome,
        redirect("a=2|b=3&modifyFilter=1", SessionState::Editing)
    );
}

#[test]
fn test_cancel_discards_edits() {
    let session = EditSession::new(SessionConfig::default().with_preserve_params(["sort"]));
    let outcome = session
        .handle(&FilterRequest::post(
            "a=1&sort=name&modifyFilter=1",
            [("value_0", "2"), ("cancel", "Cancel")],
        ))
        .unwrap();
    assert_eq!(outcome, redirect("a=1&sort=name", SessionState::Idle));
}

#[test]
fn test_cancel_requires_configured_label() {
    let session = EditSession::new(SessionConfig::default().with_cancel_label("Abort"));
    let outcome = session
        .handle(&FilterRequest::post(
            "a=1&modifyFilter=1",
            [("value_0", "2"), ("cancel", "Cancel")],
        ))
        .unwrap();
    assert_eq!(outcome, redirect("a=2&modifyFilter=1", SessionState::Editing));
}

#[test]
fn test_ignored_params_never_reach_the_filter() {
    let session = EditSession::new(SessionConfig::default().with_ignore_params(["_dev"]));
    let outcome = session
        .handle(&FilterRequest::get("a=1&_dev=1&removeFilter=0"))
        .unwrap();
    assert_eq!(outcome, redirect("", SessionState::Idle));
}

#[test]
fn test_plain_request_renders_idle() {
    let outcome = session().handle(&FilterRequest::get("")).unwrap();
    assert_eq!(
        outcome,
        Outcome::Render(EditorView {
            filter: Node::empty(),
            insertion_point: None,
            state: SessionState::Idle,
            query: "modifyFilter=1".to_string(),
        })
    );
}

#[test]
fn test_errors_carry_request_context() {
    let request_id = RequestId::from_string("req-42".to_string());
    let trace_id = TraceId::from_string("trace-7".to_string());
    let request = FilterRequest::get("a=1&b=2&removeFilter=5").with_context(
        RequestContext::with_request_id(request_id.clone()).with_trace_id(trace_id.clone()),
    );

    let err = session().handle(&request).unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
    assert_eq!(err.op(), Some("handle_request"));
    assert_eq!(err.filter_id(), Some("5"));
    assert_eq!(err.request_id(), Some(&request_id));
    assert_eq!(err.trace_id(), Some(&trace_id));
}

#[test]
fn test_unparseable_filter_is_invalid_encoding() {
    let err = session()
        .handle(&FilterRequest::get("a=1)&modifyFilter=1"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::InvalidEncoding);
}

#[test]
fn test_unknown_insertion_point_is_not_found() {
    let err = session()
        .handle(&FilterRequest::get("a=1&modifyFilter=1&addFilter=3"))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::NotFound);
}

#[test]
fn test_conflicting_submission_keeps_query() {
    let err = session()
        .handle(&FilterRequest::post(
            "a=1&b=2&modifyFilter=1",
            [("column_new_1", "x"), ("column_new_2", "y")],
        ))
        .unwrap_err();
    assert_eq!(err.kind(), ExErrorKind::Conflict);
}
