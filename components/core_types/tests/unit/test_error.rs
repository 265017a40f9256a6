//! Unit tests for JsError and ErrorKind

use core_types::{ErrorKind, JsError};

#[test]
fn error_kind_display_matches_constructor_name() {
    assert_eq!(ErrorKind::TypeError.to_string(), "TypeError");
    assert_eq!(ErrorKind::URIError.to_string(), "URIError");
}

#[test]
fn custom_error_names_fall_back_to_error() {
    assert_eq!(ErrorKind::from_name("HttpError"), ErrorKind::Error);
}

#[test]
fn js_error_keeps_stack_text() {
    let error = JsError::new(ErrorKind::Error, "boom").with_stack("    at f (main.js:3)\n");
    assert_eq!(error.stack.as_deref(), Some("    at f (main.js:3)\n"));
}

#[test]
fn js_error_is_std_error() {
    fn assert_error<E: std::error::Error>(_: &E) {}
    let error = JsError::internal("callback panicked");
    assert_error(&error);
    assert_eq!(error.kind, ErrorKind::InternalError);
}

#[test]
fn syntax_errors_are_flagged() {
    assert!(JsError::new(ErrorKind::SyntaxError, "unexpected token").is_syntax_error());
    assert!(!JsError::new(ErrorKind::TypeError, "not a function").is_syntax_error());
}
