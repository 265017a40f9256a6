//! Unit tests for Value

use core_types::{format_number, inspect_number, Value};

#[test]
fn strings_display_verbatim() {
    assert_eq!(Value::String("hello world".into()).to_string(), "hello world");
}

#[test]
fn null_and_undefined_display() {
    assert_eq!(Value::Null.to_string(), "null");
    assert_eq!(Value::Undefined.to_string(), "undefined");
}

#[test]
fn rendered_objects_display_as_rendered() {
    let value = Value::Object("{ a: 1 }".into());
    assert_eq!(value.to_string(), "{ a: 1 }");
}

#[test]
fn format_number_special_values() {
    assert_eq!(format_number(f64::NAN), "NaN");
    assert_eq!(format_number(1.0 / 0.0), "Infinity");
    assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    assert_eq!(format_number(-7.0), "-7");
}

#[test]
fn inspect_number_keeps_negative_zero() {
    assert_eq!(format_number(-0.0), "0");
    assert_eq!(inspect_number(-0.0), "-0");
    assert_eq!(inspect_number(0.0), "0");
    assert_eq!(inspect_number(f64::NEG_INFINITY), "-Infinity");
    assert_eq!(inspect_number(2.5), "2.5");
}
