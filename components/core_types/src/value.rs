//! Owned evaluation results.

use std::fmt;

/// The result of evaluating a piece of script, detached from the engine.
///
/// Primitive values are copied out. Objects, arrays, functions and other
/// reference values are rendered to text while the engine context is still
/// alive, since their handles cannot leave it.
///
/// # Examples
///
/// ```
/// use core_types::Value;
///
/// assert!(Value::Undefined.is_undefined());
/// assert_eq!(Value::String("hi".into()).type_of(), "string");
/// assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The "no value" sentinel
    Undefined,
    /// Script null
    Null,
    /// Script boolean
    Boolean(bool),
    /// Script number (IEEE 754 double)
    Number(f64),
    /// Script string
    String(String),
    /// Any non-primitive value, pre-rendered by the engine-side inspector
    Object(String),
}

impl Value {
    /// Returns true for the "no value" sentinel.
    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// The `typeof`-style name of the value's type.
    ///
    /// Rendered objects report `"object"` regardless of their original shape.
    pub fn type_of(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "object",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Object(_) => "object",
        }
    }
}

/// Formats a number the way script code prints it.
///
/// Matches string conversion, so `-0` prints as `0`. Use
/// [`inspect_number`] where the sign of zero should stay visible.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        "NaN".to_string()
    } else if n.is_infinite() {
        if n > 0.0 {
            "Infinity".to_string()
        } else {
            "-Infinity".to_string()
        }
    } else if n == 0.0 {
        // both signed zeros print as "0" in string conversion
        "0".to_string()
    } else {
        n.to_string()
    }
}

/// Formats a number for inspection output such as REPL results.
///
/// Same as [`format_number`] except that negative zero prints as `-0`.
pub fn inspect_number(n: f64) -> String {
    if n == 0.0 && n.is_sign_negative() {
        "-0".to_string()
    } else {
        format_number(n)
    }
}

impl fmt::Display for Value {
    /// Writes the value the way string conversion in script code would.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => f.write_str(&format_number(*n)),
            Value::String(s) => f.write_str(s),
            Value::Object(rendered) => f.write_str(rendered),
        }
    }
}
