//! Script-level error types.
//!
//! A [`JsError`] is what the host keeps after an exception escaped script
//! code: the constructor kind, the message and, when the engine produced one,
//! the stack trace text.

use std::fmt;

/// The kind of script error.
///
/// These correspond to the engine's built-in error constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Plain `Error`, or any value thrown that is not a known error type
    Error,
    /// Syntax error in source code
    SyntaxError,
    /// Type error (e.g., calling a non-function)
    TypeError,
    /// Reference to an undefined variable
    ReferenceError,
    /// Value out of allowed range
    RangeError,
    /// Error in eval() function
    EvalError,
    /// Error in URI handling functions
    URIError,
    /// Internal engine or host error surfaced as an exception
    InternalError,
}

impl ErrorKind {
    /// Maps an error's `name` property to its kind.
    ///
    /// Unknown names (user-defined error classes) map to [`ErrorKind::Error`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "SyntaxError" => ErrorKind::SyntaxError,
            "TypeError" => ErrorKind::TypeError,
            "ReferenceError" => ErrorKind::ReferenceError,
            "RangeError" => ErrorKind::RangeError,
            "EvalError" => ErrorKind::EvalError,
            "URIError" => ErrorKind::URIError,
            "InternalError" => ErrorKind::InternalError,
            _ => ErrorKind::Error,
        }
    }

    /// The constructor name for this kind.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorKind::Error => "Error",
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ReferenceError => "ReferenceError",
            ErrorKind::RangeError => "RangeError",
            ErrorKind::EvalError => "EvalError",
            ErrorKind::URIError => "URIError",
            ErrorKind::InternalError => "InternalError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A script exception with message and stack trace.
///
/// # Examples
///
/// ```
/// use core_types::{ErrorKind, JsError};
///
/// let error = JsError::new(ErrorKind::ReferenceError, "x is not defined")
///     .with_stack("    at <eval> (repl:1)");
///
/// assert_eq!(error.message, "x is not defined");
/// assert!(error.stack.is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct JsError {
    /// The type of error
    pub kind: ErrorKind,
    /// Human-readable error message
    pub message: String,
    /// Stack trace text, if the engine recorded one
    pub stack: Option<String>,
}

impl JsError {
    /// Creates an error without a stack trace.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            stack: None,
        }
    }

    /// Attaches stack trace text. Blank stacks are dropped.
    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        let stack = stack.into();
        self.stack = if stack.trim().is_empty() {
            None
        } else {
            Some(stack)
        };
        self
    }

    /// Shorthand for an [`ErrorKind::InternalError`].
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InternalError, message)
    }

    /// Returns true if this error came from a failed compile.
    pub fn is_syntax_error(&self) -> bool {
        self.kind == ErrorKind::SyntaxError
    }
}
