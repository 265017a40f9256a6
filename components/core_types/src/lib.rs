//! Engine-independent value and error types shared by the host runtime.
//!
//! Script evaluation happens inside an embedded engine whose values cannot
//! outlive the engine context they belong to. The types in this crate are
//! owned snapshots that the host hands to front-ends (the REPL, the file
//! runner) after an evaluation finishes.
//!
//! - [`Value`] - Owned result of an evaluation
//! - [`JsError`] - Script-level exception with message and stack
//! - [`ErrorKind`] - Script error constructor the exception came from
//!
//! # Examples
//!
//! ```
//! use core_types::{ErrorKind, JsError, Value};
//!
//! let value = Value::Number(42.0);
//! assert!(!value.is_undefined());
//! assert_eq!(value.type_of(), "number");
//!
//! let error = JsError::new(ErrorKind::TypeError, "undefined is not a function");
//! assert_eq!(error.to_string(), "TypeError: undefined is not a function");
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

mod error;
mod value;

pub use error::{ErrorKind, JsError};
pub use value::{format_number, inspect_number, Value};
