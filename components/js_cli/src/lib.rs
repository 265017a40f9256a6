//! JavaScript host CLI library
//!
//! Provides the Runtime that drives the engine and its event loop, the REPL
//! front-end and the command-line arguments of the `hostjs` binary.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod error;
pub mod repl;
pub mod runtime;

pub use cli::{Cli, Mode};
pub use error::{CliError, CliResult};
pub use repl::{Evaluator, LineReader, Repl, ReplState};
pub use runtime::{Runtime, RuntimeBuilder};
