//! Error types for the CLI

use async_runtime::{HostError, SchedulerError};
use core_types::JsError;
use std::path::PathBuf;

/// CLI-specific errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The script threw and nothing caught it
    #[error("{origin}: {error}")]
    Script {
        /// Where the source came from (file path, `<eval>`, `<repl>`)
        origin: String,
        /// The thrown error
        error: JsError,
    },

    /// The source failed to compile
    #[error("{origin}: {error}")]
    Syntax {
        /// Where the source came from
        origin: String,
        /// The engine's syntax error
        error: JsError,
    },

    /// A script file could not be read
    #[error("could not read '{}': {source}", path.display())]
    Io {
        /// The file that was requested
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// A host binding rejected a call and the script did not catch it
    #[error(transparent)]
    Host(#[from] HostError),

    /// The event loop could not be driven
    #[error(transparent)]
    Scheduler(#[from] SchedulerError),

    /// The engine itself failed (allocation, setup)
    #[error("engine error: {0}")]
    Engine(String),

    /// REPL error
    #[error("REPL error: {0}")]
    Repl(String),
}

impl CliError {
    /// Returns true if the script raised the error, as opposed to the host.
    pub fn is_script_exception(&self) -> bool {
        matches!(self, CliError::Script { .. })
    }
}

impl From<rquickjs::Error> for CliError {
    fn from(err: rquickjs::Error) -> Self {
        CliError::Engine(err.to_string())
    }
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
