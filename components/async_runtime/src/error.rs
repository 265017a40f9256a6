//! Host-side error types.

use core_types::JsError;

/// A failure that originates in the host rather than in script code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    /// `require` was called with a name nothing is registered under
    #[error("Cannot find module '{name}'")]
    ModuleNotFound {
        /// The requested module name
        name: String,
    },

    /// A host function was called with missing or mistyped arguments
    #[error("{function}: {reason}")]
    InvalidArgument {
        /// The host function that rejected its arguments
        function: String,
        /// What was wrong
        reason: String,
    },
}

impl HostError {
    /// Stable machine-readable code attached to the script-visible error.
    pub fn code(&self) -> &'static str {
        match self {
            HostError::ModuleNotFound { .. } => "MODULE_NOT_FOUND",
            HostError::InvalidArgument { .. } => "ERR_INVALID_ARG_TYPE",
        }
    }
}

/// Errors from the event loop lifecycle.
#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    /// `start` was called while the scheduler thread is alive
    #[error("event loop is already running")]
    AlreadyRunning,

    /// `wait` was called with pending timers but nothing to fire them
    #[error("event loop has {pending} pending timer(s) but was never started")]
    NotStarted {
        /// Number of live timers at the time of the call
        pending: usize,
    },

    /// The scheduler thread could not be spawned
    #[error("failed to spawn event loop thread: {0}")]
    Spawn(#[source] std::io::Error),

    /// A timer callback failed; the remaining timers still ran
    #[error("timer callback failed: {0}")]
    Callback(#[source] JsError),
}
