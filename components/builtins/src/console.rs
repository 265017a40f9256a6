//! Console object output routing
//!
//! Formatting happens script-side in the bootstrap prelude; the host only
//! receives a level and the finished line.

use rquickjs::function::Func;
use rquickjs::Ctx;
use std::cell::RefCell;
use std::fmt;
use std::io::Write;
use std::rc::Rc;

/// Severity of a console line, one per console method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleLevel {
    /// console.log
    Log,
    /// console.info
    Info,
    /// console.debug
    Debug,
    /// console.warn
    Warn,
    /// console.error
    Error,
}

impl ConsoleLevel {
    /// Parses the level name the prelude passes to the host.
    ///
    /// Unknown names are treated as [`ConsoleLevel::Log`].
    pub fn from_name(name: &str) -> Self {
        match name {
            "info" => ConsoleLevel::Info,
            "debug" => ConsoleLevel::Debug,
            "warn" => ConsoleLevel::Warn,
            "error" => ConsoleLevel::Error,
            _ => ConsoleLevel::Log,
        }
    }

    /// Returns true for levels that go to standard error.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, ConsoleLevel::Warn | ConsoleLevel::Error)
    }
}

impl fmt::Display for ConsoleLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConsoleLevel::Log => "log",
            ConsoleLevel::Info => "info",
            ConsoleLevel::Debug => "debug",
            ConsoleLevel::Warn => "warn",
            ConsoleLevel::Error => "error",
        };
        f.write_str(name)
    }
}

/// Console output writer trait
pub trait ConsoleWriter {
    /// Write one formatted console line
    fn write(&self, level: ConsoleLevel, message: &str);
}

/// Default writer: log/info/debug to stdout, warn/error to stderr
struct StdioWriter;

impl ConsoleWriter for StdioWriter {
    fn write(&self, level: ConsoleLevel, message: &str) {
        // a closed pipe must not turn into a script exception
        if level.is_diagnostic() {
            let _ = writeln!(std::io::stderr().lock(), "{}", message);
        } else {
            let _ = writeln!(std::io::stdout().lock(), "{}", message);
        }
    }
}

/// Writer that captures output to a vector
struct CaptureWriter {
    output: Rc<RefCell<Vec<String>>>,
}

impl ConsoleWriter for CaptureWriter {
    fn write(&self, _level: ConsoleLevel, message: &str) {
        self.output.borrow_mut().push(message.to_string());
    }
}

/// Console object
///
/// Owns the writer that the script-facing `console` methods end up in.
#[derive(Clone)]
pub struct ConsoleObject {
    writer: Rc<dyn ConsoleWriter>,
}

impl ConsoleObject {
    /// Create a new console with default stdout/stderr output
    pub fn new() -> Self {
        Self::with_writer(Rc::new(StdioWriter))
    }

    /// Create a console with custom output capture
    pub fn new_with_output(output: Rc<RefCell<Vec<String>>>) -> Self {
        Self::with_writer(Rc::new(CaptureWriter { output }))
    }

    /// Create a console writing through `writer`
    pub fn with_writer(writer: Rc<dyn ConsoleWriter>) -> Self {
        ConsoleObject { writer }
    }

    /// Emit one line at `level`
    pub fn emit(&self, level: ConsoleLevel, message: &str) {
        tracing::trace!(target: "console", %level, "{}", message);
        self.writer.write(level, message);
    }

    /// Installs the native write hook the prelude's `console` calls into.
    pub fn install(&self, ctx: &Ctx<'_>) -> rquickjs::Result<()> {
        let console = self.clone();
        ctx.globals().set(
            "__host_console_write",
            Func::from(move |level: String, message: String| {
                console.emit(ConsoleLevel::from_name(&level), &message);
            }),
        )
    }
}

impl Default for ConsoleObject {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ConsoleObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ConsoleObject { .. }")
    }
}
