//! REPL (Read-Eval-Print Loop) implementation
//!
//! The loop has two states. In [`ReplState::Ready`] each line starts a new
//! statement; lines starting with `.` are commands. When the buffered text
//! opens more brackets than it closes, the loop switches to
//! [`ReplState::Continuation`] and keeps appending lines until it balances.

use crate::error::{CliError, CliResult};
use crate::runtime::Runtime;
use core_types::{inspect_number, Value};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{self, Write};

/// Prompt shown when a new statement starts
pub const PROMPT: &str = "> ";
/// Prompt shown while a statement is still open
pub const CONTINUATION_PROMPT: &str = "... ";
/// Printed when the loop ends, whichever way it ends
pub const FAREWELL: &str = "Goodbye!";
/// Origin reported for REPL input
pub const REPL_ORIGIN: &str = "<repl>";

const CLEAR_SCREEN: &str = "\x1B[2J\x1B[1;1H";

/// Source of input lines
pub trait LineReader {
    /// Read one line without its terminator.
    ///
    /// `None` means the user is done: end of input or an interrupt.
    fn read_line(&mut self, prompt: &str) -> CliResult<Option<String>>;

    /// Remember a submitted statement for recall
    fn add_history(&mut self, entry: &str);
}

/// Whatever the REPL submits complete statements to
pub trait Evaluator {
    /// Evaluate one statement
    fn evaluate(&mut self, source: &str) -> CliResult<Value>;
}

impl Evaluator for Runtime {
    fn evaluate(&mut self, source: &str) -> CliResult<Value> {
        self.execute_named(REPL_ORIGIN, source)
    }
}

/// Terminal line reader backed by rustyline
pub struct EditorReader {
    editor: DefaultEditor,
}

impl EditorReader {
    /// Set up the terminal editor
    pub fn new() -> CliResult<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| CliError::Repl(format!("Failed to initialize editor: {}", e)))?;
        Ok(Self { editor })
    }
}

impl LineReader for EditorReader {
    fn read_line(&mut self, prompt: &str) -> CliResult<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(err) => Err(CliError::Repl(format!("Readline error: {}", err))),
        }
    }

    fn add_history(&mut self, entry: &str) {
        if let Err(err) = self.editor.add_history_entry(entry) {
            tracing::debug!(%err, "history entry dropped");
        }
    }
}

/// Where the loop is in the current statement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    /// Waiting for a new statement or command
    Ready,
    /// Buffering an unbalanced statement
    Continuation,
}

/// Whether the loop keeps going after a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplFlow {
    /// Read the next line
    Continue,
    /// Stop the loop
    Exit,
}

/// REPL session state plus its output streams
pub struct Repl<O, E> {
    out: O,
    err: E,
    buffer: String,
    state: ReplState,
}

impl<O: Write, E: Write> Repl<O, E> {
    /// Results go to `out`, errors to `err`
    pub fn new(out: O, err: E) -> Self {
        Self {
            out,
            err,
            buffer: String::new(),
            state: ReplState::Ready,
        }
    }

    /// Current state
    pub fn state(&self) -> ReplState {
        self.state
    }

    /// Text buffered for the statement in progress
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Prompt for the current state
    pub fn prompt(&self) -> &'static str {
        match self.state {
            ReplState::Ready => PROMPT,
            ReplState::Continuation => CONTINUATION_PROMPT,
        }
    }

    /// Run until an exit command or the end of input
    pub fn run<R, V>(&mut self, reader: &mut R, evaluator: &mut V) -> CliResult<()>
    where
        R: LineReader,
        V: Evaluator,
    {
        writeln!(self.out, "hostjs v{}", env!("CARGO_PKG_VERSION")).map_err(output_failed)?;
        writeln!(self.out, "Type .help for more information.").map_err(output_failed)?;

        loop {
            let line = match reader.read_line(self.prompt())? {
                Some(line) => line,
                None => {
                    writeln!(self.out, "{}", FAREWELL).map_err(output_failed)?;
                    return Ok(());
                }
            };
            if self.handle_line(&line, reader, evaluator)? == ReplFlow::Exit {
                return Ok(());
            }
        }
    }

    /// Process one input line
    pub fn handle_line<R, V>(
        &mut self,
        line: &str,
        reader: &mut R,
        evaluator: &mut V,
    ) -> CliResult<ReplFlow>
    where
        R: LineReader,
        V: Evaluator,
    {
        let trimmed = line.trim();
        let starts_statement = self.state == ReplState::Ready;

        if starts_statement && trimmed.starts_with('.') {
            return self.handle_command(trimmed).map_err(output_failed);
        }

        if starts_statement {
            self.buffer.clear();
            self.buffer.push_str(line);
        } else {
            self.buffer.push_str(line);
            self.buffer.push('\n');
        }

        if is_incomplete(&self.buffer) {
            if starts_statement {
                self.buffer.push('\n');
                self.state = ReplState::Continuation;
            }
            return Ok(ReplFlow::Continue);
        }

        if starts_statement && !trimmed.is_empty() {
            reader.add_history(line);
        }

        let source = std::mem::take(&mut self.buffer);
        self.state = ReplState::Ready;

        match evaluator.evaluate(&source) {
            Ok(value) => {
                if !value.is_undefined() {
                    writeln!(self.out, "{}", format_value(&value)).map_err(output_failed)?;
                }
            }
            Err(error) => {
                tracing::debug!(%error, script = error.is_script_exception(), "statement failed");
                writeln!(self.err, "Error: {}", describe_error(&error)).map_err(output_failed)?;
            }
        }
        Ok(ReplFlow::Continue)
    }

    fn handle_command(&mut self, command: &str) -> io::Result<ReplFlow> {
        match command {
            ".exit" | ".quit" => {
                writeln!(self.out, "{}", FAREWELL)?;
                return Ok(ReplFlow::Exit);
            }
            ".help" => {
                writeln!(self.out, "REPL Commands:")?;
                writeln!(self.out, "  .help     Show this help message")?;
                writeln!(self.out, "  .clear    Clear the screen")?;
                writeln!(self.out, "  .exit     Exit the REPL")?;
                writeln!(self.out, "  .quit     Exit the REPL")?;
            }
            ".clear" => {
                write!(self.out, "{}", CLEAR_SCREEN)?;
                self.out.flush()?;
            }
            _ => {
                writeln!(
                    self.out,
                    "Unknown command: {} (type .help for available commands)",
                    command
                )?;
            }
        }
        Ok(ReplFlow::Continue)
    }
}

/// Run the interactive REPL on the terminal
pub fn run_repl(runtime: &mut Runtime) -> CliResult<()> {
    let mut reader = EditorReader::new()?;
    Repl::new(io::stdout(), io::stderr()).run(&mut reader, runtime)
}

/// Check whether the input still has open brackets
///
/// Counts each of `{}`, `[]` and `()` separately; the input is incomplete
/// if any family has more openers than closers. Quotes and comments are not
/// considered, and surplus closers never make input incomplete.
pub fn is_incomplete(input: &str) -> bool {
    let mut braces = 0i64;
    let mut brackets = 0i64;
    let mut parens = 0i64;

    for c in input.chars() {
        match c {
            '{' => braces += 1,
            '}' => braces -= 1,
            '[' => brackets += 1,
            ']' => brackets -= 1,
            '(' => parens += 1,
            ')' => parens -= 1,
            _ => {}
        }
    }

    braces > 0 || brackets > 0 || parens > 0
}

/// Format a JavaScript value for display
pub fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => format!(
            "'{}'",
            s.replace('\\', "\\\\")
                .replace('\'', "\\'")
                .replace('\n', "\\n")
        ),
        Value::Number(n) => inspect_number(*n),
        other => other.to_string(),
    }
}

fn describe_error(error: &CliError) -> String {
    match error {
        CliError::Script { error, .. } | CliError::Syntax { error, .. } => error.to_string(),
        other => other.to_string(),
    }
}

fn output_failed(err: io::Error) -> CliError {
    CliError::Repl(format!("failed to write output: {}", err))
}
