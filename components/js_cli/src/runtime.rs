//! Runtime orchestration for JavaScript execution
//!
//! The Runtime struct coordinates all components:
//! - the embedded engine and its single context
//! - the EventLoop behind the timer globals
//! - the module registry behind `require`
//! - the console the script writes to
//!
//! Every call to [`Runtime::execute`] starts the event loop, evaluates the
//! source on the calling thread and then blocks until every timer the script
//! registered has fired or been cancelled. Once evaluation is over, intervals
//! fire one last time instead of being rescheduled. Timer callbacks run on the
//! calling thread too; the event loop's own thread only keeps time.

use crate::error::{CliError, CliResult};
use async_runtime::{EventLoop, HostError, SchedulerError};
use builtins::{
    default_modules, fire_timer, host_error_code, js_error_from_caught, snapshot, ConsoleObject,
    Globals, NativeModule, NativeModules,
};
use core_types::{JsError, Value};
use rquickjs::context::EvalOptions;
use rquickjs::Ctx;
use std::path::Path;
use std::rc::Rc;

/// Origin reported for inline source
pub const EVAL_ORIGIN: &str = "<eval>";

/// Main runtime that orchestrates script execution
pub struct Runtime {
    /// State the installed globals are bound to
    globals: Globals,
    /// The one context scripts run in; lives as long as the runtime
    context: rquickjs::Context,
    engine: rquickjs::Runtime,
}

/// Configures a [`Runtime`] before its context is created.
///
/// # Example
/// ```
/// use js_cli::Runtime;
///
/// let runtime = Runtime::builder().without_default_modules().build().unwrap();
/// assert!(runtime.module_names().is_empty());
/// ```
pub struct RuntimeBuilder {
    console: ConsoleObject,
    default_modules: bool,
    modules: Vec<Rc<dyn NativeModule>>,
}

impl RuntimeBuilder {
    /// Registers an extra capability. A module with the same name as an
    /// earlier one replaces it.
    pub fn with_module<M: NativeModule + 'static>(mut self, module: M) -> Self {
        self.modules.push(Rc::new(module));
        self
    }

    /// Routes console output through `console` instead of stdout/stderr
    pub fn with_console(mut self, console: ConsoleObject) -> Self {
        self.console = console;
        self
    }

    /// Starts from an empty registry instead of the shipped capabilities
    pub fn without_default_modules(mut self) -> Self {
        self.default_modules = false;
        self
    }

    /// Create the engine and install the globals
    ///
    /// # Errors
    /// Returns [`CliError::Engine`] if the engine cannot be created or the
    /// bootstrap fails.
    pub fn build(self) -> CliResult<Runtime> {
        let mut registry = if self.default_modules {
            default_modules()
        } else {
            NativeModules::new()
        };
        for module in self.modules {
            registry.register(module.name(), module);
        }

        let globals = Globals {
            console: self.console,
            event_loop: EventLoop::new(),
            modules: Rc::new(registry),
            last_host_error: Rc::default(),
        };

        let engine = rquickjs::Runtime::new()?;
        let context = rquickjs::Context::full(&engine)?;
        context.with(|ctx| builtins::install(&ctx, &globals))?;
        tracing::debug!(modules = ?globals.modules.names(), "runtime ready");

        Ok(Runtime {
            globals,
            context,
            engine,
        })
    }
}

impl Runtime {
    /// Create a runtime with the default console and capabilities
    ///
    /// # Example
    /// ```
    /// use js_cli::Runtime;
    /// use core_types::Value;
    ///
    /// let mut runtime = Runtime::new().unwrap();
    /// assert_eq!(runtime.execute("6 * 7").unwrap(), Value::Number(42.0));
    /// ```
    pub fn new() -> CliResult<Self> {
        Self::builder().build()
    }

    /// Start configuring a runtime
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder {
            console: ConsoleObject::new(),
            default_modules: true,
            modules: Vec::new(),
        }
    }

    /// Execute a JavaScript file
    ///
    /// # Errors
    /// Returns [`CliError::Io`] naming `path` if it cannot be read, otherwise
    /// whatever [`Runtime::execute_named`] returns.
    ///
    /// # Example
    /// ```no_run
    /// use js_cli::Runtime;
    ///
    /// let mut runtime = Runtime::new().unwrap();
    /// runtime.execute_file("example.js").unwrap();
    /// ```
    pub fn execute_file(&mut self, path: impl AsRef<Path>) -> CliResult<Value> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.execute_named(&path.display().to_string(), &source)
    }

    /// Execute inline source, reported as `<eval>` in errors
    pub fn execute(&mut self, source: &str) -> CliResult<Value> {
        self.execute_named(EVAL_ORIGIN, source)
    }

    /// Execute `source` and drain the event loop before returning
    ///
    /// The loop is drained even when evaluation throws, so timers registered
    /// before the throw still run. The evaluation error takes precedence over
    /// a failing timer callback.
    ///
    /// # Errors
    /// - [`CliError::Syntax`] if the source does not compile
    /// - [`CliError::Host`] if a host binding threw and nothing caught it,
    ///   during evaluation or in a timer callback
    /// - [`CliError::Script`] for any other uncaught exception, including
    ///   one thrown by a timer callback
    pub fn execute_named(&mut self, origin: &str, source: &str) -> CliResult<Value> {
        self.globals.last_host_error.borrow_mut().take();
        self.globals.event_loop.start()?;

        let evaluated = self.evaluate(origin, source);
        if let Err(error) = &evaluated {
            tracing::debug!(origin, %error, "evaluation failed");
        }

        self.globals.event_loop.request_stop();
        let drained = self.drain(origin);

        let value = evaluated?;
        drained?;
        Ok(value)
    }

    fn evaluate(&self, origin: &str, source: &str) -> CliResult<Value> {
        let result = self.context.with(|ctx| {
            ctx.eval_with_options::<rquickjs::Value, _>(source, eval_options())
                .and_then(|value| snapshot(&ctx, value))
                .map_err(|err| self.classify(&ctx, origin, err))
        });
        self.run_pending_jobs();
        result
    }

    fn drain(&self, origin: &str) -> CliResult<()> {
        let event_loop = &self.globals.event_loop;
        let mut host_failures: Vec<(JsError, HostError)> = Vec::new();

        let outcome = event_loop.wait(|id, kind| {
            tracing::trace!(timer = %id, ?kind, "firing timer");
            let rearmed = kind.is_repeating() && !event_loop.is_stopping();
            let fired = self.context.with(|ctx| {
                fire_timer(&ctx, id, rearmed).map_err(|err| {
                    if !err.is_exception() {
                        return JsError::internal(err.to_string());
                    }
                    let (error, host_error) = self.caught_exception(&ctx);
                    if let Some(host_error) = host_error {
                        host_failures.push((error.clone(), host_error));
                    }
                    error
                })
            });
            self.run_pending_jobs();
            fired
        });

        match outcome {
            Ok(()) => Ok(()),
            Err(SchedulerError::Callback(error)) => {
                match host_failures.into_iter().find(|(failed, _)| *failed == error) {
                    Some((_, host_error)) => Err(CliError::Host(host_error)),
                    None => Err(CliError::Script {
                        origin: origin.to_string(),
                        error,
                    }),
                }
            }
            Err(other) => Err(other.into()),
        }
    }

    fn run_pending_jobs(&self) {
        loop {
            match self.engine.execute_pending_job() {
                Ok(true) => {}
                Ok(false) => break,
                Err(exception) => {
                    let error = exception.0.with(|ctx| js_error_from_caught(&ctx, ctx.catch()));
                    tracing::warn!(%error, "promise job threw");
                }
            }
        }
    }

    fn classify(&self, ctx: &Ctx<'_>, origin: &str, err: rquickjs::Error) -> CliError {
        if !err.is_exception() {
            return CliError::Engine(err.to_string());
        }

        let (error, host_error) = self.caught_exception(ctx);
        if let Some(host_error) = host_error {
            return CliError::Host(host_error);
        }

        let origin = origin.to_string();
        if error.is_syntax_error() {
            CliError::Syntax { origin, error }
        } else {
            CliError::Script { origin, error }
        }
    }

    /// Takes the pending exception, paired with the typed host error behind
    /// it when a binding threw it.
    fn caught_exception(&self, ctx: &Ctx<'_>) -> (JsError, Option<HostError>) {
        let caught = ctx.catch();
        let code = host_error_code(&caught);
        let error = js_error_from_caught(ctx, caught);

        // a binding may have thrown earlier and been caught by the script
        let host_error = self
            .globals
            .last_host_error
            .borrow_mut()
            .take()
            .filter(|host_error| {
                code.as_deref() == Some(host_error.code()) && error.message == host_error.to_string()
            });
        (error, host_error)
    }

    /// Names `require` resolves, sorted
    pub fn module_names(&self) -> Vec<String> {
        self.globals
            .modules
            .names()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Number of timers still registered
    pub fn pending_timers(&self) -> usize {
        self.globals.event_loop.pending()
    }

    /// Start the REPL (Read-Eval-Print Loop) on the terminal
    ///
    /// # Errors
    /// Returns `CliError` if the line editor cannot be set up or fails.
    ///
    /// # Example
    /// ```no_run
    /// use js_cli::Runtime;
    ///
    /// let mut runtime = Runtime::new().unwrap();
    /// runtime.repl().unwrap();
    /// ```
    pub fn repl(&mut self) -> CliResult<()> {
        crate::repl::run_repl(self)
    }
}

impl Drop for Runtime {
    fn drop(&mut self) {
        self.globals.event_loop.shutdown();
    }
}

fn eval_options() -> EvalOptions {
    // scripts are classic scripts, not strict-mode modules
    let mut options = EvalOptions::default();
    options.strict = false;
    options
}
