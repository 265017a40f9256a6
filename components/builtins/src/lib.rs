//! Host bindings installed into every script context
//!
//! This crate provides the globals scripts see on top of the bare engine:
//! - `console.log/info/debug/warn/error`
//! - `setTimeout/setInterval/clearTimeout/clearInterval`
//! - `require` backed by a registry of native capabilities
//!
//! The script-facing functions are written in a small bootstrap prelude
//! that sits on top of a handful of native hooks. The hooks are removed from
//! the global object once the prelude has captured them.
//!
//! # Example
//!
//! ```
//! use async_runtime::EventLoop;
//! use builtins::{default_modules, ConsoleObject, Globals};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let output = Rc::new(RefCell::new(Vec::new()));
//! let globals = Globals {
//!     console: ConsoleObject::new_with_output(output.clone()),
//!     event_loop: EventLoop::new(),
//!     modules: Rc::new(default_modules()),
//!     last_host_error: Rc::default(),
//! };
//!
//! let runtime = rquickjs::Runtime::new().unwrap();
//! let context = rquickjs::Context::full(&runtime).unwrap();
//! context
//!     .with(|ctx| {
//!         builtins::install(&ctx, &globals)?;
//!         ctx.eval::<(), _>("console.log('sum', 1 + 2)")
//!     })
//!     .unwrap();
//!
//! assert_eq!(*output.borrow(), vec!["sum 3"]);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod console;
pub mod exception;
pub mod modules;
pub mod timers;
pub mod value;

// Re-export main types for convenience
pub use console::{ConsoleLevel, ConsoleObject, ConsoleWriter};
pub use exception::{host_error_code, js_error_from_caught, throw_host_error};
pub use modules::{default_modules, HostErrorSlot, NativeModule, NativeModules};
pub use timers::{fire_timer, TimerKind};
pub use value::{inspect, snapshot};

use async_runtime::EventLoop;
use rquickjs::Ctx;
use std::rc::Rc;

/// Bootstrap script defining the script-facing globals
pub const PRELUDE: &str = include_str!("prelude.js");

/// Host state the bindings are wired to
pub struct Globals {
    /// Destination of console output
    pub console: ConsoleObject,
    /// Scheduler behind the timer functions
    pub event_loop: EventLoop<TimerKind>,
    /// Capabilities reachable through `require`
    pub modules: Rc<NativeModules>,
    /// Typed error behind the last exception a binding threw
    pub last_host_error: HostErrorSlot,
}

/// Installs all globals into `ctx`. Call once per context.
pub fn install(ctx: &Ctx<'_>, globals: &Globals) -> rquickjs::Result<()> {
    globals.console.install(ctx)?;
    timers::install(ctx, &globals.event_loop)?;
    modules::install(
        ctx,
        Rc::clone(&globals.modules),
        Rc::clone(&globals.last_host_error),
    )?;
    ctx.eval::<(), _>(PRELUDE)
}
