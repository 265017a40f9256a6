//! Async runtime for the script host.
//!
//! This crate provides the engine-independent pieces of the host runtime:
//! - [`EventLoop`] - Background timer scheduler with start/stop/wait lifecycle
//! - [`TimerQueue`] - Deadline-ordered timer storage used by the event loop
//! - [`ModuleRegistry`] - Name to capability mapping backing `require`
//!
//! # Overview
//!
//! The event loop runs on its own thread but never runs callbacks there.
//! Due timers are handed back to whichever thread calls [`EventLoop::wait`],
//! which is the thread that owns the script engine.
//!
//! # Examples
//!
//! ## Event Loop Usage
//!
//! ```
//! use async_runtime::EventLoop;
//! use std::time::Duration;
//!
//! let event_loop: EventLoop<&'static str> = EventLoop::new();
//! event_loop.start().unwrap();
//! event_loop.schedule_once(Duration::ZERO, "tick");
//! event_loop.request_stop();
//!
//! let mut fired = Vec::new();
//! event_loop
//!     .wait(|_, label| {
//!         fired.push(*label);
//!         Ok(())
//!     })
//!     .unwrap();
//! assert_eq!(fired, vec!["tick"]);
//! ```
//!
//! ## Module Registry Usage
//!
//! ```
//! use async_runtime::{HostError, ModuleRegistry};
//!
//! let mut registry = ModuleRegistry::new();
//! registry.register("answer", 42);
//!
//! assert_eq!(registry.require(Some("answer")), Ok(&42));
//! assert!(matches!(
//!     registry.require(Some("missing")),
//!     Err(HostError::ModuleNotFound { .. })
//! ));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event_loop;
pub mod module;
pub mod timer_queue;

// Re-export main types at crate root
pub use error::{HostError, SchedulerError};
pub use event_loop::{delay_from_millis, EventLoop, MIN_INTERVAL};
pub use module::ModuleRegistry;
pub use timer_queue::{TimerId, TimerQueue};
