//! Event loop implementation.
//!
//! The event loop owns the timer queue and a dedicated scheduler thread. The
//! thread only decides *when* timers are due; it never runs their callbacks.
//! Due timers are sent over a channel to the thread blocked in
//! [`EventLoop::wait`], which is the thread that owns the script engine.
//!
//! Lifecycle of one execution:
//! 1. [`start`](EventLoop::start) spawns the scheduler thread
//! 2. timers are scheduled and cancelled from any thread
//! 3. [`request_stop`](EventLoop::request_stop) lets the thread exit once idle
//! 4. [`wait`](EventLoop::wait) runs fired callbacks until no timer is pending

use crate::error::SchedulerError;
use crate::timer_queue::{TimerId, TimerQueue};
use core_types::JsError;
use crossbeam::channel::{self, Receiver, Sender};
use parking_lot::{Condvar, Mutex};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Shortest period an interval timer may have.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Converts a script-supplied millisecond delay into a [`Duration`].
///
/// Negative, NaN and infinite delays are treated as zero.
///
/// # Examples
///
/// ```
/// use async_runtime::delay_from_millis;
/// use std::time::Duration;
///
/// assert_eq!(delay_from_millis(250.0), Duration::from_millis(250));
/// assert_eq!(delay_from_millis(-5.0), Duration::ZERO);
/// assert_eq!(delay_from_millis(f64::NAN), Duration::ZERO);
/// ```
pub fn delay_from_millis(ms: f64) -> Duration {
    if ms.is_finite() && ms > 0.0 {
        Duration::from_secs_f64(ms / 1000.0)
    } else {
        Duration::ZERO
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// No scheduler thread
    Idle,
    /// Thread alive, processing timers
    Running,
    /// Stop requested; thread exits once `wait` sees quiescence
    Stopping,
    /// `wait` told the thread to exit
    ShuttingDown,
}

enum Signal {
    Fired(TimerId),
    /// Pending count may have dropped to zero without a fire
    Wake,
}

struct State<C> {
    queue: TimerQueue<C>,
    phase: Phase,
}

struct Shared<C> {
    state: Mutex<State<C>>,
    wakeup: Condvar,
    signal_tx: Sender<Signal>,
    signal_rx: Receiver<Signal>,
    worker: Mutex<Option<JoinHandle<()>>>,
}

/// A background timer scheduler.
///
/// `C` is the callback payload stored with each timer. It is cloned out of
/// the queue and passed to the `wait` handler each time the timer fires.
/// Cloning an `EventLoop` yields another handle to the same scheduler.
///
/// # Examples
///
/// ```
/// use async_runtime::EventLoop;
/// use std::time::Duration;
///
/// let event_loop = EventLoop::new();
/// event_loop.start().unwrap();
///
/// let id = event_loop.schedule_once(Duration::from_secs(60), ());
/// assert!(event_loop.cancel(id));
///
/// event_loop.request_stop();
/// event_loop.wait(|_, _| Ok(())).unwrap();
/// assert!(!event_loop.is_running());
/// ```
pub struct EventLoop<C> {
    shared: Arc<Shared<C>>,
}

impl<C> Clone for EventLoop<C> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<C> std::fmt::Debug for EventLoop<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.shared.state.lock();
        f.debug_struct("EventLoop")
            .field("phase", &state.phase)
            .field("pending", &state.queue.len())
            .finish()
    }
}

impl<C> Default for EventLoop<C>
where
    C: Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<C> EventLoop<C>
where
    C: Clone + Send + 'static,
{
    /// Creates an idle event loop with no timers.
    pub fn new() -> Self {
        let (signal_tx, signal_rx) = channel::unbounded();
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    queue: TimerQueue::new(),
                    phase: Phase::Idle,
                }),
                wakeup: Condvar::new(),
                signal_tx,
                signal_rx,
                worker: Mutex::new(None),
            }),
        }
    }

    /// Spawns the scheduler thread.
    ///
    /// Timers scheduled before `start` are picked up immediately.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::AlreadyRunning`] if the thread is alive, or
    /// [`SchedulerError::Spawn`] if the OS refuses a new thread.
    pub fn start(&self) -> Result<(), SchedulerError> {
        let mut worker = self.shared.worker.lock();
        {
            let mut state = self.shared.state.lock();
            if state.phase != Phase::Idle {
                return Err(SchedulerError::AlreadyRunning);
            }
            state.phase = Phase::Running;
        }

        let shared = Arc::clone(&self.shared);
        let spawned = thread::Builder::new()
            .name("event-loop".to_string())
            .spawn(move || run_scheduler(shared));

        match spawned {
            Ok(handle) => {
                *worker = Some(handle);
                tracing::debug!("event loop started");
                Ok(())
            }
            Err(err) => {
                self.shared.state.lock().phase = Phase::Idle;
                Err(SchedulerError::Spawn(err))
            }
        }
    }

    /// Asks the scheduler thread to exit once no timers are pending.
    ///
    /// Timers already queued still fire once, but fired intervals are no
    /// longer rescheduled, so `wait` returns once the current queue empties.
    /// Calling this more than once has no further effect.
    pub fn request_stop(&self) {
        let mut state = self.shared.state.lock();
        if state.phase == Phase::Running {
            state.phase = Phase::Stopping;
            tracing::debug!(pending = state.queue.len(), "event loop stop requested");
        }
        self.shared.wakeup.notify_all();
    }

    /// Blocks until no timers are pending, running each fired callback on the
    /// calling thread through `on_fire`.
    ///
    /// Callback errors and panics do not stop the loop; the first one is
    /// returned after the loop has drained. If a stop was requested, the
    /// scheduler thread has exited by the time this returns.
    ///
    /// # Errors
    ///
    /// [`SchedulerError::Callback`] carrying the first callback failure, or
    /// [`SchedulerError::NotStarted`] when timers are pending but the loop was
    /// never started.
    pub fn wait<F>(&self, mut on_fire: F) -> Result<(), SchedulerError>
    where
        F: FnMut(TimerId, &C) -> Result<(), JsError>,
    {
        let mut first_error: Option<JsError> = None;

        loop {
            if let Ok(signal) = self.shared.signal_rx.try_recv() {
                if let Signal::Fired(id) = signal {
                    self.dispatch(id, &mut on_fire, &mut first_error);
                }
                continue;
            }

            {
                let mut state = self.shared.state.lock();
                if state.queue.is_empty() {
                    if state.phase == Phase::Stopping {
                        state.phase = Phase::ShuttingDown;
                        self.shared.wakeup.notify_all();
                        drop(state);
                        self.join_worker();
                    }
                    break;
                }
                if state.phase == Phase::Idle {
                    return Err(SchedulerError::NotStarted {
                        pending: state.queue.len(),
                    });
                }
            }

            match self.shared.signal_rx.recv() {
                Ok(Signal::Fired(id)) => self.dispatch(id, &mut on_fire, &mut first_error),
                Ok(Signal::Wake) => {}
                // both ends live in `shared`, so this cannot disconnect
                Err(_) => break,
            }
        }

        match first_error {
            Some(error) => Err(SchedulerError::Callback(error)),
            None => Ok(()),
        }
    }

    fn dispatch<F>(&self, id: TimerId, on_fire: &mut F, first_error: &mut Option<JsError>)
    where
        F: FnMut(TimerId, &C) -> Result<(), JsError>,
    {
        let callback = match self.shared.state.lock().queue.fired(id) {
            Some(callback) => callback.clone(),
            // cancelled between firing and dispatch
            None => return,
        };

        tracing::trace!(timer = %id, "dispatching timer");
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| on_fire(id, &callback)))
            .unwrap_or_else(|payload| {
                Err(JsError::internal(format!(
                    "timer callback panicked: {}",
                    panic_message(payload.as_ref())
                )))
            });

        if let Err(error) = outcome {
            tracing::warn!(timer = %id, %error, "timer callback failed");
            first_error.get_or_insert(error);
        }

        let mut state = self.shared.state.lock();
        if state.phase == Phase::Running {
            state.queue.complete(id, Instant::now());
        } else {
            // once stopping, fired intervals are not rescheduled
            state.queue.retire(id);
        }
        self.shared.wakeup.notify_all();
    }

    /// Schedules `callback` to fire once after `delay`.
    pub fn schedule_once(&self, delay: Duration, callback: C) -> TimerId {
        self.schedule(delay, None, callback)
    }

    /// Schedules `callback` to fire every `interval` until cancelled.
    ///
    /// Periods shorter than [`MIN_INTERVAL`] are raised to it.
    pub fn schedule_repeating(&self, interval: Duration, callback: C) -> TimerId {
        let interval = interval.max(MIN_INTERVAL);
        self.schedule(interval, Some(interval), callback)
    }

    fn schedule(&self, delay: Duration, interval: Option<Duration>, callback: C) -> TimerId {
        let mut state = self.shared.state.lock();
        let id = state
            .queue
            .insert(delay, interval, callback, Instant::now());
        tracing::trace!(timer = %id, ?delay, repeating = interval.is_some(), "timer scheduled");
        self.shared.wakeup.notify_all();
        id
    }

    /// Cancels a timer of either kind.
    ///
    /// Returns false if `id` already fired (one-shot), was cancelled before,
    /// or never existed. None of these are errors.
    pub fn cancel(&self, id: TimerId) -> bool {
        let mut state = self.shared.state.lock();
        let removed = state.queue.cancel(id);
        if removed {
            tracing::trace!(timer = %id, "timer cancelled");
            if state.queue.is_empty() {
                // a waiter blocked on the channel must re-check the count
                let _ = self.shared.signal_tx.send(Signal::Wake);
            }
            self.shared.wakeup.notify_all();
        }
        removed
    }

    /// Number of live timers.
    pub fn pending(&self) -> usize {
        self.shared.state.lock().queue.len()
    }

    /// Returns true between `request_stop` and the end of the following `wait`.
    ///
    /// Interval timers fired in this state will not fire again.
    pub fn is_stopping(&self) -> bool {
        self.shared.state.lock().phase == Phase::Stopping
    }

    /// Returns true while the scheduler thread is alive.
    pub fn is_running(&self) -> bool {
        self.shared.state.lock().phase != Phase::Idle
    }

    /// Stops the scheduler thread immediately, leaving pending timers queued.
    ///
    /// Used when the owner is torn down with work still outstanding.
    pub fn shutdown(&self) {
        {
            let mut state = self.shared.state.lock();
            if state.phase == Phase::Idle {
                return;
            }
            state.phase = Phase::ShuttingDown;
            self.shared.wakeup.notify_all();
        }
        self.join_worker();
    }

    fn join_worker(&self) {
        let handle = self.shared.worker.lock().take();
        if let Some(handle) = handle {
            if handle.join().is_err() {
                tracing::error!("event loop thread panicked");
                self.shared.state.lock().phase = Phase::Idle;
            }
        }
        tracing::debug!("event loop stopped");
    }
}

fn run_scheduler<C>(shared: Arc<Shared<C>>) {
    let mut state = shared.state.lock();
    loop {
        if state.phase == Phase::ShuttingDown {
            break;
        }

        let now = Instant::now();
        while let Some(id) = state.queue.pop_due(now) {
            tracing::trace!(timer = %id, "timer due");
            // the receiver lives in `shared`, so sending cannot fail
            let _ = shared.signal_tx.send(Signal::Fired(id));
        }

        match state.queue.next_deadline() {
            Some(deadline) => {
                shared.wakeup.wait_until(&mut state, deadline);
            }
            None => shared.wakeup.wait(&mut state),
        }
    }
    state.phase = Phase::Idle;
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
