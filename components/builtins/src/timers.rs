//! Timer bindings
//!
//! `setTimeout`/`setInterval` keep their callbacks in a script-side table
//! keyed by timer id; the event loop only carries the id and a
//! [`TimerKind`]. When a timer is due, the engine thread calls
//! [`fire_timer`], which looks the callback up and runs it.

use async_runtime::{delay_from_millis, EventLoop, TimerId};
use rquickjs::function::Func;
use rquickjs::{Ctx, Function};

/// Callback payload the runtime's event loop carries for each timer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Registered by setTimeout; fires once
    Timeout,
    /// Registered by setInterval; fires until cleared
    Interval,
}

impl TimerKind {
    /// Returns true for interval timers.
    pub fn is_repeating(&self) -> bool {
        matches!(self, TimerKind::Interval)
    }
}

/// Installs the native schedule/cancel hooks used by the prelude.
pub fn install(ctx: &Ctx<'_>, event_loop: &EventLoop<TimerKind>) -> rquickjs::Result<()> {
    let globals = ctx.globals();

    let scheduler = event_loop.clone();
    globals.set(
        "__host_timer_schedule",
        Func::from(move |delay_ms: f64, repeating: bool| -> f64 {
            let delay = delay_from_millis(delay_ms);
            let id = if repeating {
                scheduler.schedule_repeating(delay, TimerKind::Interval)
            } else {
                scheduler.schedule_once(delay, TimerKind::Timeout)
            };
            id.0 as f64
        }),
    )?;

    let scheduler = event_loop.clone();
    globals.set(
        "__host_timer_cancel",
        Func::from(move |id: f64| -> bool {
            match timer_id_from_script(id) {
                Some(id) => scheduler.cancel(id),
                None => false,
            }
        }),
    )?;

    Ok(())
}

/// Runs the script callback registered for `id`.
///
/// Pass `rearmed` only when the event loop will fire the timer again; other
/// callbacks are forgotten after this call. Ids without a registered callback
/// (cleared in the meantime) are ignored script-side.
pub fn fire_timer(ctx: &Ctx<'_>, id: TimerId, rearmed: bool) -> rquickjs::Result<()> {
    let fire: Function<'_> = ctx.globals().get("__host_fire_timer")?;
    fire.call::<_, ()>((id.0 as f64, rearmed))
}

fn timer_id_from_script(id: f64) -> Option<TimerId> {
    if id.is_finite() && id >= 1.0 && id.fract() == 0.0 {
        Some(TimerId(id as u64))
    } else {
        None
    }
}
