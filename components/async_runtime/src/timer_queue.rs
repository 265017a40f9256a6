//! Deadline-ordered timer storage.
//!
//! The queue is a plain data structure with no locking of its own; the event
//! loop keeps it behind its single mutex. A timer is *live* from insertion
//! until it is cancelled or, for one-shot timers, until its fire completes.
//! While a fire is being handled the timer is live but not armed.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::time::{Duration, Instant};

/// Identifier handed out for every scheduled timer.
///
/// Ids increase monotonically from 1 and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Position in the deadline index: fire time, then insertion sequence.
type Slot = (Instant, u64);

#[derive(Debug)]
struct Timer<C> {
    callback: C,
    interval: Option<Duration>,
    /// `None` while the timer has fired and its callback is being handled.
    slot: Option<Slot>,
}

/// A queue of live timers ordered by fire time.
///
/// Timers with the same fire time come out in insertion order.
///
/// # Examples
///
/// ```
/// use async_runtime::TimerQueue;
/// use std::time::{Duration, Instant};
///
/// let now = Instant::now();
/// let mut queue = TimerQueue::new();
/// let late = queue.insert(Duration::from_millis(10), None, "late", now);
/// let early = queue.insert(Duration::ZERO, None, "early", now);
///
/// let later = now + Duration::from_millis(10);
/// assert_eq!(queue.pop_due(later), Some(early));
/// assert_eq!(queue.pop_due(later), Some(late));
/// ```
#[derive(Debug)]
pub struct TimerQueue<C> {
    next_id: u64,
    next_seq: u64,
    timers: HashMap<TimerId, Timer<C>>,
    deadlines: BTreeMap<Slot, TimerId>,
}

impl<C> TimerQueue<C> {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            next_seq: 0,
            timers: HashMap::new(),
            deadlines: BTreeMap::new(),
        }
    }

    /// Adds a timer firing `delay` after `now`.
    ///
    /// With `interval` set the timer re-arms after every completed fire.
    pub fn insert(
        &mut self,
        delay: Duration,
        interval: Option<Duration>,
        callback: C,
        now: Instant,
    ) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let slot = self.arm(id, now + delay);
        self.timers.insert(
            id,
            Timer {
                callback,
                interval,
                slot: Some(slot),
            },
        );
        id
    }

    fn arm(&mut self, id: TimerId, deadline: Instant) -> Slot {
        let slot = (deadline, self.next_seq);
        self.next_seq += 1;
        self.deadlines.insert(slot, id);
        slot
    }

    /// Removes a live timer. Returns false for unknown or already finished ids.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        match self.timers.remove(&id) {
            Some(timer) => {
                if let Some(slot) = timer.slot {
                    self.deadlines.remove(&slot);
                }
                true
            }
            None => false,
        }
    }

    /// Earliest fire time among armed timers.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.deadlines.keys().next().map(|(deadline, _)| *deadline)
    }

    /// Takes the next timer whose deadline is at or before `now` and disarms it.
    ///
    /// The timer stays live until [`complete`](Self::complete) or
    /// [`cancel`](Self::cancel) is called for it.
    pub fn pop_due(&mut self, now: Instant) -> Option<TimerId> {
        let (&slot, &id) = self.deadlines.iter().next()?;
        if slot.0 > now {
            return None;
        }
        self.deadlines.remove(&slot);
        if let Some(timer) = self.timers.get_mut(&id) {
            timer.slot = None;
        }
        Some(id)
    }

    /// Callback of a timer that has fired and not yet completed.
    ///
    /// Returns `None` for armed, cancelled or finished timers, which makes
    /// stale fire notifications harmless.
    pub fn fired(&self, id: TimerId) -> Option<&C> {
        self.timers
            .get(&id)
            .filter(|timer| timer.slot.is_none())
            .map(|timer| &timer.callback)
    }

    /// Finishes a fire: one-shot timers are dropped, intervals re-armed.
    pub fn complete(&mut self, id: TimerId, now: Instant) {
        let interval = match self.timers.get(&id) {
            Some(timer) if timer.slot.is_none() => timer.interval,
            _ => return,
        };
        match interval {
            Some(period) => {
                let slot = self.arm(id, now + period);
                if let Some(timer) = self.timers.get_mut(&id) {
                    timer.slot = Some(slot);
                }
            }
            None => {
                self.timers.remove(&id);
            }
        }
    }

    /// Finishes a fire without re-arming: the timer is dropped whatever its kind.
    pub fn retire(&mut self, id: TimerId) {
        if self.fired(id).is_some() {
            self.timers.remove(&id);
        }
    }

    /// Returns true if `id` names a live timer.
    pub fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Number of live timers (the pending count).
    pub fn len(&self) -> usize {
        self.timers.len()
    }

    /// Returns true if no timers are live.
    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<C> Default for TimerQueue<C> {
    fn default() -> Self {
        Self::new()
    }
}
