//! Periodic timers as an injectable capability.
//!
//! The carousel never reads a clock. It asks a [`Scheduler`] for a repeating
//! callback and cancels it later. [`TimerQueue`] is the provided
//! implementation: a virtual clock that hosts advance explicitly, either from
//! their frame loop or, in tests, by exact amounts.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::time::Duration;

use slotmap::{SlotMap, new_key_type};

use crate::constants::MIN_TIMER_INTERVAL;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

pub type TimerCallback = Box<dyn FnMut()>;

/// Starts and cancels periodic callbacks.
pub trait Scheduler {
    /// Arms a timer whose first fire happens one `interval` from now.
    fn start_repeating(&self, interval: Duration, callback: TimerCallback) -> TimerId;

    /// Disarms a timer. Returns `false` when the id is unknown or already
    /// cancelled.
    fn cancel(&self, id: TimerId) -> bool;
}

struct TimerData {
    interval: Duration,
    /// Taken out while the callback runs.
    callback: Option<TimerCallback>,
}

/// Queue entry, ordered as a min-heap on fire time.
#[derive(Debug, Clone, Copy)]
struct QueueEntry {
    id: TimerId,
    fire_at: Duration,
    seq: u64,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: BinaryHeap is a max-heap. Ties fire in arming order.
        other
            .fire_at
            .cmp(&self.fire_at)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Default)]
struct QueueState {
    now: Duration,
    timers: SlotMap<TimerId, TimerData>,
    queue: BinaryHeap<QueueEntry>,
    next_seq: u64,
}

impl QueueState {
    /// Queues `id` to fire at `fire_at`. A fire time that saturated to
    /// `Duration::MAX` is never due, so it is not queued at all.
    fn schedule(&mut self, id: TimerId, fire_at: Duration) {
        if fire_at == Duration::MAX {
            tracing::trace!(?id, "timer never comes due");
            return;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(QueueEntry { id, fire_at, seq });
    }

    /// Pops the next entry due at or before `until` whose timer is still
    /// armed.
    fn pop_due(&mut self, until: Duration) -> Option<QueueEntry> {
        while let Some(entry) = self.queue.peek().copied() {
            if entry.fire_at > until {
                return None;
            }
            self.queue.pop();
            if self.timers.contains_key(entry.id) {
                return Some(entry);
            }
        }
        None
    }
}

/// Virtual-time [`Scheduler`].
///
/// Time only moves through [`TimerQueue::advance`]. Callbacks run with no
/// internal borrow held, so they may start or cancel timers, their own
/// included.
#[derive(Default)]
pub struct TimerQueue {
    state: RefCell<QueueState>,
}

impl fmt::Debug for TimerQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("TimerQueue")
            .field("now", &state.now)
            .field("active", &state.timers.len())
            .finish()
    }
}

impl TimerQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.borrow().now
    }

    pub fn active_count(&self) -> usize {
        self.state.borrow().timers.len()
    }

    pub fn is_active(&self, id: TimerId) -> bool {
        self.state.borrow().timers.contains_key(id)
    }

    /// Moves virtual time forward by `dt`, firing every callback that comes
    /// due in fire-time order. A repeating timer that is due several times
    /// within `dt` fires once per period.
    ///
    /// Returns the number of callbacks fired.
    #[tracing::instrument(skip(self), level = "trace")]
    pub fn advance(&self, dt: Duration) -> usize {
        let until = self.state.borrow().now.saturating_add(dt);
        let mut fired = 0;

        loop {
            let (entry, mut callback) = {
                let mut state = self.state.borrow_mut();
                let Some(entry) = state.pop_due(until) else {
                    break;
                };
                state.now = entry.fire_at;
                let Some(callback) = state.timers.get_mut(entry.id).and_then(|t| t.callback.take())
                else {
                    continue;
                };
                (entry, callback)
            };

            callback();
            fired += 1;

            // A callback whose timer was cancelled meanwhile is dropped
            // outside the borrow.
            let cancelled = {
                let mut state = self.state.borrow_mut();
                match state.timers.get_mut(entry.id) {
                    Some(timer) => {
                        timer.callback = Some(callback);
                        let next = entry.fire_at.saturating_add(timer.interval);
                        state.schedule(entry.id, next);
                        None
                    }
                    None => Some(callback),
                }
            };
            drop(cancelled);
        }

        self.state.borrow_mut().now = until;
        fired
    }
}

impl Scheduler for TimerQueue {
    fn start_repeating(&self, interval: Duration, callback: TimerCallback) -> TimerId {
        let interval = interval.max(MIN_TIMER_INTERVAL);
        let mut state = self.state.borrow_mut();
        let id = state.timers.insert(TimerData {
            interval,
            callback: Some(callback),
        });
        let fire_at = state.now.saturating_add(interval);
        state.schedule(id, fire_at);
        tracing::trace!(?id, ?interval, "timer armed");
        id
    }

    fn cancel(&self, id: TimerId) -> bool {
        let removed = self.state.borrow_mut().timers.remove(id);
        if removed.is_some() {
            tracing::trace!(?id, "timer cancelled");
        }
        removed.is_some()
    }
}
