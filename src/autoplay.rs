//! Autoplay: a periodic timer that advances the carousel, paused while the
//! pointer hovers it.

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::timer::{Scheduler, TimerCallback, TimerId};

pub struct Autoplay {
    scheduler: Rc<dyn Scheduler>,
    interval: Duration,
    timer: Option<TimerId>,
}

impl fmt::Debug for Autoplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Autoplay")
            .field("interval", &self.interval)
            .field("timer", &self.timer)
            .finish_non_exhaustive()
    }
}

impl Autoplay {
    pub fn new(scheduler: Rc<dyn Scheduler>, interval: Duration) -> Self {
        Self {
            scheduler,
            interval,
            timer: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.is_some()
    }

    /// Arms the timer. An already running timer is re-armed, so the next tick
    /// is one full interval away and there is never more than one timer.
    pub fn start(&mut self, tick: TimerCallback) {
        self.stop();
        self.timer = Some(self.scheduler.start_repeating(self.interval, tick));
        tracing::debug!(interval = ?self.interval, "autoplay running");
    }

    /// Disarms the timer. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(id) => {
                self.scheduler.cancel(id);
                tracing::debug!("autoplay stopped");
                true
            }
            None => false,
        }
    }
}

impl Drop for Autoplay {
    fn drop(&mut self) {
        self.stop();
    }
}
