//! Executes engine commands against the wall clock

use climate_core::{Cmd, Generation, Notification};
use indexmap::IndexMap;
use std::time::{Duration, Instant};

struct Timer {
    next: Instant,
    every: Duration,
}

struct Scheduled<M> {
    at: Instant,
    msg: M,
}

/// Timers and delayed messages for one engine
pub struct Host<M> {
    timers: IndexMap<Generation, Timer>,
    scheduled: Vec<Scheduled<M>>,
    notifications: Vec<Notification>,
}

impl<M> Default for Host<M> {
    fn default() -> Self {
        Self {
            timers: IndexMap::new(),
            scheduled: Vec::new(),
            notifications: Vec::new(),
        }
    }
}

impl<M> Host<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Carry out a command returned by `update`
    pub fn execute(&mut self, cmd: Cmd<M>, now: Instant) {
        match cmd {
            Cmd::None => {}
            Cmd::Batch(cmds) => {
                for cmd in cmds {
                    self.execute(cmd, now);
                }
            }
            Cmd::StartTimer { generation, every } => {
                tracing::trace!(generation = generation.raw(), "timer started");
                self.timers.insert(
                    generation,
                    Timer {
                        next: now + every,
                        every,
                    },
                );
            }
            Cmd::StopTimer { generation } => {
                self.timers.shift_remove(&generation);
            }
            Cmd::Schedule { msg, delay } => {
                self.scheduled.push(Scheduled {
                    at: now + delay,
                    msg,
                });
            }
            Cmd::Notify(notification) => self.notifications.push(notification),
        }
    }

    /// Messages that are due, ticks first, then scheduled ones in order
    pub fn due(&mut self, now: Instant, tick: impl Fn(Generation) -> M) -> Vec<M> {
        let mut ready = Vec::new();

        for (generation, timer) in self.timers.iter_mut() {
            while timer.next <= now && !timer.every.is_zero() {
                ready.push(tick(*generation));
                timer.next += timer.every;
            }
        }

        let mut pending = Vec::with_capacity(self.scheduled.len());
        for item in self.scheduled.drain(..) {
            if item.at <= now {
                ready.push(item.msg);
            } else {
                pending.push(item);
            }
        }
        self.scheduled = pending;

        ready
    }

    /// Notifications raised since the last call
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Drop everything, e.g. when leaving a screen
    pub fn clear(&mut self) {
        self.timers.clear();
        self.scheduled.clear();
        self.notifications.clear();
    }
}
