//! Timer scheduling
//!
//! Every timer in the client (search debouncing, periodic chart refresh) goes
//! through the [`Scheduler`] trait, so timing can be driven by tokio in the
//! binary and by a virtual clock in tests.

use futures::future::BoxFuture;
use log::debug;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at, sleep};

/// One-shot unit of work.
pub type Task = BoxFuture<'static, ()>;

/// Produces a fresh unit of work for every tick of a repeating timer.
pub type RepeatingTask = Arc<dyn Fn() -> Task + Send + Sync>;

/// Identifies a scheduled timer so it can be cancelled.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TimerHandle(u64);

pub trait Scheduler: Send + Sync {
    /// Runs `task` once after `delay`.
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle;

    /// Runs a task produced by `task` every `interval`, first after one interval.
    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle;

    /// Cancels a timer. Cancelling a fired or unknown timer is a no-op.
    fn cancel(&self, handle: TimerHandle);
}

/// Scheduler backed by tokio timers. Must be used from within a tokio runtime.
#[derive(Debug, Default)]
pub struct TokioScheduler {
    next_id: AtomicU64,
    timers: Mutex<HashMap<u64, JoinHandle<()>>>,
}

impl TokioScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    fn track(&self, join_handle: JoinHandle<()>) -> TimerHandle {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        timers.retain(|_, handle| !handle.is_finished());
        timers.insert(id, join_handle);
        TimerHandle(id)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: Task) -> TimerHandle {
        self.track(tokio::spawn(async move {
            sleep(delay).await;
            task.await;
        }))
    }

    fn schedule_repeating(&self, interval: Duration, task: RepeatingTask) -> TimerHandle {
        self.track(tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + interval, interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                // Ticks don't wait for each other; a slow task overlaps the next tick.
                tokio::spawn(task());
            }
        }))
    }

    fn cancel(&self, handle: TimerHandle) {
        let mut timers = self.timers.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(join_handle) = timers.remove(&handle.0) {
            debug!("Cancelling timer {}", handle.0);
            join_handle.abort();
        }
    }
}

#[cfg(test)]
pub use manual::ManualScheduler;
