//! Call coalescing on top of a [`Scheduler`].

use crate::scheduler::{Scheduler, TimerHandle};
use futures::FutureExt;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Delays a callback until `wait` has passed without another call.
///
/// Each [`Debouncer::call`] cancels the invocation scheduled by the previous call,
/// so a burst of calls fires the callback once, with the arguments of the last one.
/// A pending invocation is simply abandoned if the debouncer is dropped.
pub struct Debouncer<A> {
    scheduler: Arc<dyn Scheduler>,
    wait: Duration,
    callback: Arc<dyn Fn(A) + Send + Sync>,
    pending: Mutex<Option<TimerHandle>>,
}

impl<A: Send + 'static> Debouncer<A> {
    pub fn new<F>(scheduler: Arc<dyn Scheduler>, wait: Duration, callback: F) -> Self
    where
        F: Fn(A) + Send + Sync + 'static,
    {
        Self {
            scheduler,
            wait,
            callback: Arc::new(callback),
            pending: Mutex::new(None),
        }
    }

    pub fn call(&self, args: A) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            self.scheduler.cancel(handle);
        }
        let callback = self.callback.clone();
        let handle = self
            .scheduler
            .schedule(self.wait, async move { callback(args) }.boxed());
        *pending = Some(handle);
    }

    /// Drops the pending invocation, if any.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(handle) = pending.take() {
            self.scheduler.cancel(handle);
        }
    }
}
