//! # Trailing-edge debounce.
//!
//! [`Debouncer::call`] cancels any pending run and schedules a new one `wait`
//! from now; the action fires once the calls stop for `wait`.
//!
//! ```text
//! call ──┐ call ──┐ call ──┐
//!        ▼        ▼        ▼
//!   [timer]x [timer]x [timer]──── wait ────► action()
//! ```
//!
//! ## Rules
//! - Each scheduled run is its own tokio task; rescheduling aborts the previous one.
//! - `wait = 0` still defers the action to a spawned task.
//! - Dropping the debouncer cancels the pending run.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;

type Action = Arc<dyn Fn() + Send + Sync>;

/// Cancel-and-reschedule timer around an action.
pub struct Debouncer {
    wait: Duration,
    action: Action,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl Debouncer {
    /// Creates a debouncer running `action` after `wait` of quiet.
    pub fn new<F>(wait: Duration, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            wait,
            action: Arc::new(action),
            pending: Mutex::new(None),
        }
    }

    /// Schedules the action, replacing any run still waiting.
    ///
    /// Must be called from within a tokio runtime.
    pub fn call(&self) {
        let action = Arc::clone(&self.action);
        let wait = self.wait;
        let mut pending = self.pending.lock();
        if let Some(prev) = pending.take() {
            prev.abort();
        }
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(wait).await;
            action();
        }));
    }

    /// Drops the pending run, if any.
    pub fn cancel(&self) {
        if let Some(prev) = self.pending.lock().take() {
            prev.abort();
        }
    }

    /// True while a scheduled run has not fired yet.
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .as_ref()
            .is_some_and(|h| !h.is_finished())
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
