//! # Resize notifications.
//!
//! [`ResizeNotifier`] is a thin wrapper around [`tokio::sync::broadcast`].
//! The host calls [`ResizeNotifier::notify`] whenever the viewport changes; each
//! hydration pass subscribes once and drops its receiver on `destroy`.
//!
//! ## Rules
//! - **Non-blocking**: `notify()` never blocks and never fails.
//! - **No persistence**: a notification with no subscriber is lost.
//! - **Lag**: a slow listener sees `Lagged` and treats it as one more resize.

use tokio::sync::broadcast;

/// One viewport resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Resize {
    /// New viewport width in CSS pixels, when the host knows it.
    pub width: Option<u32>,
}

/// Broadcast source of [`Resize`] notifications. Cheap to clone.
#[derive(Clone, Debug)]
pub struct ResizeNotifier {
    tx: broadcast::Sender<Resize>,
}

impl Default for ResizeNotifier {
    fn default() -> Self {
        Self::new(64)
    }
}

impl ResizeNotifier {
    /// Creates a notifier with the given ring-buffer capacity (min 1).
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publishes a resize to all current listeners.
    pub fn notify(&self, resize: Resize) {
        let _ = self.tx.send(resize);
    }

    /// Creates a receiver that observes subsequent resizes.
    pub fn subscribe(&self) -> broadcast::Receiver<Resize> {
        self.tx.subscribe()
    }

    /// Number of live listeners.
    pub fn listeners(&self) -> usize {
        self.tx.receiver_count()
    }
}
