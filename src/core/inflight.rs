//! # In-flight resolution guard.
//!
//! One entry per key whose behaviour is being resolved. [`InFlight::begin`] is
//! the critical section: only the caller that inserts the key may dispatch a
//! resolution for it, so overlapping scans cannot double-load a record.
//!
//! Backed by a [`tokio::sync::watch`] sender so waiters can observe the set
//! draining without polling.

use std::collections::HashSet;

use tokio::sync::watch;

pub(crate) struct InFlight {
    tx: watch::Sender<HashSet<String>>,
}

impl InFlight {
    pub(crate) fn new() -> Self {
        let (tx, _rx) = watch::channel(HashSet::new());
        Self { tx }
    }

    /// Marks `key` in flight. False if it already was.
    pub(crate) fn begin(&self, key: &str) -> bool {
        self.tx.send_if_modified(|set| set.insert(key.to_string()))
    }

    /// Clears `key`.
    pub(crate) fn finish(&self, key: &str) {
        self.tx.send_if_modified(|set| set.remove(key));
    }

    pub(crate) fn contains(&self, key: &str) -> bool {
        self.tx.borrow().contains(key)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.tx.borrow().len()
    }

    /// Completes once nothing is in flight.
    pub(crate) async fn idle(&self) {
        let mut rx = self.tx.subscribe();
        // the sender lives in `self`, so the channel cannot close here
        let _ = rx.wait_for(|set| set.is_empty()).await;
    }
}
