//! # Teardown capability.
//!
//! A [`Teardown`] is the only way to release what a mounted behaviour set up.
//! Clones share the same callback.

use std::fmt;
use std::sync::Arc;

/// Release capability returned by a behaviour or registered as a plugin.
#[derive(Clone)]
pub struct Teardown(Arc<dyn Fn() + Send + Sync>);

impl Teardown {
    /// Wraps a release callback.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// A teardown that does nothing.
    pub fn noop() -> Self {
        Self::new(|| {})
    }

    /// Runs the release callback.
    pub fn release(&self) {
        (self.0)()
    }

    /// True if both handles share one callback.
    pub fn same(&self, other: &Teardown) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Teardown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Teardown(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn clones_share_callback() {
        let hits = Arc::new(AtomicUsize::new(0));
        let h = hits.clone();
        let t = Teardown::new(move || {
            h.fetch_add(1, Ordering::SeqCst);
        });
        let copy = t.clone();
        t.release();
        copy.release();
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert!(t.same(&copy));
        assert!(!t.same(&Teardown::noop()));
    }
}
