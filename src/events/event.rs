//! # Lifecycle events emitted by the hydration engine.
//!
//! The [`EventKind`] enum classifies events; [`EventKind::as_label`] is the
//! topic name handlers subscribe to. [`Event`] carries the metadata.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use hydravisor::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::LoadFailed)
//!     .with_key("nav")
//!     .with_behaviour("menu")
//!     .with_reason("behaviour \"menu\" not found");
//!
//! assert_eq!(ev.kind.as_label(), "load-failed");
//! assert_eq!(ev.key.as_deref(), Some("nav"));
//! ```

use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::SystemTime;

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of lifecycle events.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A hydration pass finished seeding records.
    ///
    /// Sets:
    /// - `count`: number of records seeded by this pass
    Hydrated,

    /// A record was created (or refreshed, for keep-alive elements) during discovery.
    ///
    /// Sets:
    /// - `key`, `behaviour`
    RecordSeeded,

    /// A behaviour was mounted.
    ///
    /// Sets:
    /// - `key`, `behaviour`
    ModuleLoaded,

    /// A mounted behaviour was torn down because its query stopped matching.
    ///
    /// Sets:
    /// - `key`, `behaviour`
    /// - `count`: teardown callbacks invoked
    ModuleUnloaded,

    /// Resolving or mounting a behaviour failed; the record stays unloaded.
    ///
    /// Sets:
    /// - `key`, `behaviour`
    /// - `reason`: error message
    LoadFailed,

    /// A record was removed by `destroy` or `shutdown`.
    ///
    /// Sets:
    /// - `key`, `behaviour`
    RecordDestroyed,

    /// A destroy sweep finished.
    ///
    /// Sets:
    /// - `count`: teardown callbacks invoked
    Destroyed,

    /// Host-defined event.
    Custom(Arc<str>),
}

impl EventKind {
    /// Topic name used by [`EventBus`](crate::EventBus) handlers.
    pub fn as_label(&self) -> &str {
        match self {
            EventKind::Hydrated => "hydrated",
            EventKind::RecordSeeded => "record-seeded",
            EventKind::ModuleLoaded => "module-loaded",
            EventKind::ModuleUnloaded => "module-unloaded",
            EventKind::LoadFailed => "load-failed",
            EventKind::RecordDestroyed => "record-destroyed",
            EventKind::Destroyed => "destroyed",
            EventKind::Custom(name) => name,
        }
    }

    /// Host-defined event kind.
    pub fn custom(name: impl Into<Arc<str>>) -> Self {
        EventKind::Custom(name.into())
    }
}

/// Lifecycle event with optional metadata.
#[derive(Debug, Clone)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Record key, if applicable.
    pub key: Option<Arc<str>>,
    /// Behaviour name, if applicable.
    pub behaviour: Option<Arc<str>>,
    /// Human-readable reason (errors, host payloads).
    pub reason: Option<Arc<str>>,
    /// Kind-specific counter.
    pub count: Option<u32>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            key: None,
            behaviour: None,
            reason: None,
            count: None,
        }
    }

    /// Attaches a record key.
    #[inline]
    pub fn with_key(mut self, key: impl Into<Arc<str>>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attaches a behaviour name.
    #[inline]
    pub fn with_behaviour(mut self, name: impl Into<Arc<str>>) -> Self {
        self.behaviour = Some(name.into());
        self
    }

    /// Attaches a human-readable reason.
    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attaches a counter (saturates at `u32::MAX`).
    #[inline]
    pub fn with_count(mut self, n: usize) -> Self {
        self.count = Some(u32::try_from(n).unwrap_or(u32::MAX));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seq_is_monotonic() {
        let a = Event::new(EventKind::Hydrated);
        let b = Event::new(EventKind::Destroyed);
        assert!(b.seq > a.seq);
    }

    #[test]
    fn custom_label_is_its_name() {
        let kind = EventKind::custom("cart:updated");
        assert_eq!(kind.as_label(), "cart:updated");
    }
}
