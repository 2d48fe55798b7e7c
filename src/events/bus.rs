//! # Notification bus.
//!
//! [`EventBus`] is a topic-keyed handler registry: handlers subscribe to a topic
//! (an [`EventKind::as_label`](crate::EventKind::as_label) value) or to
//! [`WILDCARD`], and [`EventBus::emit`] calls them synchronously.
//!
//! ## Rules
//! - **Order**: topic handlers in registration order, then wildcard handlers.
//! - **Isolation**: a panicking handler is logged and skipped; the rest still run.
//! - **Re-entrancy**: handlers run with no lock held and may call `on`/`off`/`emit`.
//! - **Cloneable**: clones share the same handler table.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use hydravisor::{Event, EventBus, EventKind};
//!
//! let bus = EventBus::new();
//! let hits = Arc::new(AtomicUsize::new(0));
//! let h = hits.clone();
//! let id = bus.on("module-loaded", move |_ev: &Event| {
//!     h.fetch_add(1, Ordering::SeqCst);
//! });
//!
//! bus.emit(Event::new(EventKind::ModuleLoaded).with_key("nav"));
//! assert!(bus.off("module-loaded", id));
//! bus.emit(Event::new(EventKind::ModuleLoaded).with_key("nav"));
//! assert_eq!(hits.load(Ordering::SeqCst), 1);
//! ```

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::error;

use super::event::Event;
use crate::utils::panic_message;

/// Topic that receives every event.
pub const WILDCARD: &str = "*";

/// Identifies one registered handler, for [`EventBus::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

type Handler = Arc<dyn Fn(&Event) + Send + Sync>;

#[derive(Default)]
struct Table {
    topics: RwLock<HashMap<String, Vec<(HandlerId, Handler)>>>,
    next_id: AtomicU64,
}

/// Topic-keyed event emitter with `on`/`off`/`emit`.
#[derive(Clone, Default)]
pub struct EventBus {
    table: Arc<Table>,
}

impl EventBus {
    /// Creates a bus with no handlers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` for `topic` (or [`WILDCARD`]).
    pub fn on<F>(&self, topic: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        let id = HandlerId(self.table.next_id.fetch_add(1, Ordering::Relaxed));
        self.table
            .topics
            .write()
            .entry(topic.into())
            .or_default()
            .push((id, Arc::new(handler)));
        id
    }

    /// Removes the handler `id` from `topic`. Returns false if it was not there.
    pub fn off(&self, topic: &str, id: HandlerId) -> bool {
        let mut topics = self.table.topics.write();
        let Some(handlers) = topics.get_mut(topic) else {
            return false;
        };
        let before = handlers.len();
        handlers.retain(|(h, _)| *h != id);
        let removed = handlers.len() != before;
        if handlers.is_empty() {
            topics.remove(topic);
        }
        removed
    }

    /// Delivers `event` to handlers of its topic, then to wildcard handlers.
    pub fn emit(&self, event: Event) {
        let handlers: Vec<Handler> = {
            let topics = self.table.topics.read();
            let topic = event.kind.as_label();
            topics
                .get(topic)
                .into_iter()
                .chain(topics.get(WILDCARD).filter(|_| topic != WILDCARD))
                .flatten()
                .map(|(_, h)| Arc::clone(h))
                .collect()
        };

        for handler in handlers {
            if let Err(panic) = catch_unwind(AssertUnwindSafe(|| handler(&event))) {
                error!(
                    topic = event.kind.as_label(),
                    seq = event.seq,
                    "event handler panicked: {}",
                    panic_message(panic.as_ref())
                );
            }
        }
    }

    /// Number of handlers registered for `topic`.
    pub fn handler_count(&self, topic: &str) -> usize {
        self.table.topics.read().get(topic).map_or(0, Vec::len)
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let topics = self.table.topics.read();
        f.debug_struct("EventBus")
            .field("topics", &topics.len())
            .finish()
    }
}
