//! # LogWriter: traces every lifecycle event
//!
//! A wildcard bus handler that writes each [`Event`] through `tracing`.
//! Use it for demos or while wiring a host.
//!
//! ## Example output
//! ```text
//! INFO [hydrated] count=2
//! INFO [module-loaded] key="nav" behaviour="menu"
//! INFO [load-failed] key="tabs-1" behaviour="tabs" err="behaviour \"tabs\" not found"
//! INFO [module-unloaded] key="nav" behaviour="menu" released=2
//! INFO [destroyed] released=3
//! ```

use tracing::info;

use crate::events::{Event, EventBus, EventKind, HandlerId, WILDCARD};

/// Event writer handler.
#[derive(Default, Debug, Clone, Copy)]
pub struct LogWriter;

impl LogWriter {
    /// Construct a new [`LogWriter`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Registers the writer on `bus` for every topic.
    pub fn attach(self, bus: &EventBus) -> HandlerId {
        bus.on(WILDCARD, move |e: &Event| self.write(e))
    }

    fn write(&self, e: &Event) {
        let key = e.key.as_deref().unwrap_or("-");
        let behaviour = e.behaviour.as_deref().unwrap_or("-");
        match &e.kind {
            EventKind::Hydrated => {
                info!("[hydrated] count={:?}", e.count);
            }
            EventKind::RecordSeeded => {
                info!("[record-seeded] key={key:?} behaviour={behaviour:?}");
            }
            EventKind::ModuleLoaded => {
                info!("[module-loaded] key={key:?} behaviour={behaviour:?}");
            }
            EventKind::ModuleUnloaded => {
                info!(
                    "[module-unloaded] key={key:?} behaviour={behaviour:?} released={:?}",
                    e.count
                );
            }
            EventKind::LoadFailed => {
                info!(
                    "[load-failed] key={key:?} behaviour={behaviour:?} err={:?}",
                    e.reason.as_deref().unwrap_or("unknown")
                );
            }
            EventKind::RecordDestroyed => {
                info!("[record-destroyed] key={key:?} behaviour={behaviour:?}");
            }
            EventKind::Destroyed => {
                info!("[destroyed] released={:?}", e.count);
            }
            EventKind::Custom(name) => {
                info!("[{name}] key={key:?} reason={:?}", e.reason);
            }
        }
    }
}
