//! Lifecycle events: types and notification bus.
//!
//! ## Contents
//! - [`EventKind`], [`Event`] event classification and payload metadata
//! - [`EventBus`] topic-keyed handler registry with `on`/`off`/`emit`
//!
//! ## Quick reference
//! - **Publishers**: `Hydrator` (hydrate/scan/load/destroy), host code via `emit`.
//! - **Consumers**: host handlers registered with `on`, plugins installed through
//!   `use_plugin`, the optional `LogWriter`.

mod bus;
mod event;
#[cfg(feature = "logging")]
mod log;

pub use bus::{EventBus, HandlerId, WILDCARD};
pub use event::{Event, EventKind};
#[cfg(feature = "logging")]
pub use log::LogWriter;
