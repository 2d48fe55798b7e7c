//! # hydravisor
//!
//! **Hydravisor** is a behaviour hydration runtime. It scans an element tree
//! for elements tagged with a behaviour name, lazily resolves and mounts the
//! matching module against each one, and keeps every mount in sync with
//! viewport media queries and page transitions.
//!
//! The host supplies everything environment-specific: element discovery,
//! behaviour resolution, media-query evaluation, read-phase scheduling and
//! resize notifications. The crate owns the lifecycle.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!   <div id="nav" data-behaviour="menu">   <div data-behaviour="tabs" data-query="(min-width: 600px)">
//!                 │                                          │
//!                 ▼                                          ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │  Hydrator (engine + application handle)                           │
//! │  - RecordStore (key → HydrationRecord, merge-on-write)            │
//! │  - ModuleLoader (mount + teardown bookkeeping)                    │
//! │  - PluginRegistry (per-key teardown registrars)                   │
//! │  - InFlight (one resolution per key)                              │
//! │  - EventBus (on/off/emit, lifecycle notifications)                │
//! │  - Plugins (host-level named plugins)                             │
//! └──────┬──────────────────┬──────────────────┬───────────────┬──────┘
//!        ▼                  ▼                  ▼               ▼
//!   Resolve::resolve   Viewport::matches  ReadScheduler   ResizeNotifier
//!   (host, async)      (host)             (host)          (host → debounced scan)
//! ```
//!
//! ### Record lifecycle
//! ```text
//! hydrate ──► seeded (has_loaded = false)
//!                │
//!   scan: no query / query matches
//!                ├─► in flight ──► resolve ok ──► mount ──► loaded (has_loaded = true)
//!                │                 └─ error ──► logged, stays unloaded (retried next scan)
//!                │
//!   scan: loaded and query stops matching
//!                └─► plugins released (else module handle) ──► unloaded
//!
//! destroy ──► every non keep-alive record: plugins released, record deleted
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types / traits                       |
//! |-------------------|---------------------------------------------------------------|------------------------------------------|
//! | **Engine**        | Discovery, scan, destroy, shutdown.                           | [`Hydrator`], [`Config`]                 |
//! | **Behaviours**    | Mountable modules and their teardown.                         | [`Behaviour`], [`BehaviourFn`], [`Teardown`] |
//! | **Resolution**    | Lazy name → behaviour lookup.                                 | [`Resolve`], [`StaticResolver`]          |
//! | **Host**          | Element, viewport, scheduling and resize seams.               | [`Scope`], [`Viewport`], [`ReadScheduler`], [`ResizeNotifier`] |
//! | **Store**         | Keyed records with merge-on-write updates.                    | [`KeyedStore`], [`HydrationRecord`]      |
//! | **Events**        | Lifecycle notifications and host events.                      | [`EventBus`], [`Event`], [`EventKind`]   |
//! | **Plugins**       | Teardown registration and host-level plugins.                 | [`Registrar`], [`Plugins`]               |
//! | **Errors**        | Typed errors for discovery, resolution and mounting.          | [`HydrateError`], [`LoadError`]          |
//!
//! ## Optional features
//! - `logging`: exports [`LogWriter`], a bus handler tracing every lifecycle event.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use hydravisor::{
//!     BehaviourFn, Config, Hydrator, MemoryNode, MemoryScope, ModuleContext,
//!     StaticResolver, Teardown, WidthViewport,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let menu = BehaviourFn::arc(|ctx: ModuleContext| {
//!         println!("menu mounted on {}", ctx.name);
//!         Ok(Some(Teardown::new(|| println!("menu released"))))
//!     });
//!
//!     let hydrator = Hydrator::builder(
//!         Config::default(),
//!         Arc::new(StaticResolver::new().with("menu", menu)),
//!         Arc::new(WidthViewport::new(1280)),
//!     )
//!     .build();
//!
//!     let page = MemoryScope::new(vec![
//!         MemoryNode::new().with_id("nav").with_data("behaviour", "menu").arc(),
//!     ]);
//!
//!     hydrator.hydrate(&page).await?;
//!     hydrator.wait_idle().await;
//!     assert!(hydrator.store().get("nav").is_some_and(|r| r.has_loaded));
//!
//!     // page transition
//!     hydrator.destroy();
//!     assert!(hydrator.store().is_empty());
//!     Ok(())
//! }
//! ```
mod core;
mod error;
mod events;
mod host;
mod modules;
mod plugins;
mod store;
mod utils;

// ---- Public re-exports ----

pub use crate::core::{Config, DestroyReport, Hydrator, HydratorBuilder, LoadSpec, ScanReport};
pub use error::{HydrateError, LoadError, ModuleError, RegisterError, ResolveError};
pub use events::{Event, EventBus, EventKind, HandlerId, WILDCARD};
pub use host::{
    Dataset, Element, FrameScheduler, MemoryNode, MemoryScope, NodeRef, ReadScheduler, Resize,
    ResizeNotifier, Scope, Viewport, WidthViewport, YieldScheduler,
};
pub use modules::{
    Behaviour, BehaviourFn, BehaviourRef, ModuleContext, Resolve, StaticResolver, Teardown,
};
pub use plugins::{PluginContext, PluginOptions, PluginRef, PluginRegistry, Plugins, Registrar};
pub use store::{HydrationRecord, KeyedStore, Merge, RecordPatch, RecordStore};
pub use utils::Debouncer;

// Optional: expose a simple built-in event logger (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use events::LogWriter;
