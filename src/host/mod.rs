//! Host capabilities consumed by the engine.
//!
//! The engine never touches a real document. Everything it needs from the
//! host is behind these seams:
//! - [`Element`] / [`Scope`] element discovery and dataset access;
//! - [`Viewport`] media-query evaluation;
//! - [`ReadScheduler`] deferral to a paint-safe read phase;
//! - [`ResizeNotifier`] resize event source.
//!
//! [`MemoryScope`], [`MemoryNode`] and [`WidthViewport`] are in-memory
//! implementations for headless hosts and tests.

mod element;
mod memory;
mod resize;
mod scheduler;
mod viewport;

pub use element::{Dataset, Element, NodeRef, Scope};
pub use memory::{MemoryNode, MemoryScope};
pub use resize::{Resize, ResizeNotifier};
pub use scheduler::{FrameScheduler, ReadScheduler, YieldScheduler};
pub use viewport::{Viewport, WidthViewport};
