//! Engine core: discovery, activation and teardown.
//!
//! The only public API from this module is [`Hydrator`] (plus its builder,
//! configuration and reports).
//!
//! Internal modules:
//! - [`hydrator`]: hydrate/scan/destroy orchestration;
//! - [`loader`]: mounts one behaviour and records its teardown;
//! - [`inflight`]: per-key guard against duplicate resolutions;
//! - [`listener`]: debounced resize listener driving `scan`;
//! - [`builder`]: engine construction.

mod builder;
mod config;
mod hydrator;
mod inflight;
mod listener;
mod loader;

pub use builder::HydratorBuilder;
pub use config::Config;
pub use hydrator::{DestroyReport, Hydrator, ScanReport};
pub use loader::LoadSpec;
