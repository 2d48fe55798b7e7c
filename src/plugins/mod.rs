//! # Plugins.
//!
//! Two unrelated kinds of "plugin" live here:
//! - [`PluginRegistry`] / [`Registrar`]: teardown callbacks a mounted behaviour
//!   attaches to its own record, drained on deactivation and on `destroy`;
//! - [`Plugins`] / [`PluginContext`]: named host-level plugins installed through
//!   [`Hydrator::use_plugin`](crate::Hydrator::use_plugin). Pure bookkeeping,
//!   no coupling to record lifecycle.

mod facade;
mod registry;

pub use facade::{PluginContext, PluginOptions, PluginRef, Plugins};
pub use registry::{PluginRegistry, Registrar};
