//! # Behaviour modules.
//!
//! - [`Behaviour`] trait for a mountable module, [`BehaviourFn`] closure-backed impl;
//! - [`ModuleContext`] what a behaviour receives when it is mounted;
//! - [`Teardown`] release capability returned by a mounted behaviour;
//! - [`Resolve`] host resolver from behaviour name to module, [`StaticResolver`] table impl.

mod behaviour;
mod resolver;
mod teardown;

pub use behaviour::{Behaviour, BehaviourFn, BehaviourRef, ModuleContext};
pub use resolver::{Resolve, StaticResolver};
pub use teardown::Teardown;
