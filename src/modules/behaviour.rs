//! # Behaviour abstraction and closure-backed implementation.
//!
//! A [`Behaviour`] is mounted against one element. It receives a
//! [`ModuleContext`] and returns an optional [`Teardown`] that undoes the mount.
//! Extra teardown callbacks can be attached while mounted through
//! [`ModuleContext::plugins`].
//!
//! ## Example
//! ```rust
//! use hydravisor::{BehaviourFn, BehaviourRef, ModuleContext, Teardown};
//!
//! let menu: BehaviourRef = BehaviourFn::arc(|ctx: ModuleContext| {
//!     ctx.plugins.register(Teardown::new(|| println!("unbind listeners")));
//!     Ok(Some(Teardown::new(|| println!("menu closed"))))
//! });
//! # let _ = menu;
//! ```

use std::fmt;
use std::sync::Arc;

use crate::error::ModuleError;
use crate::host::{Dataset, NodeRef};
use crate::modules::Teardown;
use crate::plugins::Registrar;

/// What a behaviour receives when it is mounted.
#[derive(Clone)]
pub struct ModuleContext {
    /// Element the behaviour is bound to.
    pub node: Option<NodeRef>,
    /// Record key (element id or synthesized key).
    pub name: String,
    /// Remaining data attributes of the element.
    pub data: Dataset,
    /// Registers extra teardown callbacks for this record.
    pub plugins: Registrar,
}

impl fmt::Debug for ModuleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleContext")
            .field("name", &self.name)
            .field("has_node", &self.node.is_some())
            .field("data", &self.data)
            .finish()
    }
}

/// # Mountable behaviour module.
///
/// `mount` is synchronous; anything asynchronous the behaviour starts must be
/// stopped by the returned [`Teardown`] or a registered plugin.
pub trait Behaviour: Send + Sync + 'static {
    /// Mounts the behaviour, returning its teardown handle if it has one.
    fn mount(&self, ctx: ModuleContext) -> Result<Option<Teardown>, ModuleError>;
}

/// Shared reference to a behaviour.
pub type BehaviourRef = Arc<dyn Behaviour>;

/// Closure-backed behaviour.
pub struct BehaviourFn<F> {
    f: F,
}

impl<F> BehaviourFn<F>
where
    F: Fn(ModuleContext) -> Result<Option<Teardown>, ModuleError> + Send + Sync + 'static,
{
    /// Wraps a mount closure.
    pub fn new(f: F) -> Self {
        Self { f }
    }

    /// Wraps a mount closure and returns it as a [`BehaviourRef`].
    pub fn arc(f: F) -> BehaviourRef {
        Arc::new(Self::new(f))
    }
}

impl<F> Behaviour for BehaviourFn<F>
where
    F: Fn(ModuleContext) -> Result<Option<Teardown>, ModuleError> + Send + Sync + 'static,
{
    fn mount(&self, ctx: ModuleContext) -> Result<Option<Teardown>, ModuleError> {
        (self.f)(ctx)
    }
}
