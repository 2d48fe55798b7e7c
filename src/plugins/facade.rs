//! # Host-level plugin bookkeeping.
//!
//! [`Hydrator::use_plugin`](crate::Hydrator::use_plugin) runs a plugin factory
//! with the engine's [`EventBus`] plus caller options and stores whatever it
//! returns under a key. Installing the same key twice replaces the first one.
//!
//! ## Example
//! ```rust
//! use hydravisor::{EventBus, PluginContext, PluginOptions, Plugins};
//!
//! struct Routes { base: String }
//!
//! let plugins = Plugins::default();
//! let mut opts = PluginOptions::new();
//! opts.insert("base".into(), "/app".into());
//!
//! plugins.install(EventBus::new(), "routes", |ctx: PluginContext| Routes {
//!     base: ctx.options["base"].clone(),
//! }, opts);
//!
//! assert_eq!(plugins.get_as::<Routes>("routes").unwrap().base, "/app");
//! ```

use std::any::Any;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::events::EventBus;

/// Options handed to a plugin factory.
pub type PluginOptions = BTreeMap<String, String>;

/// Type-erased installed plugin.
pub type PluginRef = Arc<dyn Any + Send + Sync>;

/// What a plugin factory receives.
#[derive(Clone, Debug)]
pub struct PluginContext {
    /// Engine notification bus.
    pub bus: EventBus,
    /// Caller-supplied options.
    pub options: PluginOptions,
}

/// Live map of installed plugins. Clones share the same map.
#[derive(Clone, Default)]
pub struct Plugins {
    inner: Arc<RwLock<HashMap<String, PluginRef>>>,
}

impl Plugins {
    /// Runs `factory` and stores its result under `key`, replacing any previous entry.
    pub fn install<F, T>(&self, bus: EventBus, key: impl Into<String>, factory: F, options: PluginOptions)
    where
        F: FnOnce(PluginContext) -> T,
        T: Any + Send + Sync,
    {
        let plugin: PluginRef = Arc::new(factory(PluginContext { bus, options }));
        self.inner.write().insert(key.into(), plugin);
    }

    /// Returns the plugin stored under `key`.
    pub fn get(&self, key: &str) -> Option<PluginRef> {
        self.inner.read().get(key).cloned()
    }

    /// Returns the plugin under `key` if it has type `T`.
    pub fn get_as<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        self.get(key)?.downcast::<T>().ok()
    }

    /// True if a plugin is stored under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.inner.read().contains_key(key)
    }

    /// Sorted list of installed keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.inner.read().keys().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of installed plugins.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// True if nothing is installed.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }
}

impl std::fmt::Debug for Plugins {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Plugins").field("keys", &self.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{Event, EventKind};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn later_install_overwrites_key() {
        let plugins = Plugins::default();
        plugins.install(EventBus::new(), "counter", |_| 1u32, PluginOptions::new());
        plugins.install(EventBus::new(), "counter", |_| 2u32, PluginOptions::new());

        assert_eq!(plugins.len(), 1);
        assert_eq!(*plugins.get_as::<u32>("counter").unwrap(), 2);
        assert!(plugins.get_as::<String>("counter").is_none());
    }

    #[test]
    fn factory_receives_shared_bus() {
        let bus = EventBus::new();
        let seen = Arc::new(AtomicUsize::new(0));
        let plugins = Plugins::default();
        let s = seen.clone();
        plugins.install(
            bus.clone(),
            "audit",
            move |ctx: PluginContext| {
                ctx.bus.on("module-loaded", move |_| {
                    s.fetch_add(1, Ordering::SeqCst);
                })
            },
            PluginOptions::new(),
        );

        bus.emit(Event::new(EventKind::ModuleLoaded).with_key("nav"));
        assert_eq!(seen.load(Ordering::SeqCst), 1);
        assert_eq!(plugins.keys(), vec!["audit".to_string()]);
    }
}
