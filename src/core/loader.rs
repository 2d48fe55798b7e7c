//! # Mount one behaviour against its record.
//!
//! [`ModuleLoader::load`] performs a single activation:
//!
//! ```text
//! load(spec)
//!   ├─► record has leftover plugins? → reset to []
//!   ├─► registrar = registry.register_for(key)
//!   ├─► teardown = behaviour.mount({ node, name: key, data, plugins: registrar })
//!   ├─► store.set(key, { has_loaded: true, keep_alive, module: teardown })
//!   └─► !keep_alive → registrar.register(teardown)
//! ```
//!
//! ## Rules
//! - `mount` errors propagate to the caller; nothing is written to the record.
//! - A non-persistent module's main handle is registered as a plugin too, so
//!   draining plugins is enough to tear it down.

use std::sync::Arc;

use tracing::debug;

use crate::error::ModuleError;
use crate::host::NodeRef;
use crate::modules::{BehaviourRef, ModuleContext};
use crate::plugins::PluginRegistry;
use crate::store::{RecordPatch, RecordStore};

/// Everything needed to mount one behaviour.
#[derive(Clone)]
pub struct LoadSpec {
    /// Behaviour to mount.
    pub behaviour: BehaviourRef,
    /// Element to bind to.
    pub node: Option<NodeRef>,
    /// Exempt the record from `destroy`.
    pub keep_alive: bool,
    /// Record key.
    pub key: String,
}

impl LoadSpec {
    /// Creates a non-persistent load for `key`.
    pub fn new(key: impl Into<String>, behaviour: BehaviourRef) -> Self {
        Self {
            behaviour,
            node: None,
            keep_alive: false,
            key: key.into(),
        }
    }

    /// Binds the load to `node`.
    pub fn with_node(mut self, node: NodeRef) -> Self {
        self.node = Some(node);
        self
    }

    /// Sets the keep-alive flag.
    pub fn with_keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = keep_alive;
        self
    }
}

impl std::fmt::Debug for LoadSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadSpec")
            .field("key", &self.key)
            .field("keep_alive", &self.keep_alive)
            .field("has_node", &self.node.is_some())
            .finish()
    }
}

/// Activates behaviours and records their teardown handles.
pub(crate) struct ModuleLoader {
    store: Arc<RecordStore>,
    registry: PluginRegistry,
}

impl ModuleLoader {
    pub(crate) fn new(store: Arc<RecordStore>) -> Self {
        let registry = PluginRegistry::new(&store);
        Self { store, registry }
    }

    /// Mounts `spec.behaviour` and marks the record loaded.
    pub(crate) fn load(&self, spec: LoadSpec) -> Result<(), ModuleError> {
        let LoadSpec {
            behaviour,
            node,
            keep_alive,
            key,
        } = spec;

        let existing = self.store.get(&key);
        if existing.as_ref().is_some_and(|r| !r.plugins().is_empty()) {
            self.store.set(&key, RecordPatch::new().plugins(Vec::new()));
        }

        let register = self.registry.register_for(&key);
        let ctx = ModuleContext {
            node,
            name: key.clone(),
            data: existing.map(|r| r.data).unwrap_or_default(),
            plugins: register.clone(),
        };

        let teardown = behaviour.mount(ctx)?;

        self.store.set(
            &key,
            RecordPatch::new()
                .has_loaded(true)
                .keep_alive(keep_alive)
                .module(teardown.clone()),
        );

        if !keep_alive {
            if let Some(teardown) = teardown {
                register.register(teardown);
            }
        }

        debug!(key = %key, keep_alive, "behaviour mounted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::{BehaviourFn, Teardown};
    use crate::store::HydrationRecord;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn loader() -> (ModuleLoader, Arc<RecordStore>) {
        let store = Arc::new(RecordStore::new());
        (ModuleLoader::new(store.clone()), store)
    }

    #[test]
    fn non_persistent_handle_is_also_a_plugin() {
        let (loader, store) = loader();
        store.add("nav", HydrationRecord::new("nav", "menu"));
        let handle = Teardown::noop();
        let h = handle.clone();

        loader
            .load(LoadSpec::new("nav", BehaviourFn::arc(move |_: ModuleContext| Ok(Some(h.clone())))))
            .expect("load");

        let rec = store.get("nav").expect("record");
        assert!(rec.has_loaded);
        assert_eq!(rec.keep_alive, Some(false));
        assert!(rec.module.as_ref().is_some_and(|m| m.same(&handle)));
        assert_eq!(rec.plugins().len(), 1);
        assert!(rec.plugins()[0].same(&handle));
    }

    #[test]
    fn keep_alive_handle_is_not_registered() {
        let (loader, store) = loader();
        store.add("cart", HydrationRecord::new("cart", "cart"));

        loader
            .load(
                LoadSpec::new("cart", BehaviourFn::arc(|_: ModuleContext| Ok(Some(Teardown::noop()))))
                    .with_keep_alive(true),
            )
            .expect("load");

        let rec = store.get("cart").expect("record");
        assert!(rec.is_keep_alive());
        assert!(rec.module.is_some());
        assert!(rec.plugins().is_empty());
    }

    #[test]
    fn stale_plugins_are_reset_before_mount() {
        let (loader, store) = loader();
        let stale = Arc::new(AtomicUsize::new(0));
        let s = stale.clone();
        store.add("nav", HydrationRecord::new("nav", "menu"));
        store.set(
            "nav",
            RecordPatch::new().plugins(vec![Teardown::new(move || {
                s.fetch_add(1, Ordering::SeqCst);
            })]),
        );

        loader
            .load(LoadSpec::new("nav", BehaviourFn::arc(|_: ModuleContext| Ok(None))))
            .expect("load");

        let rec = store.get("nav").expect("record");
        assert!(rec.plugins().is_empty());
        assert_eq!(stale.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn mount_receives_key_and_data() {
        let (loader, store) = loader();
        let mut rec = HydrationRecord::new("menu-0", "menu");
        rec.data.insert("label".into(), "Main".into());
        store.add("menu-0", rec);

        let seen = Arc::new(parking_lot::Mutex::new(None));
        let s = seen.clone();
        loader
            .load(LoadSpec::new(
                "menu-0",
                BehaviourFn::arc(move |ctx: ModuleContext| {
                    *s.lock() = Some((ctx.name.clone(), ctx.data.get("label").cloned()));
                    assert_eq!(ctx.plugins.key(), "menu-0");
                    Ok(None)
                }),
            ))
            .expect("load");

        assert_eq!(
            *seen.lock(),
            Some(("menu-0".to_string(), Some("Main".to_string())))
        );
    }

    #[test]
    fn failed_mount_leaves_record_unloaded() {
        let (loader, store) = loader();
        store.add("nav", HydrationRecord::new("nav", "menu"));

        let err = loader
            .load(LoadSpec::new(
                "nav",
                BehaviourFn::arc(|_: ModuleContext| Err(ModuleError::new("no anchor"))),
            ))
            .unwrap_err();

        assert_eq!(err, ModuleError::new("no anchor"));
        assert!(!store.get("nav").expect("record").has_loaded);
    }
}
