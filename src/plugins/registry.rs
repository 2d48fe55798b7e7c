//! # Teardown plugin registration.
//!
//! [`PluginRegistry::register_for`] binds a [`Registrar`] to one record key.
//! Each [`Registrar::register`] appends a [`Teardown`] to that record's
//! `plugins` list, creating the list (or the record) on first use.
//!
//! ## Rules
//! - Registration never fails loudly: by the time a behaviour registers, it is
//!   already mounted and its main handle is captured elsewhere. Failures are
//!   logged and the plugin is dropped.
//! - The registry holds the store weakly; a registrar kept alive by a behaviour
//!   does not keep the engine alive.

use std::sync::{Arc, Weak};

use tracing::warn;

use crate::error::RegisterError;
use crate::modules::Teardown;
use crate::store::RecordStore;

/// Hands out per-key registrars over a record store.
#[derive(Clone)]
pub struct PluginRegistry {
    store: Weak<RecordStore>,
}

impl PluginRegistry {
    /// Creates a registry over `store`.
    pub fn new(store: &Arc<RecordStore>) -> Self {
        Self {
            store: Arc::downgrade(store),
        }
    }

    /// Returns a registrar bound to `key`.
    pub fn register_for(&self, key: &str) -> Registrar {
        Registrar {
            key: Arc::from(key),
            store: self.store.clone(),
        }
    }
}

/// Appends teardown plugins to one record.
#[derive(Clone)]
pub struct Registrar {
    key: Arc<str>,
    store: Weak<RecordStore>,
}

impl Registrar {
    /// Record key this registrar writes to.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Appends `plugin`; failures are logged and swallowed.
    pub fn register(&self, plugin: Teardown) {
        if let Err(e) = self.try_register(plugin) {
            warn!(key = %self.key, label = e.as_label(), "failed to register plugin: {e}");
        }
    }

    /// Appends `plugin`, reporting why it could not be stored.
    pub fn try_register(&self, plugin: Teardown) -> Result<(), RegisterError> {
        let store = self.store.upgrade().ok_or_else(|| RegisterError::StoreClosed {
            key: self.key.to_string(),
        })?;

        store.upsert(&self.key, |rec| {
            rec.plugins.get_or_insert_with(Vec::new).push(plugin);
        });
        Ok(())
    }
}

impl std::fmt::Debug for Registrar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrar").field("key", &self.key).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::HydrationRecord;

    #[test]
    fn appends_in_registration_order() {
        let store = Arc::new(RecordStore::new());
        store.add("nav", HydrationRecord::new("nav", "menu"));
        let registry = PluginRegistry::new(&store);
        let first = Teardown::noop();
        let second = Teardown::noop();

        let reg = registry.register_for("nav");
        reg.register(first.clone());
        reg.register(second.clone());

        let rec = store.get("nav").expect("record");
        assert_eq!(rec.plugins().len(), 2);
        assert!(rec.plugins()[0].same(&first));
        assert!(rec.plugins()[1].same(&second));
        assert_eq!(rec.name, "menu");
    }

    #[test]
    fn missing_record_starts_a_fresh_list() {
        let store = Arc::new(RecordStore::new());
        let registry = PluginRegistry::new(&store);
        registry.register_for("ghost").register(Teardown::noop());

        let rec = store.get("ghost").expect("record");
        assert_eq!(rec.plugins().len(), 1);
        assert!(!rec.has_loaded);
    }

    #[test]
    fn closed_store_is_reported_not_raised() {
        let store = Arc::new(RecordStore::new());
        let reg = PluginRegistry::new(&store).register_for("nav");
        drop(store);

        assert_eq!(
            reg.try_register(Teardown::noop()),
            Err(RegisterError::StoreClosed { key: "nav".into() })
        );
        reg.register(Teardown::noop());
    }
}
