//! # Hydration record and its partial update.
//!
//! One [`HydrationRecord`] exists per discovered element. Fields that only
//! matter for some elements (`query`, `keep_alive`, `plugins`) are options.
//! Updates go through [`RecordPatch`], merged field by field.

use std::fmt;

use crate::host::{Dataset, NodeRef};
use crate::modules::Teardown;
use crate::store::Merge;

/// Cached state for one behaviour-bound element.
#[derive(Clone, Default)]
pub struct HydrationRecord {
    /// Store key; element id or `"{behaviour}-{ordinal}"`.
    pub key: String,
    /// Behaviour name used to resolve the module.
    pub name: String,
    /// Bound element. The record holds a reference, not the element's lifetime.
    pub node: Option<NodeRef>,
    /// Remaining data attributes, handed to the module.
    pub data: Dataset,
    /// True while the module is mounted.
    pub has_loaded: bool,
    /// `Some(true)` exempts the record from [`destroy`](crate::Hydrator::destroy).
    pub keep_alive: Option<bool>,
    /// Media query gating activation; `None` means always active.
    pub query: Option<String>,
    /// Teardown handle returned by the module's `mount`.
    pub module: Option<Teardown>,
    /// Teardown callbacks registered while the module was mounted.
    pub plugins: Option<Vec<Teardown>>,
}

impl HydrationRecord {
    /// Creates an unloaded record for a discovered element.
    pub fn new(key: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// True when `keep_alive` is explicitly set.
    #[inline]
    pub fn is_keep_alive(&self) -> bool {
        self.keep_alive == Some(true)
    }

    /// Registered plugins, empty when none were registered.
    #[inline]
    pub fn plugins(&self) -> &[Teardown] {
        self.plugins.as_deref().unwrap_or_default()
    }
}

impl fmt::Debug for HydrationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HydrationRecord")
            .field("key", &self.key)
            .field("name", &self.name)
            .field("has_node", &self.node.is_some())
            .field("data", &self.data)
            .field("has_loaded", &self.has_loaded)
            .field("keep_alive", &self.keep_alive)
            .field("query", &self.query)
            .field("module", &self.module.is_some())
            .field("plugins", &self.plugins.as_ref().map(Vec::len))
            .finish()
    }
}

/// Partial update for a [`HydrationRecord`].
///
/// Only fields set on the patch are written; everything else is preserved.
#[derive(Clone, Default)]
pub struct RecordPatch {
    name: Option<String>,
    node: Option<NodeRef>,
    data: Option<Dataset>,
    has_loaded: Option<bool>,
    keep_alive: Option<bool>,
    query: Option<Option<String>>,
    module: Option<Option<Teardown>>,
    plugins: Option<Vec<Teardown>>,
}

impl RecordPatch {
    /// Empty patch; merging it changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the behaviour name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the bound element.
    pub fn node(mut self, node: NodeRef) -> Self {
        self.node = Some(node);
        self
    }

    /// Replaces the data attributes.
    pub fn data(mut self, data: Dataset) -> Self {
        self.data = Some(data);
        self
    }

    /// Sets the loaded flag.
    pub fn has_loaded(mut self, loaded: bool) -> Self {
        self.has_loaded = Some(loaded);
        self
    }

    /// Sets the keep-alive flag.
    pub fn keep_alive(mut self, keep_alive: bool) -> Self {
        self.keep_alive = Some(keep_alive);
        self
    }

    /// Sets or clears the activation query.
    pub fn query(mut self, query: Option<String>) -> Self {
        self.query = Some(query);
        self
    }

    /// Sets or clears the module teardown handle.
    pub fn module(mut self, module: Option<Teardown>) -> Self {
        self.module = Some(module);
        self
    }

    /// Replaces the plugin list.
    pub fn plugins(mut self, plugins: Vec<Teardown>) -> Self {
        self.plugins = Some(plugins);
        self
    }
}

impl Merge for HydrationRecord {
    type Patch = RecordPatch;

    fn merge(&mut self, patch: RecordPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(node) = patch.node {
            self.node = Some(node);
        }
        if let Some(data) = patch.data {
            self.data = data;
        }
        if let Some(loaded) = patch.has_loaded {
            self.has_loaded = loaded;
        }
        if let Some(keep_alive) = patch.keep_alive {
            self.keep_alive = Some(keep_alive);
        }
        if let Some(query) = patch.query {
            self.query = query;
        }
        if let Some(module) = patch.module {
            self.module = module;
        }
        if let Some(plugins) = patch.plugins {
            self.plugins = Some(plugins);
        }
    }

    fn from_patch(key: &str, patch: RecordPatch) -> Self {
        let mut record = HydrationRecord {
            key: key.to_string(),
            ..HydrationRecord::default()
        };
        record.merge(patch);
        record
    }
}
