//! # Element discovery seam.
//!
//! Dataset keys follow the DOM `dataset` convention: `data-keep-alive` is
//! exposed as `keepAlive`.

use std::collections::BTreeMap;
use std::sync::Arc;

/// Data attributes of an element, keyed by camelCase name.
pub type Dataset = BTreeMap<String, String>;

/// Shared reference to a host element.
pub type NodeRef = Arc<dyn Element>;

/// A host element a behaviour can be bound to.
pub trait Element: Send + Sync + 'static {
    /// Element id, if it has a non-empty one.
    fn id(&self) -> Option<&str>;

    /// All data attributes of the element.
    fn dataset(&self) -> Dataset;
}

/// A subtree the engine can search for behaviour-tagged elements.
pub trait Scope: Send + Sync {
    /// Returns every descendant carrying the data attribute `attribute`,
    /// in document order.
    fn query_behaviours(&self, attribute: &str) -> Vec<NodeRef>;
}
