//! # In-memory element tree.
//!
//! A flat, ordered list of elements standing in for a document subtree.

use std::sync::Arc;

use crate::host::{Dataset, Element, NodeRef, Scope};

/// Element with a fixed id and dataset.
#[derive(Debug, Clone, Default)]
pub struct MemoryNode {
    id: Option<String>,
    dataset: Dataset,
}

impl MemoryNode {
    /// Creates a node without id or data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the element id.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds one data attribute (camelCase key).
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.dataset.insert(key.into(), value.into());
        self
    }

    /// Wraps the node into a shared [`NodeRef`].
    pub fn arc(self) -> NodeRef {
        Arc::new(self)
    }
}

impl Element for MemoryNode {
    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn dataset(&self) -> Dataset {
        self.dataset.clone()
    }
}

/// Ordered list of elements acting as a document subtree.
#[derive(Clone, Default)]
pub struct MemoryScope {
    nodes: Vec<NodeRef>,
}

impl MemoryScope {
    /// Creates a scope over `nodes` (document order).
    pub fn new(nodes: Vec<NodeRef>) -> Self {
        Self { nodes }
    }

    /// Appends a node.
    pub fn push(&mut self, node: NodeRef) {
        self.nodes.push(node);
    }
}

impl Scope for MemoryScope {
    fn query_behaviours(&self, attribute: &str) -> Vec<NodeRef> {
        self.nodes
            .iter()
            .filter(|n| n.dataset().contains_key(attribute))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_skips_untagged_nodes() {
        let scope = MemoryScope::new(vec![
            MemoryNode::new().with_id("a").with_data("behaviour", "menu").arc(),
            MemoryNode::new().with_id("b").arc(),
            MemoryNode::new().with_data("behaviour", "tabs").arc(),
        ]);
        let found = scope.query_behaviours("behaviour");
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id(), Some("a"));
        assert_eq!(found[1].id(), None);
    }

    #[test]
    fn empty_id_counts_as_missing() {
        let node = MemoryNode::new().with_id("");
        assert_eq!(node.id(), None);
    }
}
