//! # Behaviour resolution.
//!
//! The engine asks a [`Resolve`] implementation for a behaviour by name each
//! time a record needs loading. Resolution is asynchronous so hosts can fetch
//! code lazily; a failure leaves the record unloaded until the next scan.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::error::ResolveError;
use crate::modules::BehaviourRef;

/// Resolves a behaviour name to a mountable module.
#[async_trait]
pub trait Resolve: Send + Sync + 'static {
    /// Returns the behaviour registered as `name`.
    async fn resolve(&self, name: &str) -> Result<BehaviourRef, ResolveError>;
}

/// Name-to-behaviour table, optionally delaying every resolution.
#[derive(Default)]
pub struct StaticResolver {
    table: RwLock<HashMap<String, BehaviourRef>>,
    latency: Option<Duration>,
}

impl StaticResolver {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `behaviour` under `name` (builder style).
    pub fn with(self, name: impl Into<String>, behaviour: BehaviourRef) -> Self {
        self.insert(name, behaviour);
        self
    }

    /// Delays every resolution by `latency`, emulating a network fetch.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Adds or replaces `behaviour` under `name`.
    pub fn insert(&self, name: impl Into<String>, behaviour: BehaviourRef) {
        self.table.write().insert(name.into(), behaviour);
    }

    /// Removes the behaviour registered as `name`.
    pub fn remove(&self, name: &str) -> Option<BehaviourRef> {
        self.table.write().remove(name)
    }
}

#[async_trait]
impl Resolve for StaticResolver {
    async fn resolve(&self, name: &str) -> Result<BehaviourRef, ResolveError> {
        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
        self.table
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound {
                name: name.to_string(),
            })
    }
}
