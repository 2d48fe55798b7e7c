//! # Hydrator: discovers elements, keeps their behaviours in sync, tears them down.
//!
//! The [`Hydrator`] owns the record store and every host capability. It is the
//! application handle: `hydrate`, `scan`, `destroy`, the notification bus
//! (`on`/`off`/`emit`), `load_modules`, `use_plugin` and `plugins`.
//!
//! ## Architecture
//! ```text
//! hydrate(scope)
//!   ├─► scheduler.read_phase().await
//!   ├─► scope.query_behaviours(attr) ──► filter known keys (keep-alive excepted)
//!   │                                 ──► reject multi-behaviour elements
//!   ├─► store.add(key, record{ has_loaded: false })   (one per element)
//!   ├─► scan()
//!   └─► Listener::spawn(resize.subscribe())  ──(debounced)──► scan()
//!
//! scan()                                  (one snapshot of the store)
//!   for each record:
//!     ├─ loaded, query no longer matches ──► release plugins (else module)
//!     │                                      set { has_loaded: false }
//!     └─ unloaded, no query or matching  ──► inflight.begin(key)?
//!                                            spawn: resolver.resolve(name).await
//!                                                   ModuleLoader::load(..)
//!                                                   inflight.finish(key)
//!
//! destroy()
//!   ├─► stop resize listener
//!   ├─► every record without keep_alive: release all plugins (store order)
//!   └─► delete those records
//! ```
//!
//! ## Rules
//! - At most one resolution per key is in flight; a key already loaded or in
//!   flight is skipped by `scan`.
//! - A resolution that completes after its record was deleted is discarded.
//! - A resolution is never cancelled: if the query flips back before it
//!   completes, the module is still mounted and unloaded by the next scan.
//! - Resolution and mount failures are logged and published as `load-failed`;
//!   the record stays unloaded and is retried on the next scan.
//! - No lock is held while behaviour or teardown code runs.
//!
//! `scan` and `hydrate` spawn tokio tasks and must run inside a runtime.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use futures::FutureExt;
use parking_lot::Mutex;
use tracing::{debug, error, warn};

use crate::core::builder::HydratorBuilder;
use crate::core::inflight::InFlight;
use crate::core::listener::Listener;
use crate::core::loader::{LoadSpec, ModuleLoader};
use crate::core::Config;
use crate::error::{HydrateError, LoadError};
use crate::events::{Event, EventBus, EventKind, HandlerId};
use crate::host::{
    Dataset, NodeRef, ReadScheduler, ResizeNotifier, Scope, Viewport,
};
use crate::modules::{Resolve, Teardown};
use crate::plugins::{PluginContext, PluginOptions, Plugins};
use crate::store::{HydrationRecord, RecordPatch, RecordStore};
use crate::utils::panic_message;

/// Outcome of one [`Hydrator::scan`] pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Resolutions started by this pass.
    pub dispatched: usize,
    /// Records torn down because their query stopped matching.
    pub unloaded: usize,
}

/// Outcome of [`Hydrator::destroy`] or [`Hydrator::shutdown`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DestroyReport {
    /// Teardown callbacks invoked.
    pub released: usize,
    /// Records removed from the store.
    pub removed: usize,
}

/// Element found during discovery, validated and ready to seed.
struct Candidate {
    key: String,
    name: String,
    node: NodeRef,
    data: Dataset,
    query: Option<String>,
    keep_alive: bool,
    has_id: bool,
}

/// Behaviour hydration engine and application handle.
pub struct Hydrator {
    cfg: Config,
    store: Arc<RecordStore>,
    loader: ModuleLoader,
    resolver: Arc<dyn Resolve>,
    viewport: Arc<dyn Viewport>,
    scheduler: Arc<dyn ReadScheduler>,
    resize: ResizeNotifier,
    bus: EventBus,
    plugins: Plugins,
    inflight: InFlight,
    listener: Mutex<Option<Listener>>,
}

impl Hydrator {
    /// Starts building an engine around the two mandatory capabilities.
    pub fn builder(
        cfg: Config,
        resolver: Arc<dyn Resolve>,
        viewport: Arc<dyn Viewport>,
    ) -> HydratorBuilder {
        HydratorBuilder::new(cfg, resolver, viewport)
    }

    pub(crate) fn new_internal(
        cfg: Config,
        resolver: Arc<dyn Resolve>,
        viewport: Arc<dyn Viewport>,
        scheduler: Arc<dyn ReadScheduler>,
        resize: ResizeNotifier,
        bus: EventBus,
    ) -> Self {
        let store = Arc::new(RecordStore::new());
        Self {
            cfg,
            loader: ModuleLoader::new(Arc::clone(&store)),
            store,
            resolver,
            viewport,
            scheduler,
            resize,
            bus,
            plugins: Plugins::default(),
            inflight: InFlight::new(),
            listener: Mutex::new(None),
        }
    }

    // ---------------------------
    // Lifecycle
    // ---------------------------

    /// Discovers behaviour elements under `scope`, seeds their records, runs a
    /// first [`scan`](Self::scan) and (re)installs the resize listener.
    ///
    /// Returns the keys seeded by this pass. Elements already represented in
    /// the store are skipped unless they are keep-alive.
    ///
    /// # Errors
    /// [`HydrateError`] if any surviving element names several
    /// behaviours. Nothing is seeded and no scan runs in that case.
    pub async fn hydrate(self: &Arc<Self>, scope: &dyn Scope) -> Result<Vec<String>, HydrateError> {
        self.scheduler.read_phase().await;

        let candidates = self.discover(scope)?;
        let seeded = self.seed(candidates);

        self.bus
            .emit(Event::new(EventKind::Hydrated).with_count(seeded.len()));

        self.scan();
        self.install_listener();
        Ok(seeded)
    }

    /// Reconciles every record's loaded state with the current viewport.
    ///
    /// Decisions come from one snapshot of the store; loads resolved later are
    /// only visible to the next pass.
    pub fn scan(self: &Arc<Self>) -> ScanReport {
        let mut report = ScanReport::default();

        for (key, record) in self.store.snapshot() {
            if record.has_loaded {
                if record
                    .query
                    .as_deref()
                    .is_some_and(|q| !self.viewport.matches(q))
                {
                    self.deactivate(&key);
                    report.unloaded += 1;
                }
                continue;
            }

            // plugin-only records left behind by a late registration have no behaviour
            if record.name.is_empty() || !self.is_active(record.query.as_deref()) {
                continue;
            }
            if self.store.get(&key).map_or(true, |live| live.has_loaded) {
                continue;
            }
            if !self.inflight.begin(&key) {
                continue;
            }

            self.dispatch(key, record.name);
            report.dispatched += 1;
        }

        report
    }

    /// Tears down every non-keep-alive record and removes it from the store.
    ///
    /// Stops the resize listener first. Plugins of all selected records are
    /// released in store order, then the records are deleted. Keep-alive
    /// records are not touched. Calling it twice is harmless.
    pub fn destroy(&self) -> DestroyReport {
        self.stop_listener();

        let kill: Vec<(String, HydrationRecord)> = self
            .store
            .snapshot()
            .into_iter()
            .filter(|(_, rec)| !rec.is_keep_alive())
            .collect();

        let released: usize = kill
            .iter()
            .map(|(key, rec)| release_all(key, rec.plugins()))
            .sum();

        for (key, rec) in &kill {
            self.store.delete(key);
            self.publish_record(EventKind::RecordDestroyed, key, &rec.name);
        }

        let report = DestroyReport {
            released,
            removed: kill.len(),
        };
        self.bus
            .emit(Event::new(EventKind::Destroyed).with_count(report.released));
        debug!(released = report.released, removed = report.removed, "destroy sweep done");
        report
    }

    /// Full teardown: [`destroy`](Self::destroy), then release and remove the
    /// keep-alive records as well. The store is empty afterwards.
    pub fn shutdown(&self) -> DestroyReport {
        let mut report = self.destroy();

        for (key, rec) in self.store.clear() {
            if rec.has_loaded {
                report.released += release_record(&key, &rec);
            }
            report.removed += 1;
            self.publish_record(EventKind::RecordDestroyed, &key, &rec.name);
        }
        report
    }

    /// Mounts each entry synchronously, stopping at the first failure.
    ///
    /// Returns how many were mounted.
    pub fn load_modules(&self, list: impl IntoIterator<Item = LoadSpec>) -> Result<usize, LoadError> {
        let mut loaded = 0;
        for spec in list {
            let key = spec.key.clone();
            self.loader.load(spec)?;
            let name = self.store.get(&key).map(|r| r.name).unwrap_or_default();
            self.publish_record(EventKind::ModuleLoaded, &key, &name);
            loaded += 1;
        }
        Ok(loaded)
    }

    /// Completes once no resolution is in flight.
    pub async fn wait_idle(&self) {
        self.inflight.idle().await;
    }

    /// True while a resolution for `key` is in flight.
    pub fn is_loading(&self, key: &str) -> bool {
        self.inflight.contains(key)
    }

    // ---------------------------
    // Plugins and notification bus
    // ---------------------------

    /// Runs `factory` with the bus and `options`, storing the result under `key`.
    pub fn use_plugin<F, T>(&self, key: impl Into<String>, factory: F, options: PluginOptions)
    where
        F: FnOnce(PluginContext) -> T,
        T: std::any::Any + Send + Sync,
    {
        self.plugins.install(self.bus.clone(), key, factory, options);
    }

    /// Live view of installed plugins.
    pub fn plugins(&self) -> &Plugins {
        &self.plugins
    }

    /// Registers a bus handler. See [`EventBus::on`].
    pub fn on<F>(&self, topic: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(&Event) + Send + Sync + 'static,
    {
        self.bus.on(topic, handler)
    }

    /// Removes a bus handler. See [`EventBus::off`].
    pub fn off(&self, topic: &str, id: HandlerId) -> bool {
        self.bus.off(topic, id)
    }

    /// Emits an event on the bus. See [`EventBus::emit`].
    pub fn emit(&self, event: Event) {
        self.bus.emit(event)
    }

    /// The notification bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    // ---------------------------
    // Accessors
    // ---------------------------

    /// The record store.
    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Engine configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Resize source the engine listens to; hosts call `notify` on it.
    pub fn resize_notifier(&self) -> &ResizeNotifier {
        &self.resize
    }

    /// True while a resize listener is installed.
    pub fn is_listening(&self) -> bool {
        self.listener.lock().is_some()
    }

    // ---------------------------
    // Helpers
    // ---------------------------

    /// Reads and validates candidates. Fails before anything is seeded.
    fn discover(&self, scope: &dyn Scope) -> Result<Vec<Candidate>, HydrateError> {
        let cfg = &self.cfg;
        let mut out = Vec::new();

        for (index, node) in scope.query_behaviours(&cfg.behaviour_attr).into_iter().enumerate() {
            let mut dataset = node.dataset();
            let raw = dataset.remove(&cfg.behaviour_attr).unwrap_or_default();
            let keep_alive = dataset
                .remove(&cfg.keep_alive_attr)
                .is_some_and(|v| v != "false");
            let query = dataset
                .remove(&cfg.query_attr)
                .filter(|q| !q.trim().is_empty());
            dataset.retain(|k, _| !cfg.is_reserved(k));

            let id = node.id().map(str::to_string);
            let key = match &id {
                Some(id) => id.clone(),
                None => format!("{}-{index}", raw.trim()),
            };

            if !keep_alive && self.store.has(&key) {
                continue;
            }

            let mut names = raw.split_whitespace();
            let name = match (names.next(), names.next()) {
                (Some(name), None) => name.to_string(),
                (None, _) => {
                    warn!(key = %key, "element has an empty behaviour attribute, skipped");
                    continue;
                }
                (Some(_), Some(_)) => {
                    return Err(HydrateError::MultipleBehaviours {
                        behaviour: raw.trim().to_string(),
                    })
                }
            };

            out.push(Candidate {
                key,
                name,
                node,
                data: dataset,
                query,
                keep_alive,
                has_id: id.is_some(),
            });
        }

        Ok(out)
    }

    /// Writes candidates into the store, returning their keys.
    fn seed(&self, candidates: Vec<Candidate>) -> Vec<String> {
        let mut seeded = Vec::with_capacity(candidates.len());

        for c in candidates {
            if !c.has_id && self.cfg.warn_missing_id {
                warn!(
                    behaviour = %c.name,
                    key = %c.key,
                    "element is missing an id, synthesized key used instead"
                );
            }

            if self.store.has(&c.key) {
                // keep-alive re-registration: refresh the binding, keep the loaded state
                self.store.set(
                    &c.key,
                    RecordPatch::new()
                        .name(c.name.clone())
                        .node(c.node)
                        .data(c.data)
                        .query(c.query)
                        .keep_alive(true),
                );
            } else {
                let mut record = HydrationRecord::new(c.key.clone(), c.name.clone());
                record.node = Some(c.node);
                record.data = c.data;
                record.query = c.query;
                if c.keep_alive {
                    record.keep_alive = Some(true);
                }
                self.store.add(c.key.clone(), record);
            }

            self.publish_record(EventKind::RecordSeeded, &c.key, &c.name);
            seeded.push(c.key);
        }

        seeded
    }

    /// A record with no query is always active.
    fn is_active(&self, query: Option<&str>) -> bool {
        query.map_or(true, |q| self.viewport.matches(q))
    }

    /// Marks a loaded record unloaded, then releases what it held.
    ///
    /// The plugin list is taken in the same write as the state change, so a
    /// plugin registered while the teardowns run lands in a fresh list.
    fn deactivate(&self, key: &str) {
        let Some((name, plugins, module)) = self.store.update(key, |rec| {
            rec.has_loaded = false;
            let plugins = rec.plugins.replace(Vec::new()).unwrap_or_default();
            (rec.name.clone(), plugins, rec.module.clone())
        }) else {
            return;
        };

        let released = if plugins.is_empty() {
            release_all(key, module.iter())
        } else {
            release_all(key, &plugins)
        };

        debug!(key, released, "behaviour unloaded, query no longer matches");
        self.bus.emit(
            Event::new(EventKind::ModuleUnloaded)
                .with_key(key)
                .with_behaviour(name.as_str())
                .with_count(released),
        );
    }

    /// Spawns one resolution; the in-flight mark for `key` is already held.
    fn dispatch(self: &Arc<Self>, key: String, name: String) {
        let me = Arc::clone(self);

        tokio::spawn(async move {
            let result = match AssertUnwindSafe(me.resolve_and_load(&key, &name))
                .catch_unwind()
                .await
            {
                Ok(result) => result,
                Err(panic) => Err(LoadError::Panicked {
                    key: key.clone(),
                    info: panic_message(panic.as_ref()),
                }),
            };

            match result {
                Ok(true) => me.publish_record(EventKind::ModuleLoaded, &key, &name),
                Ok(false) => {}
                Err(e) => {
                    error!(key = %key, behaviour = %name, label = e.as_label(), "error loading {name}: {e}");
                    me.bus.emit(
                        Event::new(EventKind::LoadFailed)
                            .with_key(key.as_str())
                            .with_behaviour(name.as_str())
                            .with_reason(e.to_string()),
                    );
                }
            }

            me.inflight.finish(&key);
        });
    }

    /// Resolves `name` and mounts it if the record still wants it.
    ///
    /// `Ok(false)` means the record vanished or was loaded meanwhile.
    async fn resolve_and_load(&self, key: &str, name: &str) -> Result<bool, LoadError> {
        let behaviour = self.resolver.resolve(name).await?;

        let Some(record) = self.store.get(key) else {
            debug!(key, "record removed while resolving, load discarded");
            return Ok(false);
        };
        if record.has_loaded {
            return Ok(false);
        }

        self.loader.load(LoadSpec {
            behaviour,
            node: record.node.clone(),
            keep_alive: record.is_keep_alive(),
            key: key.to_string(),
        })?;
        Ok(true)
    }

    /// Replaces any running resize listener with a fresh one.
    fn install_listener(self: &Arc<Self>) {
        let listener = Listener::spawn(
            Arc::downgrade(self),
            self.resize.subscribe(),
            self.cfg.debounce(),
        );
        if let Some(prev) = self.listener.lock().replace(listener) {
            prev.stop();
        }
    }

    fn stop_listener(&self) {
        if let Some(listener) = self.listener.lock().take() {
            listener.stop();
        }
    }

    fn publish_record(&self, kind: EventKind, key: &str, name: &str) {
        self.bus
            .emit(Event::new(kind).with_key(key).with_behaviour(name));
    }
}

impl Drop for Hydrator {
    fn drop(&mut self) {
        if let Some(listener) = self.listener.get_mut().take() {
            listener.stop();
        }
    }
}

/// Releases a record's plugins, or its module handle when it has none.
///
/// Returns the number of callbacks invoked.
fn release_record(key: &str, rec: &HydrationRecord) -> usize {
    if rec.plugins().is_empty() {
        release_all(key, rec.module.iter())
    } else {
        release_all(key, rec.plugins())
    }
}

/// Invokes each teardown in order. A panicking one is logged and the rest still run.
fn release_all<'a>(key: &str, teardowns: impl IntoIterator<Item = &'a Teardown>) -> usize {
    let mut invoked = 0;
    for teardown in teardowns {
        invoked += 1;
        if let Err(panic) = catch_unwind(AssertUnwindSafe(|| teardown.release())) {
            error!(key, "teardown panicked: {}", panic_message(panic.as_ref()));
        }
    }
    invoked
}
