use std::sync::Arc;

use crate::{
    core::{hydrator::Hydrator, Config},
    events::EventBus,
    host::{ReadScheduler, ResizeNotifier, Viewport, YieldScheduler},
    modules::Resolve,
};

/// Builder for constructing a [`Hydrator`] with optional host capabilities.
pub struct HydratorBuilder {
    cfg: Config,
    resolver: Arc<dyn Resolve>,
    viewport: Arc<dyn Viewport>,
    scheduler: Option<Arc<dyn ReadScheduler>>,
    resize: Option<ResizeNotifier>,
    bus: Option<EventBus>,
}

impl HydratorBuilder {
    /// Creates a new builder around the mandatory capabilities.
    pub fn new(cfg: Config, resolver: Arc<dyn Resolve>, viewport: Arc<dyn Viewport>) -> Self {
        Self {
            cfg,
            resolver,
            viewport,
            scheduler: None,
            resize: None,
            bus: None,
        }
    }

    /// Sets the read-phase scheduler used by `hydrate`.
    ///
    /// Defaults to [`YieldScheduler`].
    pub fn with_scheduler(mut self, scheduler: Arc<dyn ReadScheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Sets the resize source the engine listens to.
    ///
    /// Defaults to a fresh [`ResizeNotifier`], reachable through
    /// [`Hydrator::resize_notifier`].
    pub fn with_resize(mut self, resize: ResizeNotifier) -> Self {
        self.resize = Some(resize);
        self
    }

    /// Shares an existing notification bus instead of creating one.
    pub fn with_bus(mut self, bus: EventBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// Builds and returns the engine. Nothing is discovered until `hydrate`.
    pub fn build(self) -> Arc<Hydrator> {
        Arc::new(Hydrator::new_internal(
            self.cfg,
            self.resolver,
            self.viewport,
            self.scheduler.unwrap_or_else(|| Arc::new(YieldScheduler)),
            self.resize.unwrap_or_default(),
            self.bus.unwrap_or_default(),
        ))
    }
}
