//! # Read-phase scheduling.
//!
//! `hydrate` awaits [`ReadScheduler::read_phase`] before touching the element
//! tree so discovery never forces a synchronous layout in the host.

use std::time::Duration;

use async_trait::async_trait;

/// Defers the caller to a point where element reads are safe.
#[async_trait]
pub trait ReadScheduler: Send + Sync + 'static {
    /// Completes at the next read-safe tick.
    async fn read_phase(&self);
}

/// Yields once to the runtime. Suitable for headless hosts.
#[derive(Debug, Default, Clone, Copy)]
pub struct YieldScheduler;

#[async_trait]
impl ReadScheduler for YieldScheduler {
    async fn read_phase(&self) {
        tokio::task::yield_now().await;
    }
}

/// Waits one frame interval before reading, emulating a paint round-trip.
#[derive(Debug, Clone, Copy)]
pub struct FrameScheduler {
    frame: Duration,
}

impl FrameScheduler {
    /// Creates a scheduler with the given frame interval.
    pub fn new(frame: Duration) -> Self {
        Self { frame }
    }
}

impl Default for FrameScheduler {
    /// One frame at 60Hz.
    fn default() -> Self {
        Self::new(Duration::from_micros(16_667))
    }
}

#[async_trait]
impl ReadScheduler for FrameScheduler {
    async fn read_phase(&self) {
        tokio::time::sleep(self.frame).await;
    }
}
