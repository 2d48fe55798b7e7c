//! # Resize listener.
//!
//! One background task per hydrated engine: it drains resize notifications and
//! feeds them through a [`Debouncer`] whose action re-runs `scan`.
//!
//! ```text
//! ResizeNotifier ──► rx.recv() ──► debouncer.call() ──(quiet for wait)──► scan()
//!                       │
//!        stop() ──► token cancelled, pending scan discarded, task aborted
//! ```
//!
//! The action holds the engine weakly; a dropped engine stops receiving scans.

use std::sync::{Arc, Weak};
use std::time::Duration;

use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::core::hydrator::Hydrator;
use crate::host::Resize;
use crate::utils::Debouncer;

/// Handle to a running resize listener.
pub(crate) struct Listener {
    token: CancellationToken,
    debouncer: Option<Arc<Debouncer>>,
    join: JoinHandle<()>,
}

impl Listener {
    /// Spawns the listener on an already-subscribed receiver.
    pub(crate) fn spawn(
        engine: Weak<Hydrator>,
        mut rx: broadcast::Receiver<Resize>,
        debounce: Option<Duration>,
    ) -> Self {
        let token = CancellationToken::new();
        let rt = token.clone();

        let rescan = move || {
            if let Some(engine) = engine.upgrade() {
                engine.scan();
            }
        };
        let debouncer = debounce.map(|wait| Arc::new(Debouncer::new(wait, rescan.clone())));
        let worker_debouncer = debouncer.clone();

        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = rt.cancelled() => break,
                    msg = rx.recv() => match msg {
                        Ok(_) | Err(RecvError::Lagged(_)) => match &worker_debouncer {
                            Some(d) => d.call(),
                            None => rescan(),
                        },
                        Err(RecvError::Closed) => break,
                    }
                }
            }
            debug!("resize listener stopped");
        });

        Self {
            token,
            debouncer,
            join,
        }
    }

    /// Stops listening; a scan still waiting on the debounce is discarded.
    pub(crate) fn stop(self) {
        self.token.cancel();
        if let Some(d) = &self.debouncer {
            d.cancel();
        }
        self.join.abort();
    }
}
