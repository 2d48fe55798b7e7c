//! # Engine configuration.
//!
//! Provides [`Config`], the settings a [`Hydrator`](crate::Hydrator) is built with.
//!
//! ## Sentinel values
//! - `resize_debounce = 0s` → every resize triggers a scan (no debounce)

use std::time::Duration;

/// Configuration for the hydration engine.
///
/// ## Field semantics
/// - `resize_debounce`: quiet period after the last resize before re-scanning (`0s` = none)
/// - `behaviour_attr`: dataset key naming the behaviour (`data-behaviour`)
/// - `query_attr`: dataset key holding the activation media query (`data-query`)
/// - `keep_alive_attr`: dataset key marking a record persistent (`data-keep-alive`)
/// - `warn_missing_id`: warn when a synthesized key replaces a missing element id
#[derive(Clone, Debug)]
pub struct Config {
    /// Trailing-edge debounce applied to resize notifications.
    pub resize_debounce: Duration,

    /// Dataset key holding the behaviour name.
    pub behaviour_attr: String,

    /// Dataset key holding the activation media query.
    pub query_attr: String,

    /// Dataset key marking an element keep-alive.
    ///
    /// Any value other than `"false"` counts as set.
    pub keep_alive_attr: String,

    /// Log a warning for every element without an id.
    pub warn_missing_id: bool,
}

impl Config {
    /// Returns the resize debounce as an `Option`.
    ///
    /// - `None` → scan on every resize
    /// - `Some(d)` → scan once resizes have been quiet for `d`
    #[inline]
    pub fn debounce(&self) -> Option<Duration> {
        if self.resize_debounce == Duration::ZERO {
            None
        } else {
            Some(self.resize_debounce)
        }
    }

    /// True if the dataset key `key` is one the engine consumes itself.
    #[inline]
    pub(crate) fn is_reserved(&self, key: &str) -> bool {
        key == self.behaviour_attr || key == self.query_attr || key == self.keep_alive_attr
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `resize_debounce = 100ms`
    /// - `behaviour_attr = "behaviour"`, `query_attr = "query"`, `keep_alive_attr = "keepAlive"`
    /// - `warn_missing_id = true`
    fn default() -> Self {
        Self {
            resize_debounce: Duration::from_millis(100),
            behaviour_attr: "behaviour".to_string(),
            query_attr: "query".to_string(),
            keep_alive_attr: "keepAlive".to_string(),
            warn_missing_id: true,
        }
    }
}
