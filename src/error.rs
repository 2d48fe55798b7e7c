//! Error types used by the hydration runtime and behaviour modules.
//!
//! - [`HydrateError`]: configuration errors raised while discovering elements.
//!   The only kind that crosses the engine boundary as a returned failure.
//! - [`ResolveError`]: the host resolver could not produce a behaviour.
//! - [`ModuleError`]: a behaviour failed while mounting.
//! - [`LoadError`]: umbrella for everything that can stop a load.
//! - [`RegisterError`]: a teardown plugin could not be attached to its record.
//!
//! Every enum provides `as_label` (stable snake_case label for logs).

use thiserror::Error;

/// # Configuration errors found during discovery.
///
/// Raised synchronously by [`Hydrator::hydrate`](crate::Hydrator::hydrate);
/// the hydration pass that hit it seeds nothing.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HydrateError {
    /// An element declares more than one behaviour name.
    #[error("only one behaviour is allowed per element, got {behaviour:?}")]
    MultipleBehaviours {
        /// Raw attribute value as found on the element.
        behaviour: String,
    },
}

impl HydrateError {
    /// Returns a short stable label (snake_case) for use in logs.
    ///
    /// # Example
    /// ```
    /// use hydravisor::HydrateError;
    ///
    /// let err = HydrateError::MultipleBehaviours { behaviour: "menu nav".into() };
    /// assert_eq!(err.as_label(), "hydrate_multiple_behaviours");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HydrateError::MultipleBehaviours { .. } => "hydrate_multiple_behaviours",
        }
    }
}

/// # Errors produced by a [`Resolve`](crate::Resolve) implementation.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// No behaviour is known under this name.
    #[error("behaviour {name:?} not found")]
    NotFound {
        /// Requested behaviour name.
        name: String,
    },

    /// The resolver knows the name but fetching it failed.
    #[error("failed to resolve behaviour {name:?}: {error}")]
    Failed {
        /// Requested behaviour name.
        name: String,
        /// Underlying error message.
        error: String,
    },
}

impl ResolveError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            ResolveError::NotFound { .. } => "resolve_not_found",
            ResolveError::Failed { .. } => "resolve_failed",
        }
    }
}

/// # Failure reported by a behaviour's `mount`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("behaviour failed to mount: {error}")]
pub struct ModuleError {
    /// The underlying error message.
    pub error: String,
}

impl ModuleError {
    /// Creates a module error from any displayable message.
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

/// # Errors that stop a single module load.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LoadError {
    /// The behaviour could not be resolved.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// The behaviour was resolved but its `mount` returned an error.
    #[error(transparent)]
    Module(#[from] ModuleError),

    /// The behaviour panicked while mounting.
    #[error("behaviour for {key:?} panicked: {info}")]
    Panicked {
        /// Record key that was being loaded.
        key: String,
        /// Panic payload, if it was a string.
        info: String,
    },
}

impl LoadError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            LoadError::Resolve(e) => e.as_label(),
            LoadError::Module(_) => "module_failed",
            LoadError::Panicked { .. } => "module_panicked",
        }
    }
}

/// # Errors produced while registering a teardown plugin.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegisterError {
    /// The engine owning the record store has been dropped.
    #[error("record store closed; plugin for {key:?} dropped")]
    StoreClosed {
        /// Record key the plugin was meant for.
        key: String,
    },
}

impl RegisterError {
    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            RegisterError::StoreClosed { .. } => "register_store_closed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_error_wraps_resolve_label() {
        let err: LoadError = ResolveError::NotFound {
            name: "menu".into(),
        }
        .into();
        assert_eq!(err.as_label(), "resolve_not_found");
        assert_eq!(err.to_string(), "behaviour \"menu\" not found");
    }

    #[test]
    fn module_error_message() {
        let err: LoadError = ModuleError::new("no anchor").into();
        assert_eq!(err.as_label(), "module_failed");
        assert_eq!(err.to_string(), "behaviour failed to mount: no anchor");
    }
}
