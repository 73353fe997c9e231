//! Per-call context handed to capabilities.

use sqlnav_core::{NavPath, Parameters};

/// What a capability call knows about the request beyond its payload.
#[derive(Debug, Clone, Default)]
pub struct Context {
    /// Path of the node the call applies to
    pub path: NavPath,
    /// SQL predicate narrowing children, if any
    pub filter: Option<String>,
    /// Apply to descendants as well
    pub recurse: bool,
    /// Dynamic parameters, already validated against the capability's schema
    pub params: Parameters,
}

impl Context {
    /// Context for `path` with nothing else set.
    pub fn new(path: NavPath) -> Self {
        Self {
            path,
            ..Self::default()
        }
    }

    /// Set the filter. Blank filters are dropped.
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.trim().is_empty());
        self
    }

    /// Set the recurse flag.
    pub fn with_recurse(mut self, recurse: bool) -> Self {
        self.recurse = recurse;
        self
    }

    /// Set the dynamic parameters.
    pub fn with_params(mut self, params: Parameters) -> Self {
        self.params = params;
        self
    }
}
