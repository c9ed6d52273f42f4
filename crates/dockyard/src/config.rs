#![forbid(unsafe_code)]

//! Factory configuration: locator registries and dispatch policy.
//!
//! A [`FactoryConfig`] is assembled once with the consuming builder methods
//! and then moved into [`crate::DockFactory::new`]; it is never mutated
//! afterwards.

use std::fmt;
use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::dockable::Context;
use crate::window::Host;

/// Produces the context object for one id. `None` is a valid answer.
pub type ContextLocator = Arc<dyn Fn() -> Option<Context> + Send + Sync>;

/// Produces the host surface for one window id.
pub type HostLocator = Arc<dyn Fn() -> Host + Send + Sync>;

/// How the `split_to_*` convenience wrappers pick a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitDispatch {
    /// Each wrapper splits in its own direction.
    #[default]
    Directional,
    /// Right, top and bottom all split left, matching layouts produced by
    /// older releases.
    LegacyLeft,
}

/// Immutable settings handed to a factory at construction.
#[derive(Clone, Default)]
pub struct FactoryConfig {
    pub(crate) context_locators: FxHashMap<String, ContextLocator>,
    pub(crate) host_locators: FxHashMap<String, HostLocator>,
    pub(crate) split_dispatch: SplitDispatch,
}

impl FactoryConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the context locator for `id`, replacing any earlier one.
    #[must_use]
    pub fn context_locator<F>(mut self, id: impl Into<String>, locator: F) -> Self
    where
        F: Fn() -> Option<Context> + Send + Sync + 'static,
    {
        let _ = self.context_locators.insert(id.into(), Arc::new(locator));
        self
    }

    /// Register the host locator for window `id`, replacing any earlier one.
    #[must_use]
    pub fn host_locator<F>(mut self, id: impl Into<String>, locator: F) -> Self
    where
        F: Fn() -> Host + Send + Sync + 'static,
    {
        let _ = self.host_locators.insert(id.into(), Arc::new(locator));
        self
    }

    #[must_use]
    pub fn split_dispatch(mut self, split_dispatch: SplitDispatch) -> Self {
        self.split_dispatch = split_dispatch;
        self
    }

    #[must_use]
    pub fn has_context_locator(&self, id: &str) -> bool {
        self.context_locators.contains_key(id)
    }

    #[must_use]
    pub fn has_host_locator(&self, id: &str) -> bool {
        self.host_locators.contains_key(id)
    }

    #[must_use]
    pub const fn dispatch(&self) -> SplitDispatch {
        self.split_dispatch
    }
}

impl fmt::Debug for FactoryConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut context_ids: Vec<_> = self.context_locators.keys().collect();
        context_ids.sort();
        let mut host_ids: Vec<_> = self.host_locators.keys().collect();
        host_ids.sort();
        f.debug_struct("FactoryConfig")
            .field("context_locators", &context_ids)
            .field("host_locators", &host_ids)
            .field("split_dispatch", &self.split_dispatch)
            .finish()
    }
}
