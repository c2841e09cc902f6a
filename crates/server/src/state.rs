//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::models::ShopTwo;
use crate::store::{EntityStore, InMemoryStore};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to the
/// configuration and the entity store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    store: Arc<dyn EntityStore<ShopTwo>>,
}

impl AppState {
    /// Create application state backed by the in-memory store.
    #[must_use]
    pub fn new(config: ServerConfig) -> Self {
        Self::with_store(config, Arc::new(InMemoryStore::new()))
    }

    /// Create application state with a custom store backend.
    #[must_use]
    pub fn with_store(config: ServerConfig, store: Arc<dyn EntityStore<ShopTwo>>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the entity store.
    #[must_use]
    pub fn store(&self) -> &dyn EntityStore<ShopTwo> {
        self.inner.store.as_ref()
    }
}
