//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::store::ProductStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`. The data store is held as a
/// trait object so the page logic can be exercised against an in-memory
/// double instead of the live Supabase project.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    store: Arc<dyn ProductStore>,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Storefront configuration
    /// * `store` - Data-access implementation for products and cart
    #[must_use]
    pub fn new(config: StorefrontConfig, store: Arc<dyn ProductStore>) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, store }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the product/cart data store.
    #[must_use]
    pub fn store(&self) -> &dyn ProductStore {
        &*self.inner.store
    }
}
