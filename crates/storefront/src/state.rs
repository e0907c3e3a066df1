//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::cart::CartService;
use crate::config::StorefrontConfig;
use crate::db::{CartRepository, CatalogRepository};

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`; provides access to shared resources
/// like the database pool and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        Self {
            inner: Arc::new(AppStateInner { config, pool }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Build a cart service wired to the Postgres repositories.
    ///
    /// Constructed per request; carts keep no in-process state between
    /// requests.
    #[must_use]
    pub fn cart_service(&self) -> CartService<CatalogRepository<'_>, CartRepository<'_>> {
        CartService::new(
            CatalogRepository::new(self.pool()),
            CartRepository::new(self.pool()),
        )
    }
}
