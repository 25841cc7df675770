//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use table_tap_core::PhotoId;

use crate::config::ServerConfig;

/// TTL for cached menu-item photo bytes.
const PHOTO_CACHE_TTL: Duration = Duration::from_secs(300);

/// Maximum number of photos held in memory at once.
const PHOTO_CACHE_CAPACITY: u64 = 500;

/// A cached menu-item photo.
#[derive(Debug)]
pub struct CachedPhoto {
    pub mime_type: String,
    pub content: Vec<u8>,
}

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ServerConfig,
    pool: PgPool,
    photo_cache: Cache<PhotoId, Arc<CachedPhoto>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: ServerConfig, pool: PgPool) -> Self {
        let photo_cache = Cache::builder()
            .max_capacity(PHOTO_CACHE_CAPACITY)
            .time_to_live(PHOTO_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                photo_cache,
            }),
        }
    }

    /// Get a reference to the server configuration.
    #[must_use]
    pub fn config(&self) -> &ServerConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the menu-item photo cache.
    #[must_use]
    pub fn photo_cache(&self) -> &Cache<PhotoId, Arc<CachedPhoto>> {
        &self.inner.photo_cache
    }
}
