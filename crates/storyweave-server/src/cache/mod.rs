//! # Widget Cache
//!
//! Stores generated [`WidgetResponse`]s keyed by normalized prompt so repeat
//! requests skip the model call.
//!
//! ## Backends
//!
//! - [`MokaWidgetCache`]: in-process TTL cache (default)
//! - [`RedisWidgetCache`]: shared redis instance (`cache-redis` feature)
//! - [`NoopWidgetCache`]: caching disabled
//!
//! Cache failures are never fatal: the service logs them and carries on.

mod in_memory;
mod noop;
#[cfg(feature = "cache-redis")]
mod redis_backend;

pub use in_memory::MokaWidgetCache;
pub use noop::NoopWidgetCache;
#[cfg(feature = "cache-redis")]
pub use redis_backend::RedisWidgetCache;

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use storyweave_shared::config::{CacheBackend, CacheConfig};
use storyweave_shared::models::WidgetResponse;
use tracing::{info, warn};

/// Cache key prefix for generated widgets.
pub const KEY_PREFIX: &str = "widget:";

/// Cache key for a generation prompt.
pub fn cache_key(prompt: &str) -> String {
    format!("{KEY_PREFIX}{}", prompt.trim())
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache backend error: {0}")]
    Backend(String),

    #[error("cache serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Async key/value store for rendered widgets.
#[async_trait]
pub trait WidgetCache: Send + Sync + fmt::Debug {
    /// Short backend name reported by `/health`.
    fn backend_name(&self) -> &'static str;

    async fn get(&self, key: &str) -> Result<Option<WidgetResponse>, CacheError>;

    /// Store `response` under `key`, expiring after `ttl`.
    async fn put(
        &self,
        key: &str,
        response: &WidgetResponse,
        ttl: Duration,
    ) -> Result<(), CacheError>;
}

/// Build the configured cache backend.
///
/// A redis backend that cannot be reached at startup degrades to the
/// in-process cache.
pub async fn build_cache(config: &CacheConfig) -> Arc<dyn WidgetCache> {
    let cache: Arc<dyn WidgetCache> = match config.backend {
        CacheBackend::None => Arc::new(NoopWidgetCache),
        CacheBackend::Moka => Arc::new(MokaWidgetCache::new(config.max_capacity)),
        CacheBackend::Redis => match connect_redis(config).await {
            Some(cache) => cache,
            None => Arc::new(MokaWidgetCache::new(config.max_capacity)),
        },
    };

    info!(
        requested = %config.backend,
        backend = cache.backend_name(),
        ttl_seconds = config.ttl_seconds,
        "Widget cache ready"
    );
    cache
}

#[cfg(feature = "cache-redis")]
async fn connect_redis(config: &CacheConfig) -> Option<Arc<dyn WidgetCache>> {
    match RedisWidgetCache::connect(&config.redis_url()).await {
        Ok(cache) => Some(Arc::new(cache)),
        Err(e) => {
            warn!(error = %e, "Redis unavailable, falling back to in-process cache");
            None
        }
    }
}

#[cfg(not(feature = "cache-redis"))]
async fn connect_redis(_config: &CacheConfig) -> Option<Arc<dyn WidgetCache>> {
    warn!("Redis cache requested but the cache-redis feature is disabled, using in-process cache");
    None
}
